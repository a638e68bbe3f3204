use eframe::egui;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use brownian_motion::app::BrownianApp;
use brownian_motion::params::SimulationParams;
use brownian_motion::simulation::Simulation;

// ===================================================================================
// main
// ===================================================================================

fn main() -> eframe::Result<()> {
    env_logger::init();

    let params = SimulationParams::from_env().unwrap_or_else(|e| {
        error!("ignoring configuration: {e}");
        SimulationParams::default()
    });

    let rng = match params.seed {
        Some(seed) => {
            info!("using fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };

    let sim = Simulation::new(&params, rng).map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_title("Brownian Motion Simulator"),
        ..Default::default()
    };

    eframe::run_native(
        "Brownian Motion Simulator",
        native_options,
        Box::new(|_cc| Ok(Box::new(BrownianApp::new(sim)))),
    )
}
