use std::time::{Duration, Instant};

use eframe::egui::{self, Align, Color32, Layout, RichText};

use crate::app::{ACCENT, ACCENT_HOVER, accent_button};

/// The splash closes on its own after this long.
pub const SPLASH_TIMEOUT: Duration = Duration::from_secs(8);

/// Time for the progress bar to advance by one percent.
const PROGRESS_STEP: Duration = Duration::from_millis(30);

const SPLASH_BG: Color32 = Color32::from_rgb(0x0F, 0x14, 0x19);
const MUTED: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);
const FAINT: Color32 = Color32::from_rgb(0x4B, 0x55, 0x63);

const INTRO: &str = "\
Brownian motion is the random movement of microscopic particles suspended \
in a fluid (a liquid or a gas). It comes from the particles being struck \
over and over by the fluid's own randomly moving molecules.

History
The effect was first observed in 1827 by the Scottish botanist Robert Brown, \
while looking at pollen grains in water under a microscope.

Why it matters
• Experimental evidence that atoms and molecules exist
• A foundation of kinetic theory and statistical mechanics
• Applications in physics, chemistry, biology and economics
• A model for diffusion and molecular transport

In this simulation
Every coloured circle stands for a molecule or colloidal particle that \
wanders randomly as the surrounding fluid molecules bump into it.";

/// Welcome screen shown before the simulator.
pub struct Splash {
    opened_at: Instant,
}

impl Splash {
    pub fn new(now: Instant) -> Self {
        Self { opened_at: now }
    }

    /// Progress bar fill in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f32 {
        let steps = now.saturating_duration_since(self.opened_at).as_millis() / PROGRESS_STEP.as_millis();
        steps.min(100) as f32 / 100.0
    }

    pub fn expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.opened_at) >= SPLASH_TIMEOUT
    }

    /// Draws the splash. Returns `true` once it should close.
    pub fn show(&self, ctx: &egui::Context, now: Instant) -> bool {
        let mut start_clicked = false;

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(SPLASH_BG).inner_margin(40.0))
            .show(ctx, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.set_max_width(620.0);
                    ui.add_space(20.0);
                    ui.label(RichText::new("🔬").size(80.0).color(ACCENT));
                    ui.label(RichText::new("BROWNIAN MOTION SIMULATOR").size(28.0).strong().color(Color32::WHITE));
                    ui.add_space(20.0);

                    ui.with_layout(Layout::top_down(Align::Min), |ui| {
                        ui.label(RichText::new(INTRO).size(14.0).color(MUTED));
                    });
                    ui.add_space(20.0);

                    ui.add(
                        egui::ProgressBar::new(self.progress(now))
                            .desired_height(6.0)
                            .fill(ACCENT),
                    );
                    ui.add_space(20.0);

                    start_clicked =
                        accent_button(ui, "🚀 Start Simulation", ACCENT, ACCENT_HOVER, egui::vec2(250.0, 50.0)).clicked();
                    ui.add_space(10.0);
                    ui.label(RichText::new("Built for learning physics & chemistry").size(11.0).color(FAINT));
                });
            });

        // keep the progress bar moving
        ctx.request_repaint_after(PROGRESS_STEP);

        start_clicked || self.expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_advances_one_percent_per_step() {
        let t0 = Instant::now();
        let splash = Splash::new(t0);
        assert_eq!(splash.progress(t0), 0.0);
        assert_eq!(splash.progress(t0 + Duration::from_millis(29)), 0.0);
        assert_eq!(splash.progress(t0 + Duration::from_millis(1500)), 0.5);
        assert_eq!(splash.progress(t0 + Duration::from_secs(7)), 1.0);
    }

    #[test]
    fn closes_after_timeout() {
        let t0 = Instant::now();
        let splash = Splash::new(t0);
        assert!(!splash.expired(t0 + Duration::from_millis(7999)));
        assert!(splash.expired(t0 + SPLASH_TIMEOUT));
    }
}
