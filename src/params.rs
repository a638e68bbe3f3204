use std::time::Duration;

use crate::error::ParamsError;

// ===================================================================================
// Default Constants (used as initial slider defaults)
// ===================================================================================

pub const DEFAULT_NUM_PARTICLES: usize = 20;
pub const MIN_PARTICLES: usize = 5;
pub const MAX_PARTICLES: usize = 50;

pub const DEFAULT_SPEED: u32 = 3;
pub const MIN_SPEED: u32 = 1;
pub const MAX_SPEED: u32 = 10;

const DEFAULT_CANVAS_WIDTH: f32 = 1000.0;
const DEFAULT_CANVAS_HEIGHT: f32 = 700.0;

/// Particles spawn at least this far from every wall.
pub const SPAWN_MARGIN: f32 = 30.0;

/// Nominal length of one simulation tick (~60 ticks per second).
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

pub const SEED_VAR: &str = "BROWNIAN_SEED";
pub const WIDTH_VAR: &str = "BROWNIAN_WIDTH";
pub const HEIGHT_VAR: &str = "BROWNIAN_HEIGHT";

// ===================================================================================
// Simulation Parameters
// ===================================================================================

/// Startup configuration for the simulation.
///
/// Particle count, speed and trail visibility are only initial values; the
/// control surface changes them later through the `Simulation` commands.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationParams {
    pub num_particles: usize,
    pub speed: u32,
    pub show_trails: bool,
    /// Width of the simulation box in canvas units.
    pub canvas_width: f32,
    /// Height of the simulation box in canvas units.
    pub canvas_height: f32,
    /// Fixed RNG seed, `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            num_particles: DEFAULT_NUM_PARTICLES,
            speed: DEFAULT_SPEED,
            show_trails: true,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Defaults overridden by the `BROWNIAN_*` environment variables.
    pub fn from_env() -> Result<Self, ParamsError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ParamsError> {
        let mut params = Self::default();

        if let Some(seed) = parse_override::<u64>(&lookup, SEED_VAR)? {
            params.seed = Some(seed);
        }
        if let Some(width) = parse_override::<f32>(&lookup, WIDTH_VAR)? {
            params.canvas_width = width;
        }
        if let Some(height) = parse_override::<f32>(&lookup, HEIGHT_VAR)? {
            params.canvas_height = height;
        }

        params.validate()?;
        Ok(params)
    }

    /// Checks that every spawn position is a legal resting position.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let min = 2.0 * SPAWN_MARGIN;
        // `!(a > b)` also rejects NaN
        if !(self.canvas_width > min) || !(self.canvas_height > min) {
            return Err(ParamsError::CanvasTooSmall {
                width: self.canvas_width,
                height: self.canvas_height,
                min,
            });
        }
        Ok(())
    }
}

fn parse_override<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ParamsError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ParamsError::InvalidOverride { var, value }),
    }
}

pub fn clamp_particle_count(n: usize) -> usize {
    n.clamp(MIN_PARTICLES, MAX_PARTICLES)
}

pub fn clamp_speed(s: u32) -> u32 {
    s.clamp(MIN_SPEED, MAX_SPEED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.num_particles, 20);
        assert_eq!(params.speed, 3);
        assert!(params.show_trails);
    }

    #[test]
    fn tiny_canvas_is_rejected() {
        let params = SimulationParams {
            canvas_width: 50.0,
            ..SimulationParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParamsError::CanvasTooSmall { .. })
        ));
    }

    #[test]
    fn env_overrides_are_applied() {
        let lookup = lookup_from(&[(SEED_VAR, "1234"), (WIDTH_VAR, " 640 "), (HEIGHT_VAR, "480")]);
        let params = SimulationParams::from_lookup(lookup).unwrap();
        assert_eq!(params.seed, Some(1234));
        assert_eq!(params.canvas_width, 640.0);
        assert_eq!(params.canvas_height, 480.0);
    }

    #[test]
    fn bad_override_is_reported() {
        let lookup = lookup_from(&[(SEED_VAR, "not-a-number")]);
        let err = SimulationParams::from_lookup(lookup).unwrap_err();
        assert_eq!(
            err,
            ParamsError::InvalidOverride {
                var: SEED_VAR,
                value: "not-a-number".to_string(),
            }
        );
    }

    #[test]
    fn override_can_make_canvas_invalid() {
        let lookup = lookup_from(&[(HEIGHT_VAR, "10")]);
        assert!(SimulationParams::from_lookup(lookup).is_err());
    }

    #[test]
    fn slider_ranges_clamp() {
        assert_eq!(clamp_particle_count(0), MIN_PARTICLES);
        assert_eq!(clamp_particle_count(500), MAX_PARTICLES);
        assert_eq!(clamp_speed(0), MIN_SPEED);
        assert_eq!(clamp_speed(11), MAX_SPEED);
        assert_eq!(clamp_speed(7), 7);
    }
}
