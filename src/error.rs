//! Configuration errors.

use thiserror::Error;

/// Errors raised while building or validating [`SimulationParams`](crate::params::SimulationParams).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    /// The canvas cannot hold a particle inside the spawn margin.
    #[error("canvas {width}x{height} is too small: both sides must exceed {min}")]
    CanvasTooSmall { width: f32, height: f32, min: f32 },

    /// An environment override could not be parsed.
    #[error("invalid value {value:?} for {var}")]
    InvalidOverride { var: &'static str, value: String },
}
