//! A small Brownian-motion toy: coloured circles random-walk inside a box,
//! leave fading trails and bounce off the walls, driven by an egui front end.

pub mod app;
pub mod error;
pub mod params;
pub mod particle;
pub mod random;
pub mod render;
pub mod scheduler;
pub mod simulation;
pub mod splash;
