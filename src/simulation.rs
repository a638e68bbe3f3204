//! The simulation driver: owns the particle set, the run state and the
//! step/runtime counters.
//!
//! The driver is the single source of truth. The UI reads it through the
//! accessors and changes it only through the command methods.

use std::time::{Duration, Instant};

use eframe::egui::{Vec2, vec2};
use log::{debug, info};
use rand::rngs::StdRng;

use crate::error::ParamsError;
use crate::params::{SimulationParams, clamp_particle_count, clamp_speed};
use crate::particle::Particle;
use crate::random::RandomSource;

/// Whether ticks advance the particles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

pub struct Simulation<R = StdRng> {
    state: RunState,
    /// Size of the set produced by the next regeneration.
    particle_count: usize,
    speed: u32,
    show_trails: bool,
    bounds: Vec2,

    particles: Vec<Particle>,
    steps: u64,
    started_at: Option<Instant>,
    elapsed: Duration,

    rng: R,
}

impl<R: RandomSource> Simulation<R> {
    /// Builds a stopped simulation with a freshly spawned particle set.
    pub fn new(params: &SimulationParams, rng: R) -> Result<Self, ParamsError> {
        params.validate()?;

        let mut sim = Self {
            state: RunState::Stopped,
            particle_count: clamp_particle_count(params.num_particles),
            speed: clamp_speed(params.speed),
            show_trails: params.show_trails,
            bounds: vec2(params.canvas_width, params.canvas_height),
            particles: Vec::new(),
            steps: 0,
            started_at: None,
            elapsed: Duration::ZERO,
            rng,
        };
        sim.regenerate();
        Ok(sim)
    }

    /// Replaces the whole particle set with `particle_count` new particles.
    fn regenerate(&mut self) {
        let mut particles = Vec::with_capacity(self.particle_count);
        for _ in 0..self.particle_count {
            particles.push(Particle::spawn(self.bounds, &mut self.rng));
        }
        self.particles = particles;
        debug!("spawned {} particles", self.particles.len());
    }

    // -------------- Commands --------------

    /// Sets the particle-count target. While stopped the set is rebuilt right
    /// away; while running the new count waits for the next reset.
    pub fn set_particle_count(&mut self, n: usize) {
        let n = clamp_particle_count(n);
        if n == self.particle_count {
            return;
        }
        self.particle_count = n;
        debug!("particle count target set to {n}");
        if self.state == RunState::Stopped {
            self.regenerate();
        }
    }

    pub fn set_speed(&mut self, s: u32) {
        self.speed = clamp_speed(s);
        debug!("speed set to {}x", self.speed);
    }

    /// Starts or resumes. Elapsed time keeps counting from the first start
    /// until the next reset.
    pub fn start(&mut self, now: Instant) {
        if self.state == RunState::Running {
            return;
        }
        self.started_at.get_or_insert(now);
        self.state = RunState::Running;
        info!("simulation running ({} particles, {}x)", self.particles.len(), self.speed);
    }

    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            info!("simulation paused at step {}", self.steps);
        }
    }

    pub fn toggle_running(&mut self, now: Instant) {
        match self.state {
            RunState::Running => self.pause(),
            RunState::Stopped => self.start(now),
        }
    }

    /// Stops the simulation, zeroes the counters and respawns the particles
    /// using the current count target.
    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.steps = 0;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.regenerate();
        info!("simulation reset");
    }

    /// Turning trails off drops every particle's history at once.
    pub fn set_trails(&mut self, on: bool) {
        self.show_trails = on;
        if !on {
            for p in &mut self.particles {
                p.clear_trail();
            }
        }
        debug!("trails {}", if on { "on" } else { "off" });
    }

    pub fn toggle_trails(&mut self) {
        self.set_trails(!self.show_trails);
    }

    /// Advances every particle by one tick. Does nothing while stopped.
    ///
    /// Returns whether a step was taken.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.state != RunState::Running {
            return false;
        }

        let speed = self.speed as f32;
        for p in &mut self.particles {
            p.update(speed, self.bounds, self.show_trails, &mut self.rng);
        }

        self.steps += 1;
        if let Some(start) = self.started_at {
            self.elapsed = now.saturating_duration_since(start);
        }
        true
    }

    // -------------- Snapshot --------------

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Runtime as of the last tick.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn show_trails(&self) -> bool {
        self.show_trails
    }

    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }
}
