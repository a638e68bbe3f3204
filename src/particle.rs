use std::collections::VecDeque;

use eframe::egui::{Color32, Pos2, Vec2, pos2, vec2};

use crate::params::SPAWN_MARGIN;
use crate::random::RandomSource;

// ===================================================================================
// Motion Constants
// ===================================================================================

/// Maximum number of positions kept in a particle's trail.
pub const TRAIL_LENGTH: usize = 30;

/// Velocity multiplier applied to the colliding axis on a wall bounce.
pub const WALL_DAMPING: f32 = -0.8;

/// Half-width of the per-tick uniform velocity jitter.
const JITTER: f32 = 0.5;

/// The speed cap is `SPEED_FACTOR * speed`.
const SPEED_FACTOR: f32 = 0.5;

const MIN_RADIUS: f32 = 4.0;
const MAX_RADIUS: f32 = 7.0;
const SPAWN_VELOCITY: f32 = 2.0;

/// Colours a particle may be spawned with.
pub const PALETTE: [Color32; 12] = [
    Color32::from_rgb(0xFF, 0x6B, 0x6B),
    Color32::from_rgb(0x4E, 0xCD, 0xC4),
    Color32::from_rgb(0x45, 0xB7, 0xD1),
    Color32::from_rgb(0xFF, 0xA0, 0x7A),
    Color32::from_rgb(0x98, 0xD8, 0xC8),
    Color32::from_rgb(0xF7, 0xDC, 0x6F),
    Color32::from_rgb(0xBB, 0x8F, 0xCE),
    Color32::from_rgb(0x85, 0xC1, 0xE2),
    Color32::from_rgb(0xFF, 0x9F, 0xF3),
    Color32::from_rgb(0x54, 0xA0, 0xFF),
    Color32::from_rgb(0x48, 0xDB, 0xFB),
    Color32::from_rgb(0x1D, 0xD1, 0xA1),
];

// ===================================================================================
// Particle
// ===================================================================================

/// A single random-walking circle.
#[derive(Clone, Debug)]
pub struct Particle {
    /// Centre of the circle in canvas units.
    pos: Pos2,
    /// Displacement per tick.
    vel: Vec2,
    radius: f32,
    color: Color32,
    /// Recent positions, oldest first.
    trail: VecDeque<Pos2>,
}

impl Particle {
    pub fn new(pos: Pos2, vel: Vec2, radius: f32, color: Color32) -> Self {
        debug_assert!(radius > 0.0, "particle radius must be positive, got {radius}");
        Self {
            pos,
            vel,
            radius,
            color,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Spawns a particle at a random spot at least [`SPAWN_MARGIN`] away from
    /// the walls of a `bounds`-sized canvas.
    pub fn spawn(bounds: Vec2, rng: &mut impl RandomSource) -> Self {
        let x = rng.uniform(SPAWN_MARGIN, bounds.x - SPAWN_MARGIN);
        let y = rng.uniform(SPAWN_MARGIN, bounds.y - SPAWN_MARGIN);
        let vx = rng.uniform(-SPAWN_VELOCITY, SPAWN_VELOCITY);
        let vy = rng.uniform(-SPAWN_VELOCITY, SPAWN_VELOCITY);
        let radius = rng.uniform(MIN_RADIUS, MAX_RADIUS);
        let color = PALETTE[rng.index(PALETTE.len())];
        Self::new(pos2(x, y), vec2(vx, vy), radius, color)
    }

    /// Advances the particle by one tick.
    ///
    /// `speed` is the user speed multiplier; the velocity magnitude is capped
    /// at half of it. When `record_trail` is false the trail is left alone.
    pub fn update(&mut self, speed: f32, bounds: Vec2, record_trail: bool, rng: &mut impl RandomSource) {
        debug_assert!(
            bounds.x > 2.0 * self.radius && bounds.y > 2.0 * self.radius,
            "canvas {bounds:?} cannot hold a particle of radius {}",
            self.radius
        );

        // 1) random kick
        self.vel.x += rng.uniform(-JITTER, JITTER);
        self.vel.y += rng.uniform(-JITTER, JITTER);

        // 2) rescale to the speed cap, keeping direction
        let max_speed = SPEED_FACTOR * speed;
        let current_speed = self.vel.length();
        if current_speed > max_speed && current_speed > 0.0 {
            self.vel *= max_speed / current_speed;
        }

        // 3) explicit Euler step, dt = 1 tick
        self.pos += self.vel;

        // 4) walls, one bounce per axis per tick
        let r = self.radius;
        if self.pos.x < r || self.pos.x > bounds.x - r {
            self.vel.x *= WALL_DAMPING;
            self.pos.x = self.pos.x.clamp(r, bounds.x - r);
        }
        if self.pos.y < r || self.pos.y > bounds.y - r {
            self.vel.y *= WALL_DAMPING;
            self.pos.y = self.pos.y.clamp(r, bounds.y - r);
        }

        // 5) trail
        if record_trail {
            self.trail.push_back(self.pos);
            while self.trail.len() > TRAIL_LENGTH {
                self.trail.pop_front();
            }
        }
    }

    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    #[inline]
    pub fn pos(&self) -> Pos2 {
        self.pos
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn color(&self) -> Color32 {
        self.color
    }

    /// Recent positions, oldest first.
    pub fn trail(&self) -> impl ExactSizeIterator<Item = Pos2> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::testing::ZeroJitter;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BOUNDS: Vec2 = vec2(400.0, 300.0);
    const EPS: f32 = 1e-4;

    #[test]
    fn spawn_respects_margin_and_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            let p = Particle::spawn(BOUNDS, &mut rng);
            assert!((SPAWN_MARGIN..=BOUNDS.x - SPAWN_MARGIN).contains(&p.pos().x));
            assert!((SPAWN_MARGIN..=BOUNDS.y - SPAWN_MARGIN).contains(&p.pos().y));
            assert!((MIN_RADIUS..=MAX_RADIUS).contains(&p.radius()));
            assert!(p.vel().x.abs() <= SPAWN_VELOCITY && p.vel().y.abs() <= SPAWN_VELOCITY);
            assert!(PALETTE.contains(&p.color()));
            assert_eq!(p.trail_len(), 0);
        }
    }

    #[test]
    fn speed_and_position_stay_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        for speed in 1..=10 {
            let mut particles: Vec<Particle> =
                (0..20).map(|_| Particle::spawn(BOUNDS, &mut rng)).collect();
            for _ in 0..300 {
                for p in &mut particles {
                    p.update(speed as f32, BOUNDS, true, &mut rng);
                    let r = p.radius();
                    // a bounce can only shrink the capped velocity
                    assert!(p.vel().length() <= 0.5 * speed as f32 + EPS);
                    assert!(p.pos().x >= r && p.pos().x <= BOUNDS.x - r);
                    assert!(p.pos().y >= r && p.pos().y <= BOUNDS.y - r);
                }
            }
        }
    }

    #[test]
    fn trail_keeps_latest_thirty_in_order() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::spawn(BOUNDS, &mut rng);
        let mut visited = Vec::new();
        for _ in 0..45 {
            p.update(3.0, BOUNDS, true, &mut rng);
            visited.push(p.pos());
            assert!(p.trail_len() <= TRAIL_LENGTH);
        }
        let trail: Vec<Pos2> = p.trail().collect();
        assert_eq!(trail.len(), TRAIL_LENGTH);
        assert_eq!(trail, visited[visited.len() - TRAIL_LENGTH..]);
    }

    #[test]
    fn wall_bounce_damps_and_clamps() {
        let radius = 5.0;
        let mut p = Particle::new(pos2(radius - 1.0, 150.0), vec2(-3.0, 0.0), radius, PALETTE[0]);
        p.update(10.0, BOUNDS, true, &mut ZeroJitter);
        assert!((p.vel().x - 2.4).abs() < EPS);
        assert_eq!(p.pos().x, radius);
        assert_eq!(p.vel().y, 0.0);
    }

    #[test]
    fn far_wall_bounce() {
        let radius = 6.0;
        let mut p = Particle::new(pos2(BOUNDS.x - radius, 10.0), vec2(2.0, 0.0), radius, PALETTE[1]);
        p.update(10.0, BOUNDS, false, &mut ZeroJitter);
        assert!((p.vel().x + 1.6).abs() < EPS);
        assert_eq!(p.pos().x, BOUNDS.x - radius);
    }

    #[test]
    fn clamp_alone_caps_speed_without_jitter() {
        let mut p = Particle::new(pos2(200.0, 150.0), vec2(3.0, 4.0), 5.0, PALETTE[2]);
        p.update(2.0, BOUNDS, true, &mut ZeroJitter);
        assert!((p.vel().length() - 1.0).abs() < EPS);
        // direction is preserved
        assert!((p.vel().x - 0.6).abs() < EPS);
        assert!((p.vel().y - 0.8).abs() < EPS);
    }

    #[test]
    fn resting_particle_is_not_rescaled() {
        let mut p = Particle::new(pos2(200.0, 150.0), Vec2::ZERO, 5.0, PALETTE[3]);
        p.update(1.0, BOUNDS, true, &mut ZeroJitter);
        assert_eq!(p.vel(), Vec2::ZERO);
        assert_eq!(p.pos(), pos2(200.0, 150.0));
    }

    #[test]
    fn trail_untouched_when_not_recording() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = Particle::spawn(BOUNDS, &mut rng);
        for _ in 0..5 {
            p.update(3.0, BOUNDS, false, &mut rng);
        }
        assert_eq!(p.trail_len(), 0);
    }
}
