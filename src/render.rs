//! Canvas drawing. Reads the particle snapshot, never mutates it.

use eframe::egui::{Color32, Painter, Pos2, Rect, Stroke, Vec2, pos2};

use crate::particle::Particle;

pub const CANVAS_BG: Color32 = Color32::from_rgb(0x0F, 0x14, 0x19);
const GRID_COLOR: Color32 = Color32::from_rgb(0x1A, 0x1A, 0x2E);
const GRID_SPACING: f32 = 50.0;
const TRAIL_WIDTH: f32 = 2.0;
const GLOW_EXTRA: f32 = 4.0;

/// Maps simulation coordinates into a screen rectangle with one uniform scale,
/// so circles stay round whatever the panel's aspect ratio.
#[derive(Clone, Copy, Debug)]
pub struct Viewport {
    origin: Pos2,
    scale: f32,
    size: Vec2,
}

impl Viewport {
    /// Fits a `bounds`-sized box into `rect`, centred.
    pub fn fit(rect: Rect, bounds: Vec2) -> Self {
        let scale = (rect.width() / bounds.x).min(rect.height() / bounds.y);
        let size = bounds * scale;
        let origin = rect.center() - size / 2.0;
        Self { origin, scale, size }
    }

    #[inline]
    pub fn to_screen(&self, p: Pos2) -> Pos2 {
        self.origin + p.to_vec2() * self.scale
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.origin, self.size)
    }
}

/// Draws the background, grid and every particle.
pub fn draw_canvas(painter: &Painter, view: &Viewport, bounds: Vec2, particles: &[Particle], show_trails: bool) {
    painter.rect_filled(view.rect(), 0.0, CANVAS_BG);
    draw_grid(painter, view, bounds);

    if show_trails {
        for p in particles {
            draw_trail(painter, view, p);
        }
    }
    for p in particles {
        draw_particle(painter, view, p);
    }
}

fn draw_grid(painter: &Painter, view: &Viewport, bounds: Vec2) {
    let stroke = Stroke::new(1.0, GRID_COLOR);

    let mut x = 0.0;
    while x < bounds.x {
        painter.line_segment([view.to_screen(pos2(x, 0.0)), view.to_screen(pos2(x, bounds.y))], stroke);
        x += GRID_SPACING;
    }
    let mut y = 0.0;
    while y < bounds.y {
        painter.line_segment([view.to_screen(pos2(0.0, y)), view.to_screen(pos2(bounds.x, y))], stroke);
        y += GRID_SPACING;
    }
}

/// Older segments are drawn fainter.
fn draw_trail(painter: &Painter, view: &Viewport, p: &Particle) {
    let len = p.trail_len();
    if len < 2 {
        return;
    }

    let points: Vec<Pos2> = p.trail().map(|pt| view.to_screen(pt)).collect();
    for (i, seg) in points.windows(2).enumerate() {
        let age = i as f32 / len as f32;
        let color = p.color().gamma_multiply(0.15 + 0.85 * age);
        painter.line_segment([seg[0], seg[1]], Stroke::new(TRAIL_WIDTH, color));
    }
}

fn draw_particle(painter: &Painter, view: &Viewport, p: &Particle) {
    let center = view.to_screen(p.pos());
    let radius = p.radius() * view.scale;

    painter.circle_filled(center, (p.radius() + GLOW_EXTRA) * view.scale, p.color().gamma_multiply(0.25));
    painter.circle(center, radius, p.color(), Stroke::new(1.0, Color32::WHITE));
}
