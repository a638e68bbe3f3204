use std::time::{Duration, Instant};

use eframe::egui::{self, Color32, CursorIcon, FontId, RichText, Sense, Vec2, vec2};
use log::info;

use crate::params::{MAX_PARTICLES, MAX_SPEED, MIN_PARTICLES, MIN_SPEED, TICK_INTERVAL};
use crate::render::{Viewport, draw_canvas};
use crate::scheduler::TickScheduler;
use crate::simulation::Simulation;
use crate::splash::Splash;

// ===================================================================================
// Palette
// ===================================================================================

const WINDOW_BG: Color32 = Color32::from_rgb(0x1A, 0x1A, 0x2E);
const CARD_BG: Color32 = Color32::from_rgb(0x2D, 0x37, 0x48);
const TEXT_MUTED: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);
const TEXT_FAINT: Color32 = Color32::from_rgb(0x6B, 0x72, 0x80);

pub const ACCENT: Color32 = Color32::from_rgb(0x66, 0x7E, 0xEA);
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x55, 0x68, 0xD3);
const RESET: Color32 = Color32::from_rgb(0xF0, 0x93, 0xFB);
const RESET_HOVER: Color32 = Color32::from_rgb(0xD9, 0x7D, 0xDF);
const TRAILS: Color32 = Color32::from_rgb(0x4E, 0xCD, 0xC4);
const TRAILS_HOVER: Color32 = Color32::from_rgb(0x3D, 0xB8, 0xAD);

// ===================================================================================
// Main Application
// ===================================================================================

/// Which screen is on display.
enum Screen {
    Splash(Splash),
    Simulator,
}

/// The eframe application: a splash screen, then the simulator with a
/// control panel on the right and the canvas in the centre.
///
/// All simulation state lives in `sim`; the panels only read it and call
/// its commands.
pub struct BrownianApp {
    screen: Screen,
    sim: Simulation,
    scheduler: TickScheduler,
}

impl BrownianApp {
    pub fn new(sim: Simulation) -> Self {
        Self {
            screen: Screen::Splash(Splash::new(Instant::now())),
            sim,
            scheduler: TickScheduler::new(TICK_INTERVAL),
        }
    }

    /// Runs whatever ticks are due since the last frame.
    fn advance(&mut self, now: Instant) {
        if !self.sim.is_running() {
            self.scheduler.reset();
            return;
        }
        for _ in 0..self.scheduler.due_ticks(now) {
            self.sim.tick(now);
        }
    }

    fn header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::none().fill(WINDOW_BG).inner_margin(16.0))
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("🔬 Brownian Motion Simulator").size(36.0).strong().color(Color32::WHITE));
                    ui.label(
                        RichText::new("Random movement of particles, like molecules in a fluid")
                            .size(15.0)
                            .color(TEXT_MUTED),
                    );
                });
            });
    }

    fn footer(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("footer")
            .frame(egui::Frame::none().fill(WINDOW_BG).inner_margin(12.0))
            .show_separator_line(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(
                        "💡 Brownian motion was first observed by Robert Brown (1827) while studying pollen grains in water",
                    )
                    .size(12.0)
                    .color(TEXT_FAINT),
                );
            });
    }

    fn control_panel(&mut self, ctx: &egui::Context, now: Instant) {
        egui::SidePanel::right("controls")
            .exact_width(350.0)
            .resizable(false)
            .frame(egui::Frame::none().fill(WINDOW_BG).inner_margin(egui::Margin::symmetric(16.0, 8.0)))
            .show_separator_line(false)
            .show(ctx, |ui| {
                // -------------- Stats --------------
                stat_card(ui, &self.sim.steps().to_string(), "Total Steps", ACCENT);
                stat_card(ui, &self.sim.particles().len().to_string(), "Particles", TRAILS);
                stat_card(ui, &format_runtime(self.sim.elapsed()), "Runtime", RESET);
                ui.add_space(10.0);

                // -------------- Controls --------------
                egui::Frame::none().fill(CARD_BG).inner_margin(20.0).show(ui, |ui| {
                    ui.set_width(ui.available_width());

                    let mut count = self.sim.particle_count();
                    if slider_row(ui, "🔵 Particles", count.to_string(), &mut count, MIN_PARTICLES..=MAX_PARTICLES) {
                        self.sim.set_particle_count(count);
                    }

                    let mut speed = self.sim.speed();
                    if slider_row(ui, "⚡ Speed", format!("{speed}x"), &mut speed, MIN_SPEED..=MAX_SPEED) {
                        self.sim.set_speed(speed);
                    }

                    ui.add_space(20.0);

                    let play_label = if self.sim.is_running() { "⏸ Pause" } else { "▶ Start" };
                    if accent_button(ui, play_label, ACCENT, ACCENT_HOVER, vec2(300.0, 50.0)).clicked() {
                        self.sim.toggle_running(now);
                    }
                    ui.add_space(10.0);

                    ui.horizontal(|ui| {
                        if accent_button(ui, "🔄 Reset", RESET, RESET_HOVER, vec2(145.0, 45.0)).clicked() {
                            self.sim.reset();
                        }
                        ui.add_space(10.0);
                        let trails_label = if self.sim.show_trails() { "✓ Trails" } else { "✗ Trails" };
                        if accent_button(ui, trails_label, TRAILS, TRAILS_HOVER, vec2(145.0, 45.0)).clicked() {
                            self.sim.toggle_trails();
                        }
                    });
                });
            });
    }

    fn canvas(&self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(WINDOW_BG).inner_margin(egui::Margin::symmetric(16.0, 0.0)))
            .show(ctx, |ui| {
                let painter = ui.painter();
                let rect = ui.max_rect();
                let view = Viewport::fit(rect, self.sim.bounds());
                draw_canvas(painter, &view, self.sim.bounds(), self.sim.particles(), self.sim.show_trails());
            });
    }
}

impl eframe::App for BrownianApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        if let Screen::Splash(splash) = &self.screen {
            if splash.show(ctx, now) {
                info!("splash closed, showing simulator");
                self.screen = Screen::Simulator;
                ctx.request_repaint();
            }
            return;
        }

        // Simulation first, then draw what it produced.
        self.advance(now);

        self.header(ctx);
        self.footer(ctx);
        self.control_panel(ctx, now);
        self.canvas(ctx);

        // Keep ticking while running; stay idle otherwise.
        if self.sim.is_running() {
            ctx.request_repaint_after(self.scheduler.until_next());
        }
    }
}

// ===================================================================================
// Widgets
// ===================================================================================

/// A rounded, filled button that switches to `hover` while the pointer is on it.
pub fn accent_button(ui: &mut egui::Ui, text: &str, fill: Color32, hover: Color32, size: Vec2) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(size, Sense::click());
    let response = response.on_hover_cursor(CursorIcon::PointingHand);

    if ui.is_rect_visible(rect) {
        let color = if response.hovered() { hover } else { fill };
        let painter = ui.painter();
        painter.rect_filled(rect, 10.0, color);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            text,
            FontId::proportional(15.0),
            Color32::WHITE,
        );
    }
    response
}

fn stat_card(ui: &mut egui::Ui, value: &str, title: &str, color: Color32) {
    egui::Frame::none().fill(CARD_BG).inner_margin(egui::Margin::symmetric(0.0, 12.0)).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(value).size(28.0).strong().color(color));
            ui.label(RichText::new(title).size(13.0).color(TEXT_MUTED));
        });
    });
    ui.add_space(10.0);
}

/// Label, value readout and slider. Returns `true` if the slider moved.
fn slider_row<Num: egui::emath::Numeric>(
    ui: &mut egui::Ui,
    label: &str,
    readout: String,
    value: &mut Num,
    range: std::ops::RangeInclusive<Num>,
) -> bool {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).size(15.0).strong().color(Color32::WHITE));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new(readout).size(15.0).strong().color(ACCENT));
        });
    });
    ui.spacing_mut().slider_width = ui.available_width();
    let changed = ui.add(egui::Slider::new(value, range).show_value(false)).changed();
    ui.add_space(20.0);
    changed
}

/// `"{m}m {s}s"` from one minute on, `"{s}s"` below.
pub fn format_runtime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let (minutes, seconds) = (secs / 60, secs % 60);
    if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_label() {
        assert_eq!(format_runtime(Duration::ZERO), "0s");
        assert_eq!(format_runtime(Duration::from_millis(59_999)), "59s");
        assert_eq!(format_runtime(Duration::from_secs(60)), "1m 0s");
        assert_eq!(format_runtime(Duration::from_secs(3725)), "62m 5s");
    }
}
