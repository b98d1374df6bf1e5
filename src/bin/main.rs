use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use pointer_particles::{
    FieldStats, FrameClock, ParticleColor, ParticleField, PointerTracker, SimulationConfig, Sprite, Viewport,
    ViewportBounds,
};

const INITIAL_WINDOW_SIZE: egui::Vec2 = egui::vec2(1280.0, 800.0);
const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(0x0f, 0x17, 0x2a);
const PARTICLE_OPACITY: f32 = 0.7;
const GLOW_OPACITY: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(about = "Particles drifting towards the pointer")]
struct Args {
    /// JSON file with particle settings; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation ticks per second, independent of the repaint rate.
    #[arg(long, default_value_t = 60.0)]
    rate: f32,
}

/// Draws sprites as soft dots on an egui painter.
struct Renderer;

impl Renderer {
    fn paint(&self, painter: &egui::Painter, origin: egui::Pos2, sprites: impl Iterator<Item = Sprite>) {
        for sprite in sprites {
            let center = origin + egui::vec2(sprite.x, sprite.y);
            painter.circle_filled(center, sprite.size * 2.0, egui::Color32::from_white_alpha(alpha(GLOW_OPACITY)));
            painter.circle_filled(center, sprite.size * 0.5, color32(sprite.color, PARTICLE_OPACITY));
        }
    }
}

fn alpha(opacity: f32) -> u8 {
    (opacity * 255.0).round() as u8
}

fn color32(color: ParticleColor, opacity: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, alpha(opacity))
}

struct ParticleApp {
    field: ParticleField,
    pointer: PointerTracker,
    bounds: ViewportBounds,
    clock: FrameClock,
    renderer: Renderer,
    last_frame_time: Instant,
    last_update: Duration,
    stats: FieldStats,
}

impl ParticleApp {
    fn new(field: ParticleField, rate: f32) -> Self {
        let viewport = field.viewport();
        Self {
            pointer: PointerTracker::new(viewport),
            bounds: ViewportBounds::new(viewport),
            clock: FrameClock::new(rate),
            renderer: Renderer,
            last_frame_time: Instant::now(),
            last_update: Duration::ZERO,
            stats: FieldStats::default(),
            field,
        }
    }

    fn render_ui_panel(&mut self, ui: &mut egui::Ui, frame_time: f32) {
        ui.label(format!("FPS: {:.3}", 1.0 / frame_time));
        ui.label(format!("Frame Time: {:.3}ms", frame_time * 1000.0));
        ui.label(format!("Update Time: {:.3}ms", self.last_update.as_secs_f64() * 1000.0));
        ui.separator();

        let viewport = self.bounds.current();
        ui.label(format!("Particles: {}", self.field.len()));
        ui.label(format!("Viewport: {:.0} x {:.0}", viewport.width, viewport.height));
        ui.label(format!("Attracted: {}", self.stats.attracted));
        ui.label(format!("Mean Distance: {:.1}", self.stats.mean_distance));
        ui.label(format!("Mean Speed: {:.3}", self.stats.mean_speed));

        let pointer = self.pointer.state();
        ui.label(format!(
            "Pointer: ({:.0}, {:.0}){}",
            pointer.x,
            pointer.y,
            if self.pointer.is_moving() { " moving" } else { "" }
        ));

        if ui.button("Respawn").clicked() {
            self.field.resize(viewport);
        }
    }
}

impl eframe::App for ParticleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let current_time = Instant::now();
        let frame_time = current_time.duration_since(self.last_frame_time);
        self.last_frame_time = current_time;

        egui::SidePanel::left("Control Panel").show(ctx, |ui| {
            self.render_ui_panel(ui, frame_time.as_secs_f32());
            ui.allocate_space(ui.available_size());
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(BACKGROUND))
            .show(ctx, |ui| {
                let (rect, _response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

                let viewport = Viewport::new(rect.width(), rect.height());
                if self.bounds.observe(viewport) {
                    self.field.resize(viewport);
                    self.pointer.recenter(viewport);
                }

                let moved_to = ctx.input(|i| {
                    i.pointer
                        .hover_pos()
                        .filter(|_| i.pointer.delta() != egui::Vec2::ZERO)
                });
                if let Some(pos) = moved_to {
                    let local = pos - rect.min;
                    self.pointer.move_to(local.x, local.y);
                }

                let start_update = Instant::now();
                let pointer = self.pointer.state();
                for _ in 0..self.clock.advance(frame_time) {
                    self.field.tick(pointer, viewport);
                }
                self.stats = self.field.stats(pointer);
                self.last_update = start_update.elapsed();

                self.renderer
                    .paint(&ui.painter_at(rect), rect.min, self.field.sprites());
            });

        ctx.request_repaint();
    }
}

fn main() -> Result<()> {
    let _logger = pointer_particles::logging::setup()?;
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SimulationConfig::load_or_default(path),
        None => SimulationConfig::default(),
    };
    let viewport = Viewport::new(INITIAL_WINDOW_SIZE.x, INITIAL_WINDOW_SIZE.y);
    let field = ParticleField::create(config, viewport).context("Invalid particle configuration")?;
    log::info!("Starting with {} particles at {} ticks per second", field.len(), args.rate);

    eframe::run_native(
        "Pointer Particles",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            initial_window_size: Some(INITIAL_WINDOW_SIZE),
            ..Default::default()
        },
        Box::new(move |_cc| Box::new(ParticleApp::new(field, args.rate))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}
