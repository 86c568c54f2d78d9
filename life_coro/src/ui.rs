// ui.rs - eframe app: controls, board painting and click-to-toggle

use eframe::egui;
use egui::{Align2, Color32, FontId, Rect, Stroke, Vec2};
use life::{LifeConfig, PATTERNS, Scheduler, Simulation};
use log::warn;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::canvas::{CanvasRenderer, Frame};

pub struct LifeApp {
    simulation: Simulation,
    frame: Arc<Mutex<Frame>>,
    show_neighbors: bool,
    live_color: Color32,
    dead_color: Color32,
    selected_pattern: usize,
    // Keeps the tick loop alive for as long as the window is open
    _runtime: Runtime,
}

impl LifeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &LifeConfig, runtime: Runtime) -> Self {
        let (renderer, frame) = CanvasRenderer::new(cc.egui_ctx.clone(), config);
        let simulation = Simulation::new(config, Box::new(renderer));
        runtime.spawn(Scheduler::run(simulation.clone(), config.tick_interval()));

        Self {
            simulation,
            frame,
            show_neighbors: config.show_neighbors,
            live_color: Color32::from_rgb(102, 51, 153),
            dead_color: Color32::from_rgb(40, 40, 40),
            selected_pattern: 0,
            _runtime: runtime,
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, frame: &Frame) {
        ui.horizontal(|ui| {
            let button_text = if frame.is_paused { "▶ Play" } else { "⏸ Pause" };
            if ui.button(button_text).clicked() {
                self.simulation.toggle_pause();
            }

            if ui.button("🎲 Reset").clicked() {
                self.simulation.reset();
            }

            if ui.button("⏭ Generate").clicked() {
                self.simulation.step();
            }

            if ui.button("⏹ Clear").clicked() {
                self.simulation.clear_grid();
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                if let Err(e) = self.simulation.apply_pattern(&PATTERNS[self.selected_pattern]) {
                    warn!("cannot apply pattern: {e}");
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label(format!("Generation: {}", frame.generation));
            ui.separator();
            ui.label(frame.message.as_str());
        });

        ui.horizontal(|ui| {
            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.checkbox(&mut self.show_neighbors, "Neighbors");
        });
    }

    fn board(&self, ui: &mut egui::Ui, frame: &Frame) {
        let layout = frame.layout;
        let start_pos = ui.cursor().min;
        let total_size = Vec2::splat(layout.side().max(0.0));

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        for (idx, &alive) in frame.alive.iter().enumerate() {
            let (col, row) = (idx % layout.size, idx / layout.size);
            let x = start_pos.x + col as f32 * (layout.box_size + layout.spacing);
            let y = start_pos.y + row as f32 * (layout.box_size + layout.spacing);
            let rect = Rect::from_min_size(egui::pos2(x, y), Vec2::splat(layout.box_size));

            let cell_color = if alive { self.live_color } else { self.dead_color };
            painter.rect_filled(rect, 1.0, cell_color);
            painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));

            if self.show_neighbors {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    frame.neighbors[idx].to_string(),
                    FontId::monospace(layout.box_size * 0.6),
                    Color32::from_gray(200),
                );
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((x, y)) = layout.cell_at(pos.x - start_pos.x, pos.y - start_pos.y) {
                    if let Err(e) = self.simulation.toggle_cell(x, y) {
                        warn!("ignoring click: {e}");
                    }
                }
            }
        }
    }
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Copy out so the lock is not held while input calls into the simulation
        let frame = self.frame.lock().clone();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life");

            self.controls(ui, &frame);

            ui.separator();

            self.board(ui, &frame);

            ui.separator();

            let total = frame.alive.len().max(1);
            let live_cells = frame.live_cells();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", frame.alive.len() - live_cells));
                ui.label(format!("Population: {:.1}%", (live_cells as f32 / total as f32) * 100.0));
            });
        });
    }
}
