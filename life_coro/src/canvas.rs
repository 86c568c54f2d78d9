// canvas.rs - Renderer that paints the board in the egui window

use std::sync::Arc;

use egui::Context;
use life::{LifeConfig, LifeState, Renderer};
use parking_lot::Mutex;

/// Cell geometry, rebuilt on every reset to match the board size.
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    pub size: usize,
    pub box_size: f32,
    pub spacing: f32,
}

impl Layout {
    pub fn side(&self) -> f32 {
        (self.box_size + self.spacing) * self.size as f32 - self.spacing
    }

    /// Map a point relative to the board origin back to (x, y).
    pub fn cell_at(&self, dx: f32, dy: f32) -> Option<(usize, usize)> {
        let pitch = self.box_size + self.spacing;
        if dx < 0.0 || dy < 0.0 || pitch <= 0.0 {
            return None;
        }
        let (x, y) = ((dx / pitch) as usize, (dy / pitch) as usize);
        (x < self.size && y < self.size).then_some((x, y))
    }
}

/// Latest state copied out of the simulation for the UI thread to draw.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub layout: Layout,
    pub alive: Vec<bool>,
    pub neighbors: Vec<u8>,
    pub generation: u64,
    pub is_paused: bool,
    pub message: String,
}

impl Frame {
    pub fn live_cells(&self) -> usize {
        self.alive.iter().filter(|&&a| a).count()
    }
}

/// Pushes simulation state into a shared [`Frame`] and asks egui to repaint.
pub struct CanvasRenderer {
    frame: Arc<Mutex<Frame>>,
    ctx: Context,
    box_size: f32,
    spacing: f32,
}

impl CanvasRenderer {
    pub fn new(ctx: Context, config: &LifeConfig) -> (Self, Arc<Mutex<Frame>>) {
        let frame = Arc::new(Mutex::new(Frame::default()));
        let renderer = Self {
            frame: frame.clone(),
            ctx,
            box_size: config.cell_size,
            spacing: config.cell_border,
        };
        (renderer, frame)
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &LifeState) {
        {
            let mut frame = self.frame.lock();
            frame.alive.clear();
            frame.neighbors.clear();
            for (_, cell) in state.grid.iter() {
                frame.alive.push(cell.alive);
                frame.neighbors.push(cell.neighbors);
            }
            frame.generation = state.generation;
            frame.is_paused = state.is_paused;
            frame.message.clone_from(&state.message);
        }
        self.ctx.request_repaint();
    }

    fn reset(&mut self, state: &LifeState) {
        let size = state.grid.size();
        let mut frame = self.frame.lock();
        frame.layout = Layout {
            size,
            box_size: self.box_size,
            spacing: self.spacing,
        };
        frame.alive = Vec::with_capacity(size * size);
        frame.neighbors = Vec::with_capacity(size * size);
    }
}
