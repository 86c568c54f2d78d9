// renderer.rs - Display capability consumed by the simulation

use std::io::Write;

use log::warn;

use crate::game::LifeState;

/// Something the Game of Life renders to.
///
/// Both methods are called while the simulation lock is held, so an
/// implementation must not call back into the [`Simulation`](crate::Simulation)
/// and should return promptly: a slow renderer stalls every other operation.
pub trait Renderer: Send {
    /// Redraw to reflect the current grid, generation, message and pause flag.
    fn render(&mut self, state: &LifeState);

    /// Rebuild any display structures to match the current grid dimensions.
    fn reset(&mut self, state: &LifeState);
}

/// Renderer that draws nothing. Useful for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &LifeState) {}
    fn reset(&mut self, _state: &LifeState) {}
}

/// Writes the board as rows of text.
///
/// `reset` rebuilds one line buffer per grid row, `render` refreshes them
/// and writes a frame: a generation line, the status message if any, then
/// the rows. Live cells are `#` and dead cells `.`, or the neighbor count
/// when `show_neighbors` is set.
pub struct TextRenderer<W: Write + Send> {
    out: W,
    rows: Vec<String>,
    show_neighbors: bool,
}

impl<W: Write + Send> TextRenderer<W> {
    pub fn new(out: W, show_neighbors: bool) -> Self {
        Self { out, rows: Vec::new(), show_neighbors }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn update_rows(&mut self, state: &LifeState) {
        for (line, cells) in self.rows.iter_mut().zip(state.grid.rows()) {
            line.clear();
            line.extend(cells.iter().map(|cell| match (self.show_neighbors, cell.alive) {
                (true, _)      => char::from(b'0' + cell.neighbors),
                (false, true)  => '#',
                (false, false) => '.',
            }));
        }
    }

    fn write_frame(&mut self, state: &LifeState) -> std::io::Result<()> {
        let play = if state.is_paused { "Play" } else { "Pause" };
        writeln!(self.out, "Generation: {} [{}]", state.generation, play)?;
        if !state.message.is_empty() {
            writeln!(self.out, "{}", state.message)?;
        }
        for line in &self.rows {
            writeln!(self.out, "{line}")?;
        }
        writeln!(self.out)?;
        self.out.flush()
    }
}

impl<W: Write + Send> Renderer for TextRenderer<W> {
    fn render(&mut self, state: &LifeState) {
        if self.rows.len() != state.grid.size() {
            self.reset(state);
        }
        self.update_rows(state);
        if let Err(e) = self.write_frame(state) {
            warn!("text renderer failed to write frame: {e}");
        }
    }

    fn reset(&mut self, state: &LifeState) {
        let size = state.grid.size();
        self.rows = vec![String::with_capacity(size); size];
    }
}
