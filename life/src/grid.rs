// grid.rs - Grid types for Conway's Game of Life

use crate::error::{LifeError, Result};

// Default board size (45x45 playing area, hard edges)
pub const GRID_SIZE: usize = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub alive: bool,
    pub neighbors: u8,  // Derived, recomputed every generation
}

impl Cell {
    pub const DEAD: Cell = Cell { alive: false, neighbors: 0 };
    pub const ALIVE: Cell = Cell { alive: true, neighbors: 0 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coords {
    pub x: usize,  // column
    pub y: usize,  // row
}

impl Coords {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Fixed-size square board stored row-major.
///
/// The size is set at construction and never changes. Every coordinate
/// access is bounds-checked; nothing wraps around the edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::DEAD; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x < self.size && y < self.size {
            Ok(y * self.size + x)
        } else {
            Err(LifeError::OutOfRange { x, y, size: self.size })
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Result<Cell> {
        let idx = self.index(x, y)?;
        Ok(self.cells[idx])
    }

    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        let idx = self.index(x, y)?;
        self.cells[idx] = cell;
        Ok(())
    }

    /// Out-of-range coordinates read as dead.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.index(x, y).map(|idx| self.cells[idx].alive).unwrap_or(false)
    }

    /// Visit every cell in row-major order, replacing it with `f`'s return value.
    pub fn for_each<F>(&mut self, mut f: F)
    where
        F: FnMut(Coords, Cell) -> Cell,
    {
        let size = self.size;
        for (idx, cell) in self.cells.iter_mut().enumerate() {
            *cell = f(Coords::new(idx % size, idx / size), *cell);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coords, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, &cell)| (Coords::new(idx % self.size, idx / self.size), cell))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.size.max(1))
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }

    /// Compares alive flags only; neighbor counts are derived and ignored.
    pub fn same_population(&self, other: &Grid) -> bool {
        self.size == other.size
            && self.cells.iter().zip(&other.cells).all(|(a, b)| a.alive == b.alive)
    }

    /// Flatten the board into a string of `1`/`0`, one line per row if `pretty`.
    pub fn to_binary_string(&self, pretty: bool) -> String {
        let rows: Vec<String> = self
            .rows()
            .map(|row| row.iter().map(|c| if c.alive { '1' } else { '0' }).collect())
            .collect();
        rows.join(if pretty { "\n" } else { "" })
    }
}
