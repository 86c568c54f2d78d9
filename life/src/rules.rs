// rules.rs - Conway's rules: neighbor counting and per-cell transitions

use rand::Rng;

use crate::grid::{Cell, Grid};

// Offsets to the 8 adjacent cells as (dx, dy)
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Live cells among the 8 neighbors of (x, y). Cells past the edge count as dead.
pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for &(dx, dy) in &NEIGHBORS {
        let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy)) else {
            continue;
        };
        if grid.is_alive(nx, ny) { count += 1; }
    }
    count
}

pub fn next_state(cell: Cell, neighbors: u8) -> Cell {
    let alive = match (cell.alive, neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    };
    Cell { alive, neighbors }
}

/// Unbiased coin flip, drawn independently for every cell.
pub fn random_alive<R: Rng>(rng: &mut R) -> bool {
    rng.gen_bool(0.5)
}

/// The generation after `grid`, computed entirely from the given snapshot.
pub fn next_generation(grid: &Grid) -> Grid {
    let mut next = grid.clone();
    next.for_each(|xy, cell| next_state(cell, count_neighbors(grid, xy.x, xy.y)));
    next
}
