// lib.rs - Conway's Game of Life core: board, rules, simulation and tick loop

pub mod config;
pub mod error;
pub mod game;
pub mod grid;
pub mod patterns;
pub mod renderer;
pub mod rules;
pub mod scheduler;

pub use config::LifeConfig;
pub use error::{LifeError, Result};
pub use game::{Advance, GameOfLife, LifeState, Simulation};
pub use grid::{Cell, Coords, Grid};
pub use patterns::{PATTERNS, Pattern};
pub use renderer::{NullRenderer, Renderer, TextRenderer};
pub use scheduler::Scheduler;
