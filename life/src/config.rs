// config.rs - Runtime configuration for the simulation and its renderers

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{LifeError, Result};
use crate::grid::GRID_SIZE;

// Milliseconds between generations when running
pub const TICK_SPEED_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifeConfig {
    /// Width and height of the board.
    pub size: usize,
    /// Delay between scheduler ticks.
    pub tick_interval_ms: u64,
    /// Pixel size of a cell (renderer only).
    pub cell_size: f32,
    /// Pixel border around each cell (renderer only).
    pub cell_border: f32,
    /// Show neighbor counts instead of alive flags where the renderer supports it.
    pub show_neighbors: bool,
    /// Pause when a generation leaves the board unchanged. Off by default,
    /// which keeps the simulation running on a still life.
    pub pause_when_stable: bool,
    /// Fixed RNG seed for reproducible resets.
    pub seed: Option<u64>,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            size: GRID_SIZE,
            tick_interval_ms: TICK_SPEED_MS,
            cell_size: 15.0,
            cell_border: 1.0,
            show_neighbors: false,
            pause_when_stable: false,
            seed: None,
        }
    }
}

impl LifeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: LifeConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from the path if one is given, otherwise use defaults.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(LifeError::Config("size must be at least 1".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(LifeError::Config("tick_interval_ms must be at least 1".into()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Board width in pixels including the left and right border of every cell.
    pub fn grid_width(&self) -> f32 {
        self.size as f32 * self.cell_size + self.cell_border * self.size as f32 * 2.0
    }
}
