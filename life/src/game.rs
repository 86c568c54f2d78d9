// game.rs - Simulation core: owns the grid and runs generation steps

use std::sync::Arc;

use log::{debug, info};
use parking_lot::Mutex;
use rand::{SeedableRng, rngs::StdRng};

use crate::config::LifeConfig;
use crate::error::Result;
use crate::grid::{Cell, Grid};
use crate::patterns::Pattern;
use crate::renderer::Renderer;
use crate::rules;

pub const MSG_CLEARED: &str = "cleared";
pub const MSG_STABLE: &str = "graph did not change - pausing...";

/// Everything a renderer needs to draw a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeState {
    pub grid: Grid,
    pub generation: u64,
    pub is_paused: bool,
    pub message: String,
}

/// Result of a single generation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The board changed and the generation counter moved to this value.
    Changed { generation: u64 },
    /// The board is a still life; the counter was left alone.
    Stable,
}

/// Conway's Game of Life on a fixed board with a pluggable renderer.
///
/// Every method that touches the board notifies the renderer before it
/// returns. Use [`Simulation`] to share one instance between the scheduler
/// and input handlers.
pub struct GameOfLife {
    state: LifeState,
    renderer: Box<dyn Renderer>,
    rng: StdRng,
    pause_when_stable: bool,
}

impl GameOfLife {
    /// Build a game and run the initial [`reset`](Self::reset).
    pub fn new(config: &LifeConfig, renderer: Box<dyn Renderer>) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut game = Self {
            state: LifeState {
                grid: Grid::new(config.size),
                generation: 0,
                is_paused: true,
                message: String::new(),
            },
            renderer,
            rng,
            pause_when_stable: config.pause_when_stable,
        };
        game.reset();
        game
    }

    pub fn state(&self) -> &LifeState {
        &self.state
    }

    fn render(&mut self) {
        self.renderer.render(&self.state);
    }

    /// Pause, zero the counter and fill the board with independent coin flips.
    pub fn reset(&mut self) {
        self.state.is_paused = true;
        self.state.generation = 0;
        self.state.message.clear();

        self.state.grid.for_each(|_, _| Cell {
            alive: rules::random_alive(&mut self.rng),
            neighbors: 0,
        });
        info!("reset! {} live cells", self.state.grid.live_count());

        self.renderer.reset(&self.state);
        self.render();
    }

    pub fn clear_grid(&mut self) {
        self.state.grid.for_each(|_, _| Cell::DEAD);
        self.state.is_paused = true;
        self.state.generation = 0;
        self.state.message = MSG_CLEARED.to_string();
        info!("cleared");
        self.render();
    }

    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<()> {
        let mut cell = self.state.grid.get(x, y)?;
        cell.alive = !cell.alive;
        self.state.grid.set(x, y, cell)?;
        self.render();
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        self.state.is_paused = !self.state.is_paused;
        debug!("paused: {}", self.state.is_paused);
        self.render();
    }

    /// Clear the board and center `pattern` on it.
    pub fn apply_pattern(&mut self, pattern: &Pattern) -> Result<()> {
        pattern.place(&mut self.state.grid)?;
        self.state.is_paused = true;
        self.state.generation = 0;
        self.state.message = pattern.name.to_string();
        info!("applied pattern {}", pattern.name);
        self.render();
        Ok(())
    }

    /// Advance the whole board by one generation.
    ///
    /// Neighbor counts for every cell are stored before any cell changes,
    /// so the result does not depend on traversal order. A board that comes
    /// out identical to its predecessor is reported as [`Advance::Stable`].
    pub fn advance(&mut self) -> Advance {
        let snapshot = self.state.grid.clone();

        // Pass 1: neighbor counts from the pre-step board
        self.state.grid.for_each(|xy, cell| Cell {
            alive: cell.alive,
            neighbors: rules::count_neighbors(&snapshot, xy.x, xy.y),
        });

        // Pass 2: apply the rules using the stored counts
        self.state.grid.for_each(|_, cell| rules::next_state(cell, cell.neighbors));

        if self.state.grid.same_population(&snapshot) {
            self.state.message = MSG_STABLE.to_string();
            // Keeps running on a still life unless configured otherwise
            self.state.is_paused = self.pause_when_stable;
            info!("generation {}: {}", self.state.generation, MSG_STABLE);
            self.render();
            return Advance::Stable;
        }

        self.state.generation += 1;
        self.state.message.clear();
        debug!(
            "generation {}: {} live cells",
            self.state.generation,
            self.state.grid.live_count()
        );
        self.render();
        Advance::Changed { generation: self.state.generation }
    }
}

/// Shared handle to a [`GameOfLife`] guarded by a single lock.
///
/// Every operation holds the lock for its full duration, including the
/// renderer callbacks, so advances and user edits never interleave.
#[derive(Clone)]
pub struct Simulation {
    inner: Arc<Mutex<GameOfLife>>,
}

impl Simulation {
    pub fn new(config: &LifeConfig, renderer: Box<dyn Renderer>) -> Self {
        Self::from_game(GameOfLife::new(config, renderer))
    }

    pub fn from_game(game: GameOfLife) -> Self {
        Self { inner: Arc::new(Mutex::new(game)) }
    }

    pub fn reset(&self) {
        self.inner.lock().reset();
    }

    pub fn clear_grid(&self) {
        self.inner.lock().clear_grid();
    }

    pub fn toggle_cell(&self, x: usize, y: usize) -> Result<()> {
        self.inner.lock().toggle_cell(x, y)
    }

    pub fn toggle_pause(&self) {
        self.inner.lock().toggle_pause();
    }

    pub fn apply_pattern(&self, pattern: &Pattern) -> Result<()> {
        self.inner.lock().apply_pattern(pattern)
    }

    pub fn advance(&self) -> Advance {
        self.inner.lock().advance()
    }

    /// Single user-requested generation, regardless of the pause flag.
    pub fn step(&self) -> Advance {
        self.advance()
    }

    pub fn is_paused(&self) -> bool {
        self.inner.lock().state.is_paused
    }

    pub fn generation(&self) -> u64 {
        self.inner.lock().state.generation
    }

    pub fn snapshot(&self) -> LifeState {
        self.inner.lock().state.clone()
    }

    /// Run `f` against the current state without cloning it.
    pub fn with_state<T>(&self, f: impl FnOnce(&LifeState) -> T) -> T {
        f(&self.inner.lock().state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LifeError;
    use crate::patterns;
    use proptest::prelude::*;
    use rand::seq::SliceRandom;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts renderer calls.
    #[derive(Clone, Default)]
    pub struct Recorder {
        pub renders: Arc<AtomicUsize>,
        pub resets: Arc<AtomicUsize>,
    }

    impl Recorder {
        pub fn renders(&self) -> usize {
            self.renders.load(Ordering::SeqCst)
        }
        pub fn resets(&self) -> usize {
            self.resets.load(Ordering::SeqCst)
        }
    }

    impl Renderer for Recorder {
        fn render(&mut self, _state: &LifeState) {
            self.renders.fetch_add(1, Ordering::SeqCst);
        }
        fn reset(&mut self, _state: &LifeState) {
            self.resets.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn config(size: usize) -> LifeConfig {
        LifeConfig { size, seed: Some(1), ..LifeConfig::default() }
    }

    fn cleared(size: usize) -> (GameOfLife, Recorder) {
        let recorder = Recorder::default();
        let mut game = GameOfLife::new(&config(size), Box::new(recorder.clone()));
        game.clear_grid();
        (game, recorder)
    }

    fn seed(game: &mut GameOfLife, cells: &[(usize, usize)]) {
        for &(x, y) in cells {
            game.toggle_cell(x, y).unwrap();
        }
    }

    #[test]
    fn construction_resets_and_renders() {
        let recorder = Recorder::default();
        let game = GameOfLife::new(&config(10), Box::new(recorder.clone()));
        let state = game.state();
        assert!(state.is_paused);
        assert_eq!(state.generation, 0);
        assert!(state.message.is_empty());
        assert_eq!(recorder.resets(), 1);
        assert_eq!(recorder.renders(), 1);
    }

    #[test]
    fn reset_is_random_per_cell() {
        let recorder = Recorder::default();
        let mut game = GameOfLife::new(&config(45), Box::new(recorder));
        let live = game.state().grid.live_count();
        assert!((800..1_250).contains(&live), "live = {live}");

        // Cells on the same anti-diagonal must not be correlated
        let grid = &game.state().grid;
        let diagonal: Vec<bool> = (0..45).map(|x| grid.is_alive(x, 44 - x)).collect();
        assert!(diagonal.iter().any(|&a| a) && diagonal.iter().any(|&a| !a));

        game.reset();
        assert_eq!(game.state().generation, 0);
    }

    #[test]
    fn clear_grid_kills_everything_and_pauses() {
        let (mut game, recorder) = cleared(8);
        game.toggle_pause();
        game.clear_grid();
        let state = game.state();
        assert_eq!(state.grid.live_count(), 0);
        assert!(state.is_paused);
        assert_eq!(state.generation, 0);
        assert_eq!(state.message, MSG_CLEARED);
        assert_eq!(recorder.resets(), 1);
    }

    #[test]
    fn toggle_cell_flips_only_that_cell() {
        let (mut game, recorder) = cleared(5);
        let before = recorder.renders();
        game.toggle_cell(3, 1).unwrap();
        assert_eq!(recorder.renders(), before + 1);

        let grid = &game.state().grid;
        for (xy, cell) in grid.iter() {
            assert_eq!(cell.alive, (xy.x, xy.y) == (3, 1));
        }

        game.toggle_cell(3, 1).unwrap();
        assert_eq!(game.state().grid.live_count(), 0);
    }

    #[test]
    fn toggle_cell_out_of_range_mutates_nothing() {
        let (mut game, recorder) = cleared(5);
        seed(&mut game, &[(0, 0)]);
        let before = game.state().clone();
        let renders = recorder.renders();

        let err = game.toggle_cell(5, 0).unwrap_err();
        assert!(matches!(err, LifeError::OutOfRange { x: 5, y: 0, size: 5 }));
        assert!(game.toggle_cell(0, 99).is_err());

        assert_eq!(game.state(), &before);
        assert_eq!(recorder.renders(), renders);
    }

    #[test]
    fn toggle_pause_flips() {
        let (mut game, _) = cleared(3);
        assert!(game.state().is_paused);
        game.toggle_pause();
        assert!(!game.state().is_paused);
        game.toggle_pause();
        assert!(game.state().is_paused);
    }

    #[test]
    fn lone_cell_dies_then_board_is_stable() {
        let (mut game, _) = cleared(5);
        seed(&mut game, &[(2, 2)]);

        assert_eq!(game.advance(), Advance::Changed { generation: 1 });
        assert_eq!(game.state().grid.live_count(), 0);
        assert!(game.state().message.is_empty());

        assert_eq!(game.advance(), Advance::Stable);
        assert_eq!(game.state().generation, 1);
        assert_eq!(game.state().message, MSG_STABLE);
    }

    #[test]
    fn block_is_stable_and_unpauses() {
        // The stable branch sets the pause flag to false, despite its message
        let (mut game, _) = cleared(8);
        seed(&mut game, &[(3, 3), (4, 3), (3, 4), (4, 4)]);
        assert!(game.state().is_paused);

        assert_eq!(game.advance(), Advance::Stable);
        let state = game.state();
        assert_eq!(state.generation, 0);
        assert!(!state.is_paused);
        assert_eq!(state.message, MSG_STABLE);
        assert_eq!(state.grid.live_count(), 4);
    }

    #[test]
    fn pause_when_stable_pauses_instead() {
        let cfg = LifeConfig { pause_when_stable: true, ..config(6) };
        let mut game = GameOfLife::new(&cfg, Box::new(Recorder::default()));
        game.clear_grid();
        game.toggle_pause();
        assert_eq!(game.advance(), Advance::Stable);
        assert!(game.state().is_paused);
    }

    #[test]
    fn advance_keeps_running_state() {
        let (mut game, recorder) = cleared(7);
        game.apply_pattern(patterns::find("Blinker").unwrap()).unwrap();
        game.toggle_pause();

        let renders = recorder.renders();
        for generation in 1..=4 {
            assert_eq!(game.advance(), Advance::Changed { generation });
            assert!(!game.state().is_paused);
        }
        assert_eq!(recorder.renders(), renders + 4);
    }

    #[test]
    fn advance_stores_pre_step_neighbor_counts() {
        let (mut game, _) = cleared(5);
        seed(&mut game, &[(1, 2), (2, 2), (3, 2)]);
        game.advance();
        let grid = &game.state().grid;
        assert_eq!(grid.get(2, 2).unwrap().neighbors, 2);
        assert_eq!(grid.get(2, 1).unwrap().neighbors, 3);
        assert_eq!(grid.get(0, 0).unwrap().neighbors, 0);
    }

    #[test]
    fn cleared_board_stays_dead() {
        let (mut game, _) = cleared(6);
        for _ in 0..5 {
            assert_eq!(game.advance(), Advance::Stable);
            assert_eq!(game.state().grid.live_count(), 0);
            assert_eq!(game.state().generation, 0);
        }
    }

    #[test]
    fn reset_then_many_advances_is_monotonic() {
        let recorder = Recorder::default();
        let mut game = GameOfLife::new(&config(20), Box::new(recorder));
        let mut last = 0;
        for _ in 0..200 {
            game.advance();
            let generation = game.state().generation;
            assert!(generation >= last);
            assert!(generation <= last + 1);
            last = generation;
        }
        game.reset();
        assert_eq!(game.state().generation, 0);
    }

    #[test]
    fn apply_pattern_rejects_oversized() {
        let (mut game, _) = cleared(5);
        seed(&mut game, &[(1, 1)]);
        let err = game.apply_pattern(patterns::find("Pulsar").unwrap()).unwrap_err();
        assert!(matches!(err, LifeError::OutOfRange { .. }));
        assert!(game.state().grid.is_alive(1, 1));
    }

    #[test]
    fn simulation_handle_shares_state() {
        let sim = Simulation::new(&config(6), Box::new(Recorder::default()));
        let other = sim.clone();
        sim.clear_grid();
        other.toggle_cell(1, 1).unwrap();
        assert!(sim.snapshot().grid.is_alive(1, 1));
        assert!(sim.is_paused());
        other.toggle_pause();
        assert!(!sim.is_paused());
        assert_eq!(sim.step(), Advance::Changed { generation: 1 });
        assert_eq!(other.generation(), 1);
        assert_eq!(sim.with_state(|s| s.grid.live_count()), 0);
    }

    #[test]
    fn concurrent_edits_and_advances_do_not_tear() {
        let sim = Simulation::new(&config(30), Box::new(crate::renderer::NullRenderer));
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let sim = sim.clone();
                std::thread::spawn(move || {
                    for n in 0..50 {
                        if i % 2 == 0 {
                            sim.advance();
                        } else {
                            sim.toggle_cell(n % 30, (n * 7) % 30).unwrap();
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert!(sim.generation() <= 100);
    }

    proptest! {
        #[test]
        fn advance_is_traversal_order_independent(
            cells in proptest::collection::vec(any::<bool>(), 64),
            order_seed in any::<u64>(),
        ) {
            let (mut game, _) = cleared(8);
            for (i, &alive) in cells.iter().enumerate() {
                if alive {
                    game.toggle_cell(i % 8, i / 8).unwrap();
                }
            }
            let before = game.state().grid.clone();

            // Same rules applied in a shuffled order against the snapshot
            let mut order: Vec<usize> = (0..64).collect();
            order.shuffle(&mut StdRng::seed_from_u64(order_seed));
            let mut shuffled = before.clone();
            for i in order {
                let (x, y) = (i % 8, i / 8);
                let n = rules::count_neighbors(&before, x, y);
                let cell = before.get(x, y).unwrap();
                shuffled.set(x, y, rules::next_state(cell, n)).unwrap();
            }

            game.advance();
            prop_assert_eq!(&game.state().grid, &shuffled);
        }
    }
}
