// scheduler.rs - Tick loop that advances the simulation while it is running

use std::time::Duration;

use log::trace;
use tokio::task::JoinHandle;

use crate::game::Simulation;

/// Drives a [`Simulation`] on a fixed interval.
pub struct Scheduler;

impl Scheduler {
    /// Spawn the tick loop on the current tokio runtime.
    ///
    /// Every `interval` the loop checks the pause flag and, if running,
    /// spawns one generation step without waiting for it. The loop runs
    /// until the runtime shuts down or the handle is aborted.
    pub fn spawn(simulation: Simulation, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(Self::run(simulation, interval))
    }

    /// The tick loop itself, for callers that want to drive it directly.
    pub async fn run(simulation: Simulation, interval: Duration) {
        let mut tick: u64 = 0;
        loop {
            tokio::time::sleep(interval).await;
            tick += 1;
            if simulation.is_paused() {
                continue;
            }
            trace!("tick {tick}: advancing");
            let simulation = simulation.clone();
            tokio::spawn(async move {
                simulation.advance();
            });
        }
    }
}
