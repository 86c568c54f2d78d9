// main.rs - Headless Game of Life: prints each generation to stdout

use std::io;

use life::{LifeConfig, LifeError, Scheduler, Simulation, TextRenderer, patterns};
use log::info;

#[tokio::main]
async fn main() -> Result<(), LifeError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = LifeConfig::load_or_default(args.next())?;

    let renderer = TextRenderer::new(io::stdout(), config.show_neighbors);
    let simulation = Simulation::new(&config, Box::new(renderer));

    // Optional second argument picks a named pattern instead of the random board
    if let Some(name) = args.next() {
        match patterns::find(&name) {
            Some(pattern) => simulation.apply_pattern(pattern)?,
            None => info!("unknown pattern {name:?}, keeping random board"),
        }
    }

    simulation.toggle_pause();
    info!(
        "running {0}x{0} board every {1:?}",
        config.size,
        config.tick_interval()
    );

    // Runs until the process is interrupted
    Scheduler::run(simulation, config.tick_interval()).await;
    Ok(())
}
