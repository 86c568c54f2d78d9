// main.rs - Conway's Game of Life in an egui window, ticked by a tokio task

use eframe::egui;
use life::LifeConfig;

mod canvas;  // Renderer that feeds the window
mod ui;      // Controls and board painting

use ui::LifeApp;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LifeConfig::load_or_default(std::env::args().nth(1))?;
    let runtime = tokio::runtime::Runtime::new()?;

    let side = config.grid_width();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([side.max(640.0) + 40.0, side + 220.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |cc| Box::new(LifeApp::new(cc, &config, runtime))),
    )?;
    Ok(())
}
