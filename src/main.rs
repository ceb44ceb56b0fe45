mod app;
mod chart;
mod color;
mod data;
mod pipeline;
mod state;
mod ui;

use std::path::Path;

use app::TitanicDashApp;
use eframe::egui;

/// The dataset ships next to the binary and is loaded once per process.
const DATA_PATH: &str = "titanic.csv";

fn main() -> eframe::Result {
    env_logger::init();

    // Load failure is fatal: the file is static and local, nothing to retry.
    let table = match data::loader::load_csv(Path::new(DATA_PATH)) {
        Ok(table) => {
            log::info!("loaded {} passengers from {DATA_PATH}", table.len());
            table
        }
        Err(e) => {
            log::error!("failed to load {DATA_PATH}: {e}");
            eprintln!("titanic-dash: failed to load {DATA_PATH}: {e}");
            eprintln!("hint: run `cargo run --bin generate_sample` to create sample data");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(TitanicDashApp::new(table)))),
    )
}
