mod app;
mod color;
mod state;
mod ui;

use anyhow::{anyhow, Context, Result};
use app::CourtsideApp;
use eframe::egui;

use courtside::config::Config;
use courtside::data::loader;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();

    let config = Config::load().context("reading configuration")?;
    let mut state = AppState::new(config);

    // A file named at startup must load; otherwise there is nothing to show.
    if let Some(path) = state.config.data_path.clone() {
        let dataset = loader::load_file(&path)
            .with_context(|| format!("loading {}", path.display()))?;
        state
            .set_dataset(dataset, path)
            .context("indexing dataset")?;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Courtside – NBA Player Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(CourtsideApp::new(state)))),
    )
    .map_err(|e| anyhow!("{e}"))
}
