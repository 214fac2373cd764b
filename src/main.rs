mod app;
mod chart;
mod color;
mod config;
mod data;
mod state;
mod ui;

use std::path::Path;

use anyhow::Context;
use app::SurveyDashApp;
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("loading dashboard settings")?;

    // The dashboard has nothing to show without data: fail before any window opens.
    let mut state = AppState::new(config);
    if let Err(e) = state.load_configured() {
        log::error!("Startup load failed: {e}");
        return Err(e).with_context(|| {
            format!("loading {}", state.config.source_path.display())
        });
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(state.config.window_size)
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    let title = state.config.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|_cc| Ok(Box::new(SurveyDashApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running the dashboard window: {e}"))
}
