use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;

use inversion_dashboard::app::DashboardApp;
use inversion_dashboard::config::Config;
use inversion_dashboard::data::loader::load_file;
use inversion_dashboard::export::export_json;
use inversion_dashboard::state::AppState;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    let selection = config.initial_selection();

    let table = load_file(&config.data)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data.display()))
        .with_context(|| format!("loading {}", config.data.display()))?;

    if let Some(path) = &config.export {
        export_json(&table, &selection, path)?;
        return Ok(());
    }

    let state = AppState::new(Arc::new(table), selection);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dashboard de Inversión Pública del Perú",
        options,
        Box::new(|_cc| Ok(Box::new(DashboardApp::new(state)))),
    )
    .map_err(|e| anyhow!("UI error: {e}"))
}
