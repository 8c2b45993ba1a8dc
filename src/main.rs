//! Census Scatter - interactive demographic scatter chart viewer

use anyhow::Context;
use census_scatter::config::AppConfig;
use census_scatter::gui::ScatterApp;
use eframe::egui;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = AppConfig::discover().context("loading configuration")?;
    if let Some(path) = std::env::args_os().nth(1) {
        config.data_path = PathBuf::from(path);
    }
    info!(data = %config.data_path.display(), "starting Census Scatter");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1320.0, 760.0])
            .with_min_inner_size([800.0, 500.0])
            .with_title("Census Scatter"),
        ..Default::default()
    };

    eframe::run_native(
        "Census Scatter",
        options,
        Box::new(|cc| Ok(Box::new(ScatterApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
