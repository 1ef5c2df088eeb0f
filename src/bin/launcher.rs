use anyhow::Result;
use eframe::{egui, NativeOptions};
use log::info;

use arcade_frontend::catalog::CatalogStore;
use arcade_frontend::config::Config;
use arcade_frontend::launcher::LauncherApp;

fn main() -> Result<()> {
    arcade_frontend::init_logging();

    info!("Starting arcade launcher");

    let config = Config::load_or_default().with_catalog_override(arcade_frontend::catalog_arg());
    let records = CatalogStore::new(&config.catalog.path).load_for_launcher();
    info!("{} entries in the carousel", records.len());

    let launcher_config = config.launcher;
    let options = NativeOptions {
        initial_window_size: Some(egui::vec2(launcher_config.window_width, launcher_config.window_height)),
        fullscreen: launcher_config.fullscreen,
        ..Default::default()
    };

    eframe::run_native(
        "Arcade Launcher",
        options,
        Box::new(move |cc| Box::new(LauncherApp::new(cc, launcher_config, records))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run launcher: {}", e))
}
