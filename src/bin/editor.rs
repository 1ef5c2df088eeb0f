use anyhow::Result;
use eframe::{egui, NativeOptions};
use log::info;

use arcade_frontend::catalog::CatalogStore;
use arcade_frontend::config::Config;
use arcade_frontend::editor::CatalogEditorApp;

fn main() -> Result<()> {
    arcade_frontend::init_logging();

    info!("Starting catalog editor");

    let config = Config::load_or_default().with_catalog_override(arcade_frontend::catalog_arg());
    let store = CatalogStore::new(&config.catalog.path);

    let options = NativeOptions {
        initial_window_size: Some(egui::vec2(config.editor.window_width, config.editor.window_height)),
        ..Default::default()
    };

    eframe::run_native(
        "Arcade Catalog Editor",
        options,
        Box::new(move |cc| Box::new(CatalogEditorApp::new(cc, store))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run editor: {}", e))
}
