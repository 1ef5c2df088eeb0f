//! Arcade cabinet frontend: a full-screen game launcher and the editor that
//! maintains its catalog.

pub mod catalog;
pub mod config;
pub mod editor;
pub mod launcher;
pub mod ui;

use std::path::PathBuf;

/// Catalog path given as the first command-line argument, if any
pub fn catalog_arg() -> Option<PathBuf> {
    std::env::args_os().nth(1).map(PathBuf::from)
}

/// Log at info level unless `RUST_LOG` says otherwise
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();
}
