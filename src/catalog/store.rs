use log::{info, warn};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::record::GameRecord;

/// Catalog file errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse catalog {path}: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },

    #[error("failed to serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write catalog {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Flat JSON file holding the whole catalog
///
/// Every save replaces the file wholesale. There is no locking, so the
/// launcher and editor must not work on the same file at the same time.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the catalog file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the catalog, reporting why it could not be read
    pub fn try_load(&self) -> Result<Vec<GameRecord>, CatalogError> {
        let json_str = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&json_str).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Read the catalog; a missing or malformed file is an empty catalog
    pub fn load(&self) -> Vec<GameRecord> {
        match self.try_load() {
            Ok(records) => {
                info!("Loaded {} games from {}", records.len(), self.path.display());
                records
            }
            Err(CatalogError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("Catalog {} not found, starting empty", self.path.display());
                Vec::new()
            }
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// Read the catalog for display, never returning an empty list
    pub fn load_for_launcher(&self) -> Vec<GameRecord> {
        let records = self.load();
        if records.is_empty() {
            vec![GameRecord::no_games()]
        } else {
            records
        }
    }

    /// Overwrite the catalog file with `records`
    pub fn save(&self, records: &[GameRecord]) -> Result<(), CatalogError> {
        let json_str = serde_json::to_string_pretty(records).map_err(CatalogError::Serialize)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| CatalogError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        fs::write(&self.path, json_str).map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })?;

        info!("Saved {} games to {}", records.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::NO_GAMES_NAME;

    fn sample() -> Vec<GameRecord> {
        vec![
            GameRecord {
                name: "Pac-Man".into(),
                command: "mame pacman".into(),
                cover_image: "covers/pm.png".into(),
                background_image: "backgrounds/pm.jpg".into(),
                description: "Eat the dots.".into(),
            },
            GameRecord::new("Tetris", "tetris.sh"),
            GameRecord::new("Tetris", ""),
        ]
    }

    #[test]
    fn save_then_load_returns_same_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("games.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load(), sample());
    }

    #[test]
    fn empty_catalog_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("games.json"));

        store.save(&[]).unwrap();
        assert_eq!(store.try_load().unwrap(), Vec::new());
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("absent.json"));

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(CatalogError::Read { .. })));
    }

    #[test]
    fn malformed_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        fs::write(&path, "[{\"name\": \"Pac-Man\",").unwrap();
        let store = CatalogStore::new(&path);

        assert!(store.load().is_empty());
        assert!(matches!(store.try_load(), Err(CatalogError::Parse { .. })));
    }

    #[test]
    fn launcher_gets_placeholder_for_missing_or_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("games.json"));

        let records = store.load_for_launcher();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, NO_GAMES_NAME);

        store.save(&[]).unwrap();
        assert_eq!(store.load_for_launcher(), vec![GameRecord::no_games()]);
    }

    #[test]
    fn saved_file_is_indented_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("games.json");
        let store = CatalogStore::new(&path);

        store.save(&[GameRecord::new("Ação", "acao.sh")]).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("Ação"));
        assert!(written.contains("\n  {"));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("data").join("games.json"));

        store.save(&sample()).unwrap();
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn save_into_unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory standing where the file should be
        let path = dir.path().join("games.json");
        fs::create_dir(&path).unwrap();
        let store = CatalogStore::new(&path);

        assert!(matches!(store.save(&sample()), Err(CatalogError::Write { .. })));
    }
}
