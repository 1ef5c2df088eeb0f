use serde::{Deserialize, Serialize};

/// Name shown for records saved without one
pub const UNTITLED_NAME: &str = "Untitled game";

/// Name given to records created by the editor
pub const NEW_RECORD_NAME: &str = "New game";

/// Name of the stand-in record shown when the catalog is empty
pub const NO_GAMES_NAME: &str = "No games configured";

/// One game in the catalog
///
/// Records have no identity beyond their position in the catalog, so any
/// cached index goes stale when the list is reordered or shrunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GameRecord {
    /// Display name
    pub name: String,
    /// Program and arguments, separated by whitespace
    pub command: String,
    /// Cover image path
    pub cover_image: String,
    /// Background image path
    pub background_image: String,
    /// Free-form description
    pub description: String,
}

impl GameRecord {
    /// Create a record with only a name and command
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            ..Default::default()
        }
    }

    /// Record appended by the editor's "New" action
    pub fn placeholder() -> Self {
        Self::new(NEW_RECORD_NAME, "")
    }

    /// Record the launcher shows when there is nothing to launch
    pub fn no_games() -> Self {
        Self {
            name: NO_GAMES_NAME.to_string(),
            description: "Add games with the catalog editor.".to_string(),
            ..Default::default()
        }
    }

    /// Name to show in lists
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNTITLED_NAME
        } else {
            &self.name
        }
    }

    /// Whether the record has something to run
    pub fn is_launchable(&self) -> bool {
        !self.command.trim().is_empty()
    }

    /// Cover path, if one is set
    pub fn cover_path(&self) -> Option<&str> {
        non_empty(&self.cover_image)
    }

    /// Background path, if one is set
    pub fn background_path(&self) -> Option<&str> {
        non_empty(&self.background_image)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_deserialize_as_empty() {
        let record: GameRecord =
            serde_json::from_str(r#"{"name":"Pac-Man","command":"pacman.sh","cover_image":"covers/pm.png"}"#)
                .unwrap();
        assert_eq!(record.name, "Pac-Man");
        assert_eq!(record.cover_path(), Some("covers/pm.png"));
        assert_eq!(record.background_path(), None);
        assert!(record.description.is_empty());
    }

    #[test]
    fn nameless_record_has_display_fallback() {
        let record = GameRecord::new("  ", "run");
        assert_eq!(record.display_name(), UNTITLED_NAME);
    }

    #[test]
    fn no_games_record_cannot_launch() {
        assert!(!GameRecord::no_games().is_launchable());
        assert!(GameRecord::new("Tetris", "tetris.sh").is_launchable());
    }
}
