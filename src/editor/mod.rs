pub mod app;
pub mod browse;
pub mod state;

pub use app::{CatalogEditorApp, Notice, NoticeLevel};
pub use state::{EditError, EditorState, ImageField, RecordForm};
