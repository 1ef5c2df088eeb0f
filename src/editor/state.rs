use log::{info, warn};
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogStore, GameRecord};

/// Validation failures of the edit form
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Select a game to save or create a new one.")]
    NoSelection,

    #[error("The 'Name' field is required.")]
    EmptyName,
}

/// Form fields that accept an image path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Cover,
    Background,
}

impl ImageField {
    /// Title of the file dialog for this field
    pub fn dialog_title(self) -> &'static str {
        match self {
            ImageField::Cover => "Select the cover image",
            ImageField::Background => "Select the background image",
        }
    }
}

/// Contents of the edit form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub name: String,
    pub command: String,
    pub cover_image: String,
    pub background_image: String,
    pub description: String,
}

impl RecordForm {
    /// Fill the form from a record
    pub fn from_record(record: &GameRecord) -> Self {
        Self {
            name: record.name.clone(),
            command: record.command.clone(),
            cover_image: record.cover_image.clone(),
            background_image: record.background_image.clone(),
            description: record.description.clone(),
        }
    }

    /// Build a record from the form, validating required fields
    pub fn to_record(&self) -> Result<GameRecord, EditError> {
        if self.name.trim().is_empty() {
            return Err(EditError::EmptyName);
        }

        Ok(GameRecord {
            name: self.name.clone(),
            command: self.command.clone(),
            cover_image: self.cover_image.clone(),
            background_image: self.background_image.clone(),
            description: self.description.trim().to_string(),
        })
    }

    /// Mutable access to an image path field
    pub fn image_field_mut(&mut self, field: ImageField) -> &mut String {
        match field {
            ImageField::Cover => &mut self.cover_image,
            ImageField::Background => &mut self.background_image,
        }
    }
}

/// In-memory catalog being edited plus the form bound to the selection
pub struct EditorState {
    store: CatalogStore,
    records: Vec<GameRecord>,
    selected: Option<usize>,
    /// Form contents, edited directly by the UI
    pub form: RecordForm,
    pending_removal: Option<usize>,
    focus_name: bool,
}

impl EditorState {
    /// Load the catalog from `store`
    pub fn new(store: CatalogStore) -> Self {
        let records = store.load();
        Self::with_records(store, records)
    }

    /// Start from an already loaded catalog
    pub fn with_records(store: CatalogStore, records: Vec<GameRecord>) -> Self {
        Self {
            store,
            records,
            selected: None,
            form: RecordForm::default(),
            pending_removal: None,
            focus_name: false,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    /// Whether a removal is waiting for confirmation
    pub fn removal_pending(&self) -> bool {
        self.pending_removal.is_some()
    }

    /// Returns true once after `new_record`, so the UI can focus the name field
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_name)
    }

    /// Select a record and load it into the form, discarding unsaved edits
    pub fn select(&mut self, index: usize) {
        if let Some(record) = self.records.get(index) {
            self.selected = Some(index);
            self.form = RecordForm::from_record(record);
        }
    }

    /// Append a placeholder record and select it
    pub fn new_record(&mut self) {
        self.records.push(GameRecord::placeholder());
        self.select(self.records.len() - 1);
        self.focus_name = true;
    }

    /// Write the form back into the selected record; nothing touches the disk
    pub fn save_current(&mut self) -> Result<&GameRecord, EditError> {
        let index = self
            .selected
            .filter(|&i| i < self.records.len())
            .ok_or(EditError::NoSelection)?;
        let record = self.form.to_record()?;

        self.records[index] = record;
        Ok(&self.records[index])
    }

    /// Ask to remove the selected record; it is only deleted once confirmed
    pub fn request_removal(&mut self) -> Result<(), EditError> {
        let index = self
            .selected
            .filter(|&i| i < self.records.len())
            .ok_or(EditError::NoSelection)?;
        self.pending_removal = Some(index);
        Ok(())
    }

    /// Delete the record awaiting confirmation and clear the form
    pub fn confirm_removal(&mut self) -> Option<GameRecord> {
        let index = self.pending_removal.take()?;
        if index >= self.records.len() {
            return None;
        }

        let removed = self.records.remove(index);
        self.selected = None;
        self.form = RecordForm::default();
        info!("Removed '{}' from the catalog", removed.display_name());
        Some(removed)
    }

    /// Drop a pending removal
    pub fn cancel_removal(&mut self) {
        self.pending_removal = None;
    }

    /// Write every record to the catalog file
    pub fn persist(&self) -> Result<(), CatalogError> {
        self.store.save(&self.records).map_err(|e| {
            warn!("{}", e);
            e
        })
    }

    /// Store a picked file in one of the image fields
    pub fn set_image_path(&mut self, field: ImageField, path: String) {
        *self.form.image_field_mut(field) = path;
    }
}
