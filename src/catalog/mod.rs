pub mod record;
pub mod store;

pub use record::GameRecord;
pub use store::{CatalogError, CatalogStore};
