//! Folio Core Domain Logic
//!
//! This crate contains:
//! - Photo and project records
//! - The validated photo catalog
//! - Gallery filtering and lightbox navigation
//! - Viewer intents and key bindings
//! - Configuration
//! - Error types

pub mod catalog;
pub mod command;
pub mod config;
pub mod error;
pub mod navigation;
pub mod photo;
pub mod state;

pub use catalog::{CatalogFile, PhotoCatalog, ALL_CATEGORY};
pub use command::{default_keybindings, Command, CommandId, GalleryIntent, KeyBindings};
pub use config::{AppConfig, CategoryChangePolicy, GalleryConfig, GeneralConfig, Theme};
pub use error::{GalleryError, Result};
pub use navigation::{GalleryNavigator, GallerySnapshot, GalleryState, ViewMode};
pub use photo::{PhotoRecord, Project};
pub use state::GallerySession;

use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Process-wide catalog, installed once before any gallery session starts
static CATALOG: OnceCell<Arc<PhotoCatalog>> = OnceCell::new();

/// Install the catalog
pub fn init(catalog: PhotoCatalog) -> Result<Arc<PhotoCatalog>> {
    let catalog = Arc::new(catalog);
    CATALOG
        .set(catalog.clone())
        .map_err(|_| GalleryError::Init("catalog already initialized".into()))?;
    Ok(catalog)
}

/// Get the installed catalog
pub fn catalog() -> Option<Arc<PhotoCatalog>> {
    CATALOG.get().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_once() {
        let first = init(PhotoCatalog::sample().unwrap()).unwrap();
        assert!(Arc::ptr_eq(&first, &catalog().unwrap()));

        let again = init(PhotoCatalog::new(vec![], vec![]).unwrap());
        assert!(matches!(again, Err(GalleryError::Init(_))));
        assert_eq!(catalog().unwrap().all_photos().len(), first.all_photos().len());
    }
}
