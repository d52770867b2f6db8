//! Gallery session shared with a multi-threaded host

use crate::command::GalleryIntent;
use crate::config::GalleryConfig;
use crate::error::Result;
use crate::navigation::{GalleryNavigator, GallerySnapshot};
use crate::PhotoCatalog;
use parking_lot::Mutex;
use std::sync::Arc;

/// One viewing session.
///
/// The whole navigator sits behind a single lock that is held for the
/// duration of a transition, so a `next` racing a category change never
/// sees a half-updated filtered list.
pub struct GallerySession {
    navigator: Mutex<GalleryNavigator>,
}

impl GallerySession {
    /// Start a session on the configured default category
    pub fn new(catalog: Arc<PhotoCatalog>, config: &GalleryConfig) -> Result<Self> {
        let mut navigator = GalleryNavigator::new(catalog).with_policy(config.category_change);
        navigator.select_category(&config.default_category)?;

        tracing::debug!(category = %config.default_category, "Gallery session started");
        Ok(Self {
            navigator: Mutex::new(navigator),
        })
    }

    /// Apply an intent and report the resulting view
    pub fn apply(&self, intent: &GalleryIntent) -> Result<GallerySnapshot> {
        let mut navigator = self.navigator.lock();
        navigator.apply(intent)?;
        Ok(navigator.snapshot())
    }

    pub fn snapshot(&self) -> GallerySnapshot {
        self.navigator.lock().snapshot()
    }

    /// Run `f` against the navigator while holding the session lock
    pub fn with_navigator<R>(&self, f: impl FnOnce(&GalleryNavigator) -> R) -> R {
        let navigator = self.navigator.lock();
        f(&*navigator)
    }
}
