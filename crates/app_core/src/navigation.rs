//! Gallery filter and lightbox navigation
//!
//! The gallery is a two-state machine: `Browsing` a category's grid, or
//! `Viewing` one photo of that grid in the lightbox. [`GalleryState::transition`]
//! is a pure function of (state, intent); [`GalleryNavigator`] owns one state
//! per viewing session and commits a transition only when it succeeds.

use crate::catalog::{PhotoCatalog, ALL_CATEGORY};
use crate::command::GalleryIntent;
use crate::config::CategoryChangePolicy;
use crate::error::{GalleryError, Result};
use crate::photo::PhotoRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Grid or lightbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Browsing,
    Viewing { index: usize },
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Browsing => f.write_str("browsing"),
            ViewMode::Viewing { .. } => f.write_str("viewing a photo"),
        }
    }
}

/// State of one gallery view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryState {
    category: String,
    /// Catalog positions of the photos shown for `category`, in catalog order
    filtered: Vec<usize>,
    mode: ViewMode,
}

impl GalleryState {
    /// Fresh state: browsing "All"
    pub fn new(catalog: &PhotoCatalog) -> Self {
        Self {
            category: ALL_CATEGORY.to_string(),
            filtered: (0..catalog.all_photos().len()).collect(),
            mode: ViewMode::Browsing,
        }
    }

    /// Fresh state browsing `category`
    pub fn with_category(catalog: &PhotoCatalog, category: &str) -> Result<Self> {
        Ok(Self {
            category: category.to_string(),
            filtered: catalog.filter_indices(category)?,
            mode: ViewMode::Browsing,
        })
    }

    pub fn selected_category(&self) -> &str {
        &self.category
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_viewing(&self) -> bool {
        matches!(self.mode, ViewMode::Viewing { .. })
    }

    /// Offset of the open photo in the filtered list
    pub fn current_index(&self) -> Option<usize> {
        match self.mode {
            ViewMode::Viewing { index } => Some(index),
            ViewMode::Browsing => None,
        }
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered.len()
    }

    pub fn filtered_photos<'a>(&self, catalog: &'a PhotoCatalog) -> Vec<&'a PhotoRecord> {
        self.filtered.iter().filter_map(|&i| catalog.photo_at(i)).collect()
    }

    pub fn open_photo<'a>(&self, catalog: &'a PhotoCatalog) -> Option<&'a PhotoRecord> {
        let index = self.current_index()?;
        self.filtered.get(index).and_then(|&i| catalog.photo_at(i))
    }

    /// Apply `intent` to this state.
    ///
    /// Returns `Ok(None)` when the intent does nothing in the current state,
    /// `Ok(Some(next))` with the new state, or an error; `self` is never modified.
    pub fn transition(
        &self,
        catalog: &PhotoCatalog,
        policy: CategoryChangePolicy,
        intent: &GalleryIntent,
    ) -> Result<Option<Self>> {
        match intent {
            GalleryIntent::SelectCategory(category) => {
                self.select_category(catalog, policy, category).map(Some)
            }
            GalleryIntent::OpenPhoto(id) => self.open(catalog, intent, id).map(Some),
            GalleryIntent::Next => Ok(self.step(Step::Forward)),
            GalleryIntent::Previous => Ok(self.step(Step::Backward)),
            GalleryIntent::Close => Ok(self.close()),
        }
    }

    fn select_category(
        &self,
        catalog: &PhotoCatalog,
        policy: CategoryChangePolicy,
        category: &str,
    ) -> Result<Self> {
        let mut next = Self::with_category(catalog, category)?;

        if policy == CategoryChangePolicy::KeepIfPresent {
            if let Some(open) = self.open_photo(catalog) {
                let relocated = next
                    .filtered
                    .iter()
                    .position(|&i| catalog.photo_at(i).is_some_and(|p| p.id == open.id));
                if let Some(index) = relocated {
                    next.mode = ViewMode::Viewing { index };
                }
            }
        }

        Ok(next)
    }

    fn open(&self, catalog: &PhotoCatalog, intent: &GalleryIntent, id: &str) -> Result<Self> {
        if self.is_viewing() {
            return Err(GalleryError::InvalidTransition {
                intent: intent.to_string(),
                state: self.mode.to_string(),
            });
        }

        let index = self
            .filtered
            .iter()
            .position(|&i| catalog.photo_at(i).is_some_and(|p| p.id == id))
            .ok_or_else(|| GalleryError::PhotoNotFound(id.to_string()))?;

        Ok(Self {
            mode: ViewMode::Viewing { index },
            ..self.clone()
        })
    }

    fn step(&self, step: Step) -> Option<Self> {
        let index = self.current_index()?;
        let len = self.filtered.len();
        if len == 0 {
            return None;
        }

        let index = match step {
            Step::Forward => (index + 1) % len,
            Step::Backward => (index + len - 1) % len,
        };

        Some(Self {
            mode: ViewMode::Viewing { index },
            ..self.clone()
        })
    }

    fn close(&self) -> Option<Self> {
        if !self.is_viewing() {
            return None;
        }

        Some(Self {
            mode: ViewMode::Browsing,
            ..self.clone()
        })
    }
}

#[derive(Clone, Copy)]
enum Step {
    Forward,
    Backward,
}

/// Owns the gallery state of one viewing session
#[derive(Debug, Clone)]
pub struct GalleryNavigator {
    catalog: Arc<PhotoCatalog>,
    policy: CategoryChangePolicy,
    state: GalleryState,
}

impl GalleryNavigator {
    pub fn new(catalog: Arc<PhotoCatalog>) -> Self {
        let state = GalleryState::new(&catalog);
        Self {
            catalog,
            policy: CategoryChangePolicy::default(),
            state,
        }
    }

    pub fn with_policy(mut self, policy: CategoryChangePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn catalog(&self) -> &PhotoCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Apply an intent; returns whether the state changed.
    ///
    /// On error the state is left exactly as it was.
    pub fn apply(&mut self, intent: &GalleryIntent) -> Result<bool> {
        match self.state.transition(&self.catalog, self.policy, intent) {
            Ok(Some(next)) => {
                let changed = next != self.state;
                self.state = next;
                tracing::debug!(
                    %intent,
                    category = self.state.selected_category(),
                    index = ?self.state.current_index(),
                    "Gallery transition"
                );
                Ok(changed)
            }
            Ok(None) => {
                tracing::debug!(%intent, state = %self.state.mode(), "Ignored in current state");
                Ok(false)
            }
            Err(e) => {
                tracing::debug!(%intent, "Rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn select_category(&mut self, category: &str) -> Result<()> {
        self.apply(&GalleryIntent::SelectCategory(category.to_string()))
            .map(drop)
    }

    pub fn open_photo(&mut self, id: &str) -> Result<()> {
        self.apply(&GalleryIntent::OpenPhoto(id.to_string())).map(drop)
    }

    /// Move to the next photo, wrapping to the first; false when nothing is open
    pub fn next(&mut self) -> bool {
        self.apply(&GalleryIntent::Next).unwrap_or(false)
    }

    /// Move to the previous photo, wrapping to the last; false when nothing is open
    pub fn previous(&mut self) -> bool {
        self.apply(&GalleryIntent::Previous).unwrap_or(false)
    }

    /// Close the lightbox; false when nothing is open
    pub fn close(&mut self) -> bool {
        self.apply(&GalleryIntent::Close).unwrap_or(false)
    }

    pub fn selected_category(&self) -> &str {
        self.state.selected_category()
    }

    pub fn filtered_photos(&self) -> Vec<&PhotoRecord> {
        self.state.filtered_photos(&self.catalog)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index()
    }

    pub fn current_photo(&self) -> Option<&PhotoRecord> {
        self.state.open_photo(&self.catalog)
    }

    /// Lightbox counter, e.g. "2 of 5"
    pub fn position_label(&self) -> Option<String> {
        self.current_index()
            .map(|index| format!("{} of {}", index + 1, self.state.filtered_len()))
    }

    /// Everything the presentation layer needs to draw the current view
    pub fn snapshot(&self) -> GallerySnapshot {
        GallerySnapshot {
            categories: self.catalog.categories().to_vec(),
            selected_category: self.selected_category().to_string(),
            photos: self.filtered_photos().into_iter().cloned().collect(),
            open_photo: self.current_photo().cloned(),
            current_index: self.current_index(),
            position: self.position_label(),
        }
    }
}

/// Read model handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GallerySnapshot {
    pub categories: Vec<String>,
    pub selected_category: String,
    pub photos: Vec<PhotoRecord>,
    pub open_photo: Option<PhotoRecord>,
    pub current_index: Option<usize>,
    pub position: Option<String>,
}

impl GallerySnapshot {
    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
