//! Photo catalog: the read-only source of truth for the gallery
//!
//! The catalog is built once at startup, validated, and never mutated. It
//! exposes the derived category list (with the synthetic "All" label first)
//! and the featured subsets used by the showcase.

use crate::error::{GalleryError, Result};
use crate::photo::{PhotoRecord, Project};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Synthetic category that matches every photo
pub const ALL_CATEGORY: &str = "All";

const SAMPLE_CATALOG: &str = include_str!("../assets/sample_catalog.toml");

/// Immutable, validated photo catalog
#[derive(Debug, Clone)]
pub struct PhotoCatalog {
    photos: Vec<PhotoRecord>,
    projects: Vec<Project>,
    categories: Vec<String>,
}

impl PhotoCatalog {
    /// Build a catalog, rejecting malformed entries
    pub fn new(photos: Vec<PhotoRecord>, projects: Vec<Project>) -> Result<Self> {
        validate_photos(&photos)?;
        validate_projects(&projects, &photos)?;

        let mut categories = vec![ALL_CATEGORY.to_string()];
        for photo in &photos {
            if !categories.iter().any(|c| c == &photo.category) {
                categories.push(photo.category.clone());
            }
        }

        tracing::info!(
            photos = photos.len(),
            projects = projects.len(),
            categories = categories.len() - 1,
            "Catalog loaded"
        );

        Ok(Self {
            photos,
            projects,
            categories,
        })
    }

    /// The catalog bundled with the application
    pub fn sample() -> Result<Self> {
        CatalogFile::from_toml_str(SAMPLE_CATALOG)?.into_catalog()
    }

    /// Every photo, in catalog order
    pub fn all_photos(&self) -> &[PhotoRecord] {
        &self.photos
    }

    /// `["All", c1, c2, ...]` with categories in first-occurrence order
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn featured_photos(&self) -> Vec<&PhotoRecord> {
        self.photos.iter().filter(|p| p.featured).collect()
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn featured_projects(&self) -> Vec<&Project> {
        self.projects.iter().filter(|p| p.featured).collect()
    }

    /// Look up a photo by id
    pub fn photo(&self, id: &str) -> Option<&PhotoRecord> {
        self.photos.iter().find(|p| p.id == id)
    }

    /// First image of a project, if it has any
    pub fn project_cover(&self, project: &Project) -> Option<&PhotoRecord> {
        project.images.first().and_then(|id| self.photo(id))
    }

    /// Catalog positions of the photos shown for `category`
    pub fn filter_indices(&self, category: &str) -> Result<Vec<usize>> {
        if !self.has_category(category) {
            return Err(GalleryError::InvalidCategory(category.to_string()));
        }

        if category == ALL_CATEGORY {
            return Ok((0..self.photos.len()).collect());
        }

        Ok(self
            .photos
            .iter()
            .enumerate()
            .filter(|(_, p)| p.category == category)
            .map(|(i, _)| i)
            .collect())
    }

    /// Photos shown for `category`, in catalog order
    pub fn photos_in(&self, category: &str) -> Result<Vec<&PhotoRecord>> {
        Ok(self
            .filter_indices(category)?
            .into_iter()
            .map(|i| &self.photos[i])
            .collect())
    }

    pub(crate) fn photo_at(&self, index: usize) -> Option<&PhotoRecord> {
        self.photos.get(index)
    }
}

fn validate_photos(photos: &[PhotoRecord]) -> Result<()> {
    let mut seen = HashSet::new();

    for (position, photo) in photos.iter().enumerate() {
        let invalid = |reason: &str| {
            GalleryError::Validation(format!(
                "photo #{} ({:?}): {}",
                position + 1,
                photo.id,
                reason
            ))
        };

        if photo.id.trim().is_empty() {
            return Err(invalid("missing id"));
        }
        if !seen.insert(photo.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
        if photo.title.trim().is_empty() {
            return Err(invalid("missing title"));
        }
        if photo.category.trim().is_empty() {
            return Err(invalid("empty category"));
        }
        if photo.category == ALL_CATEGORY {
            return Err(invalid("\"All\" is reserved and cannot be used as a category"));
        }
        if photo.width == 0 || photo.height == 0 {
            return Err(invalid("width and height must be positive"));
        }
    }

    Ok(())
}

fn validate_projects(projects: &[Project], photos: &[PhotoRecord]) -> Result<()> {
    let photo_ids: HashSet<&str> = photos.iter().map(|p| p.id.as_str()).collect();
    let mut seen = HashSet::new();

    for (position, project) in projects.iter().enumerate() {
        let invalid = |reason: String| {
            GalleryError::Validation(format!(
                "project #{} ({:?}): {}",
                position + 1,
                project.id,
                reason
            ))
        };

        if project.id.trim().is_empty() {
            return Err(invalid("missing id".into()));
        }
        if !seen.insert(project.id.as_str()) {
            return Err(invalid("duplicate id".into()));
        }
        if let Some(missing) = project.images.iter().find(|id| !photo_ids.contains(id.as_str())) {
            return Err(invalid(format!("unknown photo {:?}", missing)));
        }
    }

    Ok(())
}

/// On-disk catalog document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub photos: Vec<PhotoRecord>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl CatalogFile {
    /// Load a TOML catalog file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_toml_str(&content)?;
        tracing::debug!("Catalog file read from {:?}", path);
        Ok(file)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| GalleryError::Validation(e.to_string()))
    }

    pub fn into_catalog(self) -> Result<PhotoCatalog> {
        PhotoCatalog::new(self.photos, self.projects)
    }
}
