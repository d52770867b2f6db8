//! Application configuration

use crate::catalog::ALL_CATEGORY;
use crate::command::default_keybindings;
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub gallery: GalleryConfig,
    /// Layered over the defaults; a command listed here replaces only its own keys
    #[serde(deserialize_with = "merge_keybindings")]
    pub keybindings: HashMap<String, Vec<String>>,
}

fn merge_keybindings<'de, D>(deserializer: D) -> Result<HashMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let user = HashMap::<String, Vec<String>>::deserialize(deserializer)?;
    let mut merged = default_keybindings();
    merged.extend(user);
    Ok(merged)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            gallery: GalleryConfig::default(),
            keybindings: default_keybindings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub site_title: String,
    pub tagline: String,
    pub theme: Theme,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            site_title: "Photography Portfolio".to_string(),
            tagline: "Capturing moments, creating memories".to_string(),
            theme: Theme::System,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Category selected when a gallery view starts
    pub default_category: String,
    /// What happens to an open photo when the category changes
    pub category_change: CategoryChangePolicy,
    /// Catalog file; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            default_category: ALL_CATEGORY.to_string(),
            category_change: CategoryChangePolicy::Close,
            catalog_path: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategoryChangePolicy {
    /// Always return to the grid
    #[default]
    #[serde(rename = "close")]
    Close,
    /// Stay on the open photo if the new category still shows it
    #[serde(rename = "keep_if_present")]
    KeepIfPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[serde(rename = "light")]
    Light,
    #[serde(rename = "dark")]
    Dark,
    #[default]
    #[serde(rename = "system")]
    System,
}

impl AppConfig {
    /// Load configuration from the default location
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::info!("Configuration loaded from {:?}", path);
            Ok(config)
        } else {
            tracing::info!("Using default configuration");
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::info!("Configuration saved to {:?}", path);
        Ok(())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("com", "Folio", "Folio")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("./config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{GalleryIntent, KeyBindings};

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.gallery.default_category, "All");
        assert_eq!(config.gallery.category_change, CategoryChangePolicy::Close);
        assert_eq!(config.general.theme, Theme::System);
        assert!(config.keybindings.contains_key("gallery.next"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [gallery]
            category_change = "keep_if_present"
            catalog_path = "/srv/portfolio/catalog.toml"
            "#,
        )
        .unwrap();

        assert_eq!(config.gallery.category_change, CategoryChangePolicy::KeepIfPresent);
        assert_eq!(config.gallery.catalog_path, Some(PathBuf::from("/srv/portfolio/catalog.toml")));
        assert_eq!(config.gallery.default_category, "All");
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn test_keybinding_override_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [keybindings]
            "gallery.next" = ["l"]
            "#,
        )
        .unwrap();

        assert_eq!(config.keybindings["gallery.next"], ["l"]);
        let keys = KeyBindings::new(&config.keybindings);
        assert_eq!(keys.intent_for("l"), Some(GalleryIntent::Next));
        assert_eq!(keys.intent_for("Right"), None);
        assert_eq!(keys.intent_for("Escape"), Some(GalleryIntent::Close));
        assert_eq!(keys.intent_for("Left"), Some(GalleryIntent::Previous));
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.general.theme = Theme::Dark;
        config.gallery.default_category = "Street".into();
        config.save_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ntheme = \"sepia\"\n").unwrap();
        assert!(AppConfig::load_from(&path).is_err());
    }
}
