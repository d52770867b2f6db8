//! Folio - photography portfolio gallery
//!
//! Headless front end: reads viewer intents from stdin and prints the
//! gallery or lightbox the core reports.

mod app;
mod view;

use anyhow::{Context, Result};
use app_core::{AppConfig, CatalogFile, PhotoCatalog};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "folio", version, about = "Browse a photography portfolio from the terminal")]
struct Args {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Catalog file (overrides the configured one)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Category to start on
    #[arg(long)]
    category: Option<String>,

    /// Print JSON snapshots instead of text
    #[arg(long)]
    json: bool,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging and panic hook first
    let _log_guard = app_log::init(if args.verbose { "debug" } else { "info" })?;

    // Clean up old logs (7 days)
    if let Err(e) = app_log::cleanup_old_logs(7) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("Folio starting...");

    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)?,
        None => config_or_default(AppConfig::load(), &AppConfig::config_path()),
    };
    if let Some(path) = args.catalog {
        config.gallery.catalog_path = Some(path);
    }
    if let Some(category) = args.category {
        config.gallery.default_category = category;
    }

    // A bad catalog is fatal: nothing is shown until it validates
    let catalog = load_catalog(&config)?;
    let catalog = app_core::init(catalog)?;

    let mode = if args.json { view::Mode::Json } else { view::Mode::Text };
    app::run(&config, catalog, mode)
}

/// Fall back to defaults when the config in the default location cannot be read
fn config_or_default(loaded: Result<AppConfig>, path: &Path) -> AppConfig {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config {:?}: {:#}", path, e);
        AppConfig::default()
    })
}

fn load_catalog(config: &AppConfig) -> Result<PhotoCatalog> {
    match &config.gallery.catalog_path {
        Some(path) => CatalogFile::load(path)
            .and_then(CatalogFile::into_catalog)
            .with_context(|| format!("loading catalog {}", path.display())),
        None => {
            tracing::info!("Using bundled catalog");
            PhotoCatalog::sample().context("loading bundled catalog")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args = Args::try_parse_from(["folio", "--category", "Street", "--json"]).unwrap();
        assert_eq!(args.category.as_deref(), Some("Street"));
        assert!(args.json);
        assert!(args.catalog.is_none());
    }

    #[test]
    fn test_load_catalog_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        std::fs::write(
            &path,
            concat!(
                "[[photos]]\n",
                "id = \"1\"\ntitle = \"T\"\ncategory = \"\"\n",
                "src = \"s\"\nwidth = 1\nheight = 1\n",
            ),
        )
        .unwrap();

        let mut config = AppConfig::default();
        config.gallery.catalog_path = Some(path);
        let err = load_catalog(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("empty category"));
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gallery\ncategory_change = \"close\"\n").unwrap();

        let config = config_or_default(AppConfig::load_from(&path), &path);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_bundled_catalog() {
        let catalog = load_catalog(&AppConfig::default()).unwrap();
        assert!(!catalog.all_photos().is_empty());
    }
}
