//! Text rendering of gallery snapshots

use app_core::{GallerySnapshot, PhotoCatalog};
use std::io::{self, Write};

/// Shown when a project has no images
const PLACEHOLDER_COVER: &str =
    "https://images.unsplash.com/photo-1492691527719-9d1e07e534b4?w=800&h=600&fit=crop";

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Text,
    Json,
}

pub fn render(out: &mut impl Write, snapshot: &GallerySnapshot, mode: Mode) -> io::Result<()> {
    match mode {
        Mode::Json => {
            serde_json::to_writer(&mut *out, snapshot)?;
            writeln!(out)
        }
        Mode::Text if snapshot.open_photo.is_some() => render_lightbox(out, snapshot),
        Mode::Text => render_grid(out, snapshot),
    }
}

/// Category buttons, the selected one in brackets
pub fn render_filters(out: &mut impl Write, snapshot: &GallerySnapshot) -> io::Result<()> {
    let buttons: Vec<String> = snapshot
        .categories
        .iter()
        .map(|c| {
            if *c == snapshot.selected_category {
                format!("[{}]", c)
            } else {
                c.clone()
            }
        })
        .collect();
    writeln!(out, "{}", buttons.join("  "))
}

fn render_grid(out: &mut impl Write, snapshot: &GallerySnapshot) -> io::Result<()> {
    writeln!(out, "Photo Gallery")?;
    render_filters(out, snapshot)?;
    writeln!(out)?;

    if snapshot.is_empty() {
        return writeln!(out, "No photos in this category.");
    }

    for photo in &snapshot.photos {
        writeln!(out, "{:>4}  {}  ({})", photo.id, photo.title, photo.category)?;
    }
    Ok(())
}

fn render_lightbox(out: &mut impl Write, snapshot: &GallerySnapshot) -> io::Result<()> {
    let Some(photo) = &snapshot.open_photo else {
        return Ok(());
    };

    writeln!(out, "== {} ==", photo.title)?;
    if let Some(description) = &photo.description {
        writeln!(out, "{}", description)?;
    }
    writeln!(out, "{} ({}x{})", photo.src, photo.width, photo.height)?;
    writeln!(out, "{}", photo.alt_text())?;
    if let Some(position) = &snapshot.position {
        writeln!(out, "{}", position)?;
    }
    writeln!(out, "Left/Right to browse, Escape to close")
}

/// Featured projects showcase
pub fn render_showcase(out: &mut impl Write, catalog: &PhotoCatalog) -> io::Result<()> {
    writeln!(out, "Featured Projects")?;

    let projects = catalog.featured_projects();
    if projects.is_empty() {
        return writeln!(out, "No featured projects yet.");
    }

    for project in projects {
        let cover = catalog
            .project_cover(project)
            .map_or(PLACEHOLDER_COVER, |photo| photo.src.as_str());

        writeln!(out)?;
        writeln!(out, "{} [{}]", project.title, project.category)?;
        writeln!(out, "{}", project.formatted_date())?;
        writeln!(out, "{}", project.description)?;
        writeln!(out, "cover: {}", cover)?;
    }
    Ok(())
}

pub fn render_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "select <category> | open <id> | next | prev | close | Left | Right | Escape\n\
         categories | featured | show | help | quit"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::{GalleryNavigator, PhotoRecord};
    use std::sync::Arc;

    fn navigator() -> GalleryNavigator {
        let catalog = PhotoCatalog::new(
            vec![
                PhotoRecord::new("1", "Dunes", "Landscape", "/img/1.jpg", 1200, 800)
                    .with_description("Evening light"),
                PhotoRecord::new("2", "Anna", "Portrait", "/img/2.jpg", 800, 1200),
            ],
            vec![],
        )
        .unwrap();
        GalleryNavigator::new(Arc::new(catalog))
    }

    fn text(snapshot: &GallerySnapshot, mode: Mode) -> String {
        let mut out = Vec::new();
        render(&mut out, snapshot, mode).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_grid() {
        let mut nav = navigator();
        nav.select_category("Portrait").unwrap();
        let output = text(&nav.snapshot(), Mode::Text);

        assert!(output.contains("All  Landscape  [Portrait]"));
        assert!(output.contains("Anna  (Portrait)"));
        assert!(!output.contains("Dunes"));
    }

    #[test]
    fn test_lightbox() {
        let mut nav = navigator();
        nav.open_photo("1").unwrap();
        let output = text(&nav.snapshot(), Mode::Text);

        assert!(output.starts_with("== Dunes =="));
        assert!(output.contains("Evening light"));
        assert!(output.contains("1 of 2"));
    }

    #[test]
    fn test_json_line() {
        let output = text(&navigator().snapshot(), Mode::Json);
        assert!(output.ends_with('\n'));
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["selected_category"], "All");
    }

    #[test]
    fn test_showcase_lists_featured_projects() {
        let catalog = PhotoCatalog::sample().unwrap();
        let mut out = Vec::new();
        render_showcase(&mut out, &catalog).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.starts_with("Featured Projects"));
        assert!(output.contains("March 15, 2024"));
        assert!(!output.contains("Faces"));
    }
}
