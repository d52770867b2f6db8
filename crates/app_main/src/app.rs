//! Input loop: one intent or key per line

use crate::view::{self, Mode};
use anyhow::Result;
use app_core::{AppConfig, GalleryError, GalleryIntent, GallerySession, KeyBindings, PhotoCatalog};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    catalog: Arc<PhotoCatalog>,
    session: GallerySession,
    keys: KeyBindings,
    mode: Mode,
}

impl App {
    pub fn new(config: &AppConfig, catalog: Arc<PhotoCatalog>, mode: Mode) -> Result<Self> {
        let session = GallerySession::new(catalog.clone(), &config.gallery)?;
        Ok(Self {
            catalog,
            session,
            keys: KeyBindings::new(&config.keybindings),
            mode,
        })
    }

    pub fn show(&self, out: &mut impl Write) -> io::Result<()> {
        view::render(out, &self.session.snapshot(), self.mode)
    }

    /// Handle one line of input
    pub fn handle_line(&self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => return Ok(Flow::Continue),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "help" | "?" => {
                view::render_help(out)?;
                return Ok(Flow::Continue);
            }
            "show" => {
                self.show(out)?;
                return Ok(Flow::Continue);
            }
            "categories" => {
                view::render_filters(out, &self.session.snapshot())?;
                return Ok(Flow::Continue);
            }
            "featured" => {
                view::render_showcase(out, &self.catalog)?;
                return Ok(Flow::Continue);
            }
            _ => {}
        }

        let intent = self.keys.intent_for(line).or_else(|| GalleryIntent::parse(line));
        let Some(intent) = intent else {
            writeln!(out, "Unknown input: {} (type help)", line)?;
            return Ok(Flow::Continue);
        };

        match self.session.apply(&intent) {
            Ok(snapshot) => view::render(out, &snapshot, self.mode)?,
            Err(e) if e.is_recoverable() => report(out, &e)?,
            Err(e) => return Err(e.into()),
        }
        Ok(Flow::Continue)
    }
}

fn report(out: &mut impl Write, e: &GalleryError) -> io::Result<()> {
    tracing::warn!("{}", e);
    writeln!(out, "{}", e.user_message())
}

/// Run until stdin closes or the viewer quits
pub fn run(config: &AppConfig, catalog: Arc<PhotoCatalog>, mode: Mode) -> Result<()> {
    let app = App::new(config, catalog, mode)?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    if mode == Mode::Text {
        writeln!(out, "{} - {}", config.general.site_title, config.general.tagline)?;
    }
    app.show(&mut out)?;
    out.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if app.handle_line(&line, &mut out)? == Flow::Quit {
            break;
        }
        out.flush()?;
    }

    tracing::info!("Folio exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_core::PhotoRecord;

    fn app(mode: Mode) -> App {
        let catalog = PhotoCatalog::new(
            vec![
                PhotoRecord::new("1", "Dunes", "Landscape", "/img/1.jpg", 1200, 800),
                PhotoRecord::new("2", "Anna", "Portrait", "/img/2.jpg", 800, 1200),
                PhotoRecord::new("3", "Ridge", "Landscape", "/img/3.jpg", 1200, 800),
            ],
            vec![],
        )
        .unwrap();
        App::new(&AppConfig::default(), Arc::new(catalog), mode).unwrap()
    }

    fn send(app: &App, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let flow = app.handle_line(line, &mut out).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_browse_session() {
        let app = app(Mode::Text);

        let (_, output) = send(&app, "select Landscape");
        assert!(output.contains("[Landscape]"));

        let (_, output) = send(&app, "open 3");
        assert!(output.contains("== Ridge =="));
        assert!(output.contains("2 of 2"));

        let (_, output) = send(&app, "Right");
        assert!(output.contains("== Dunes =="));
        assert!(output.contains("1 of 2"));

        let (_, output) = send(&app, "Escape");
        assert!(output.contains("Photo Gallery"));
    }

    #[test]
    fn test_recoverable_errors_are_reported() {
        let app = app(Mode::Text);
        send(&app, "select Landscape");

        let (flow, output) = send(&app, "open 2");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(output.trim(), "Photo 2 is not shown in this category");

        let (_, output) = send(&app, "select Nonexistent");
        assert_eq!(output.trim(), "There is no \"Nonexistent\" category");
    }

    #[test]
    fn test_unknown_and_quit() {
        let app = app(Mode::Text);
        let (flow, output) = send(&app, "zoom in");
        assert_eq!(flow, Flow::Continue);
        assert!(output.starts_with("Unknown input"));

        let (flow, _) = send(&app, "QUIT");
        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn test_json_mode() {
        let app = app(Mode::Json);
        let (_, output) = send(&app, "open 2");
        let value: serde_json::Value = serde_json::from_str(output.trim()).unwrap();
        assert_eq!(value["current_index"], 1);
        assert_eq!(value["position"], "2 of 3");
    }
}
