//! Viewer intents and the key bindings that produce them

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Command identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandId(pub String);

impl CommandId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub const GALLERY_SELECT_CATEGORY: &'static str = "gallery.select_category";
    pub const GALLERY_OPEN: &'static str = "gallery.open";
    pub const GALLERY_NEXT: &'static str = "gallery.next";
    pub const GALLERY_PREVIOUS: &'static str = "gallery.previous";
    pub const GALLERY_CLOSE: &'static str = "gallery.close";
}

/// Command with an optional argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
    pub argument: Option<String>,
}

impl Command {
    pub fn new(id: &str) -> Self {
        Self {
            id: CommandId::new(id),
            argument: None,
        }
    }

    pub fn with_argument(mut self, value: &str) -> Self {
        self.argument = Some(value.to_string());
        self
    }
}

/// Everything a viewer can ask the gallery to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "value", rename_all = "snake_case")]
pub enum GalleryIntent {
    SelectCategory(String),
    OpenPhoto(String),
    Next,
    Previous,
    Close,
}

impl GalleryIntent {
    pub fn command_id(&self) -> &'static str {
        match self {
            GalleryIntent::SelectCategory(_) => CommandId::GALLERY_SELECT_CATEGORY,
            GalleryIntent::OpenPhoto(_) => CommandId::GALLERY_OPEN,
            GalleryIntent::Next => CommandId::GALLERY_NEXT,
            GalleryIntent::Previous => CommandId::GALLERY_PREVIOUS,
            GalleryIntent::Close => CommandId::GALLERY_CLOSE,
        }
    }

    /// Convert a dispatched command back into an intent
    pub fn from_command(cmd: &Command) -> Option<Self> {
        match cmd.id.as_str() {
            CommandId::GALLERY_SELECT_CATEGORY => cmd.argument.clone().map(Self::SelectCategory),
            CommandId::GALLERY_OPEN => cmd.argument.clone().map(Self::OpenPhoto),
            CommandId::GALLERY_NEXT => Some(Self::Next),
            CommandId::GALLERY_PREVIOUS => Some(Self::Previous),
            CommandId::GALLERY_CLOSE => Some(Self::Close),
            _ => None,
        }
    }

    pub fn to_command(&self) -> Command {
        let cmd = Command::new(self.command_id());
        match self {
            GalleryIntent::SelectCategory(value) | GalleryIntent::OpenPhoto(value) => {
                cmd.with_argument(value)
            }
            _ => cmd,
        }
    }

    /// Parse a typed intent such as `select Landscape`, `open 3` or `next`.
    ///
    /// Category names may contain spaces; everything after the verb is the argument.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match (verb.to_lowercase().as_str(), rest) {
            ("select" | "category" | "filter", arg) if !arg.is_empty() => {
                Some(Self::SelectCategory(arg.to_string()))
            }
            ("open" | "view", arg) if !arg.is_empty() => Some(Self::OpenPhoto(arg.to_string())),
            ("next" | "n", "") => Some(Self::Next),
            ("prev" | "previous" | "p", "") => Some(Self::Previous),
            ("close" | "c", "") => Some(Self::Close),
            _ => None,
        }
    }
}

impl fmt::Display for GalleryIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryIntent::SelectCategory(name) => write!(f, "select category {:?}", name),
            GalleryIntent::OpenPhoto(id) => write!(f, "open photo {:?}", id),
            GalleryIntent::Next => f.write_str("go to next photo"),
            GalleryIntent::Previous => f.write_str("go to previous photo"),
            GalleryIntent::Close => f.write_str("close the viewer"),
        }
    }
}

/// Key name -> command resolution for the lightbox
#[derive(Debug, Clone)]
pub struct KeyBindings {
    key_to_command: HashMap<String, String>,
}

impl KeyBindings {
    /// Build from a `command -> keys` map, as stored in the config file
    pub fn new(bindings: &HashMap<String, Vec<String>>) -> Self {
        let mut key_to_command = HashMap::new();

        for (command, keys) in bindings {
            for key in keys {
                if let Some(previous) = key_to_command.insert(key.to_lowercase(), command.clone()) {
                    tracing::warn!("Key {} bound to both {} and {}", key, previous, command);
                }
            }
        }

        Self { key_to_command }
    }

    /// Resolve a key name (case-insensitive) to a command
    pub fn resolve(&self, key: &str) -> Option<Command> {
        let command = self.key_to_command.get(&key.trim().to_lowercase())?;
        tracing::debug!("Key {} -> {}", key, command);
        Some(Command::new(command))
    }

    /// Resolve a key name straight to an intent
    pub fn intent_for(&self, key: &str) -> Option<GalleryIntent> {
        self.resolve(key).as_ref().and_then(GalleryIntent::from_command)
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(&default_keybindings())
    }
}

/// Lightbox keys: arrows step through the filtered photos, Escape closes
pub fn default_keybindings() -> HashMap<String, Vec<String>> {
    let mut kb = HashMap::new();
    kb.insert(CommandId::GALLERY_NEXT.into(), vec!["Right".into(), "ArrowRight".into()]);
    kb.insert(CommandId::GALLERY_PREVIOUS.into(), vec!["Left".into(), "ArrowLeft".into()]);
    kb.insert(CommandId::GALLERY_CLOSE.into(), vec!["Escape".into()]);
    kb
}
