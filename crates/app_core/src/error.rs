//! Gallery error types

use thiserror::Error;

/// Main error type for the gallery core
#[derive(Error, Debug)]
pub enum GalleryError {
    // ===== Recoverable Errors (state unchanged, caller re-prompts or ignores) =====
    #[error("Unknown category: {0}")]
    InvalidCategory(String),

    #[error("Photo not in current view: {0}")]
    PhotoNotFound(String),

    #[error("Cannot {intent} while {state}")]
    InvalidTransition { intent: String, state: String },

    // ===== Fatal Errors (abort startup) =====
    #[error("Invalid catalog entry: {0}")]
    Validation(String),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Initialization failed: {0}")]
    Init(String),
}

pub type Result<T> = std::result::Result<T, GalleryError>;

impl GalleryError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GalleryError::InvalidCategory(_)
                | GalleryError::PhotoNotFound(_)
                | GalleryError::InvalidTransition { .. }
        )
    }

    /// Is this a fatal error?
    pub fn is_fatal(&self) -> bool {
        !self.is_recoverable()
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            GalleryError::InvalidCategory(name) => format!("There is no \"{}\" category", name),
            GalleryError::PhotoNotFound(id) => {
                format!("Photo {} is not shown in this category", id)
            }
            GalleryError::InvalidTransition { intent, .. } => {
                format!("\"{}\" is not available right now", intent)
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classes() {
        assert!(GalleryError::InvalidCategory("x".into()).is_recoverable());
        assert!(GalleryError::PhotoNotFound("1".into()).is_recoverable());
        assert!(GalleryError::InvalidTransition {
            intent: "open".into(),
            state: "viewing".into()
        }
        .is_recoverable());

        assert!(GalleryError::Validation("dup".into()).is_fatal());
        assert!(GalleryError::Config("bad".into()).is_fatal());
        assert!(GalleryError::Init("twice".into()).is_fatal());
    }

    #[test]
    fn test_user_message() {
        let err = GalleryError::InvalidCategory("Nonexistent".into());
        assert_eq!(err.user_message(), "There is no \"Nonexistent\" category");

        let err = GalleryError::Validation("photo #2 has no id".into());
        assert_eq!(err.user_message(), "Invalid catalog entry: photo #2 has no id");
    }
}
