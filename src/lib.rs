//! trivium - terminal trivia quiz
//!
//! A TUI client that pulls multiple-choice questions from the Open Trivia DB,
//! walks the user through them one at a time and shows a scored review.

use thiserror::Error;

pub mod app;
pub mod config;
pub mod fetch;
pub mod models;
pub mod quiz;
pub mod util;

pub use fetch::FetchError;

/// Top-level error type
#[derive(Debug, Error)]
pub enum TriviumError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration validation or parsing error
    #[error("Configuration error: {0}")]
    Config(String),
    /// Question fetch failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),
}

impl From<toml::de::Error> for TriviumError {
    fn from(err: toml::de::Error) -> Self {
        TriviumError::Config(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for TriviumError {
    fn from(err: toml::ser::Error) -> Self {
        TriviumError::Config(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for trivium operations
pub type Result<T> = std::result::Result<T, TriviumError>;

/// Error handling utilities
pub mod error {
    use super::{FetchError, TriviumError};

    /// Message shown when the provider cannot satisfy the requested settings
    pub const NO_QUESTIONS_MESSAGE: &str =
        "Failed to load questions. Please try different settings.";
    /// Message shown for network and decoding failures
    pub const TRANSPORT_MESSAGE: &str = "An error occurred while fetching questions.";

    /// Convert a fetch failure to the message shown on the error screen
    pub fn fetch_message(error: &FetchError) -> &'static str {
        match error {
            FetchError::NoQuestionsAvailable { .. } => NO_QUESTIONS_MESSAGE,
            FetchError::Transport(_) => TRANSPORT_MESSAGE,
        }
    }

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &TriviumError) -> String {
        match error {
            TriviumError::Fetch(err) => fetch_message(err).to_string(),
            TriviumError::Config(msg) => {
                format!("Configuration error: {}. Check your trivium.toml.", msg)
            }
            TriviumError::Io(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
                "Permission denied. Check the config and log file locations.".to_string()
            }
            _ => error.to_string(),
        }
    }
}

pub const APP_NAME: &str = "trivium";
pub const CONFIG_FILE: &str = "trivium.toml";
pub const LOG_FILE: &str = "trivium.log";
pub const DEFAULT_ENDPOINT: &str = "https://opentdb.com/api.php";
/// Upper bound the provider accepts for `amount`
pub const MAX_QUESTIONS: u8 = 50;
