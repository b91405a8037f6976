//! Configuration management module
//!
//! Handles loading, saving, and validation of the trivium configuration
//! file: provider endpoint, request timeout, answer ordering and the quiz
//! settings the settings screen starts from.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::{Difficulty, QuizSettings};
use crate::{Result, TriviumError, APP_NAME, CONFIG_FILE, DEFAULT_ENDPOINT, MAX_QUESTIONS};

/// How the answers of a question are ordered on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnswerOrder {
    /// Natural string order, recomputed every time a question is shown
    #[default]
    Sorted,
    /// Shuffled once when the session starts, then kept for that session
    Shuffled,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trivia provider endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds; transport default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    /// Answer ordering policy
    #[serde(default)]
    pub answer_order: AnswerOrder,
    /// Initial quiz settings
    #[serde(default)]
    pub defaults: QuizSettings,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: None,
            answer_order: AnswerOrder::Sorted,
            defaults: QuizSettings::default(),
        }
    }
}

impl AppConfig {
    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        reqwest::Url::parse(&self.endpoint).map_err(|e| {
            TriviumError::Config(format!("Invalid endpoint {}: {}", self.endpoint, e))
        })?;

        let amount = self.defaults.amount;
        if amount == 0 || amount > MAX_QUESTIONS {
            return Err(TriviumError::Config(format!(
                "Question amount must be between 1 and {} (got {})",
                MAX_QUESTIONS, amount
            )));
        }

        if self.defaults.category.trim().is_empty() {
            return Err(TriviumError::Config("Category must not be empty".to_string()));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(TriviumError::Config(
                "Request timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Set the provider endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = Some(timeout.as_secs());
        self
    }

    pub fn with_answer_order(mut self, order: AnswerOrder) -> Self {
        self.answer_order = order;
        self
    }

    pub fn with_amount(mut self, amount: u8) -> Self {
        self.defaults.amount = amount;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.defaults.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.defaults.difficulty = difficulty;
        self
    }

    /// Load configuration from `path`, falling back to defaults if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| {
            TriviumError::Config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            TriviumError::Config(format!("Failed to parse config file {}: {}", path.display(), e))
        })?;

        config.validate()?;
        info!(path = %path.display(), "configuration loaded");

        Ok(config)
    }

    /// Save configuration to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TriviumError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            TriviumError::Config(format!("Failed to write config file {}: {}", path.display(), e))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path:
    /// `$CONFIG_HOME/trivium/trivium.toml`
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TriviumError::Config("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionType;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.answer_order, AnswerOrder::Sorted);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default()
            .with_amount(25)
            .with_difficulty(Difficulty::Hard)
            .with_answer_order(AnswerOrder::Shuffled)
            .with_request_timeout(Duration::from_secs(10));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let deserialized: AppConfig =
            toml::from_str(&toml_str).expect("Failed to deserialize from TOML");
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            answer_order = "shuffled"

            [defaults]
            amount = 5
            category = "23"
            difficulty = "easy"
            type = "boolean"
            "#,
        )
        .expect("parse");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.answer_order, AnswerOrder::Shuffled);
        assert_eq!(config.defaults.amount, 5);
        assert_eq!(config.defaults.question_type, QuestionType::Boolean);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(AppConfig::default().with_amount(0).validate().is_err());
        assert!(AppConfig::default().with_amount(51).validate().is_err());
        assert!(AppConfig::default().with_amount(50).validate().is_ok());
        assert!(AppConfig::default().with_endpoint("::nope").validate().is_err());
        assert!(AppConfig::default().with_category(" ").validate().is_err());
        assert!(AppConfig::default()
            .with_request_timeout(Duration::from_secs(0))
            .validate()
            .is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join(CONFIG_FILE);

        let config = AppConfig::default().with_category("17").with_amount(3);
        config.save_to(&path).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = AppConfig::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, AppConfig::default());
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE);
        fs::write(&path, "[defaults]\namount = 99\ncategory = \"9\"\ndifficulty = \"easy\"\ntype = \"multiple\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(TriviumError::Config(_))
        ));
    }

    #[test]
    fn test_config_file_path() {
        let path = AppConfig::config_file_path().unwrap();
        assert!(path.to_string_lossy().contains("trivium"));
        assert!(path.ends_with("trivium/trivium.toml"));
    }
}
