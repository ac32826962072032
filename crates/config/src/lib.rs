//! Configuration loading, validation, and management for Emissary.
//!
//! Loads configuration from `~/.emissary/config.toml` with environment
//! variable overrides. Validates all settings at startup — the pipeline may
//! not be constructed over an invalid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The root configuration structure.
///
/// Maps directly to `~/.emissary/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// API key for the generation backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_api_key: Option<String>,

    /// API key for the assessment backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_api_key: Option<String>,

    /// Model used to generate persona responses
    #[serde(default = "default_generation_model")]
    pub generation_model: String,

    /// Model used to assess response quality
    #[serde(default = "default_assessment_model")]
    pub assessment_model: String,

    /// Base URL of the OpenAI-compatible generation endpoint
    #[serde(default = "default_generation_base_url")]
    pub generation_base_url: String,

    /// Sampling temperature for generation
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per generated response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Interaction count at which the call-to-action nudge kicks in
    #[serde(default = "default_call_to_action_threshold")]
    pub call_to_action_threshold: u32,

    /// Path to the subject's background document (plain text or markdown)
    #[serde(default = "default_background_path")]
    pub background_path: PathBuf,

    /// Path to the subject's personal-info blurb
    #[serde(default = "default_personal_info_path")]
    pub personal_info_path: PathBuf,

    /// The persona the assistant speaks as
    #[serde(default)]
    pub persona: PersonaConfig,
}

/// Identity of the individual the assistant represents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Full name of the subject
    #[serde(default = "default_persona_name")]
    pub name: String,

    /// Current title / role
    #[serde(default = "default_persona_title")]
    pub title: String,

    /// Current organization
    #[serde(default = "default_persona_organization")]
    pub organization: String,

    /// Canonical connection URL used for the call-to-action nudge
    #[serde(default = "default_connection_url")]
    pub connection_url: String,
}

fn default_generation_model() -> String {
    "gpt-4o-mini".into()
}
fn default_assessment_model() -> String {
    "gemini-2.0-flash-exp".into()
}
fn default_generation_base_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_temperature() -> f32 {
    0.7
}
fn default_max_tokens() -> u32 {
    500
}
fn default_call_to_action_threshold() -> u32 {
    8
}
fn default_background_path() -> PathBuf {
    PathBuf::from("background.md")
}
fn default_personal_info_path() -> PathBuf {
    PathBuf::from("personal_info.txt")
}
fn default_persona_name() -> String {
    "Brian Veau".into()
}
fn default_persona_title() -> String {
    "Global CIO and Vice President of IT".into()
}
fn default_persona_organization() -> String {
    "ShawKwei & Partners".into()
}
fn default_connection_url() -> String {
    "https://www.linkedin.com/in/brian-veau".into()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            name: default_persona_name(),
            title: default_persona_title(),
            organization: default_persona_organization(),
            connection_url: default_connection_url(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            generation_api_key: None,
            assessment_api_key: None,
            generation_model: default_generation_model(),
            assessment_model: default_assessment_model(),
            generation_base_url: default_generation_base_url(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            call_to_action_threshold: default_call_to_action_threshold(),
            background_path: default_background_path(),
            personal_info_path: default_personal_info_path(),
            persona: PersonaConfig::default(),
        }
    }
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("generation_api_key", &redact(&self.generation_api_key))
            .field("assessment_api_key", &redact(&self.assessment_api_key))
            .field("generation_model", &self.generation_model)
            .field("assessment_model", &self.assessment_model)
            .field("generation_base_url", &self.generation_base_url)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("call_to_action_threshold", &self.call_to_action_threshold)
            .field("background_path", &self.background_path)
            .field("personal_info_path", &self.personal_info_path)
            .field("persona", &self.persona)
            .finish()
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl AppConfig {
    /// Load configuration from the default location with environment
    /// variable overrides (highest priority).
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;

        if config.generation_api_key.is_none() {
            config.generation_api_key = std::env::var("EMISSARY_OPENAI_API_KEY")
                .ok()
                .or_else(|| std::env::var("OPENAI_API_KEY").ok());
        }

        if config.assessment_api_key.is_none() {
            config.assessment_api_key = std::env::var("EMISSARY_GEMINI_API_KEY")
                .ok()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok());
        }

        if let Ok(model) = std::env::var("EMISSARY_GENERATION_MODEL") {
            config.generation_model = model;
        }

        if let Ok(model) = std::env::var("EMISSARY_ASSESSMENT_MODEL") {
            config.assessment_model = model;
        }

        if let Ok(path) = std::env::var("EMISSARY_BACKGROUND_PATH") {
            config.background_path = PathBuf::from(path);
        }

        if let Ok(path) = std::env::var("EMISSARY_PERSONAL_INFO_PATH") {
            config.personal_info_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".emissary")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError(
                "max_tokens must be greater than 0".into(),
            ));
        }

        if self.call_to_action_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "call_to_action_threshold must be at least 1".into(),
            ));
        }

        if self.generation_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "generation_model must not be empty".into(),
            ));
        }

        if self.assessment_model.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "assessment_model must not be empty".into(),
            ));
        }

        if self.persona.connection_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "persona.connection_url must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Check that both API keys are present. Called before the pipeline is
    /// constructed; serving queries without keys is not possible.
    pub fn require_api_keys(&self) -> Result<(), ConfigError> {
        if self.generation_api_key.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingSetting(
                "generation_api_key (or OPENAI_API_KEY)".into(),
            ));
        }
        if self.assessment_api_key.as_deref().unwrap_or("").is_empty() {
            return Err(ConfigError::MissingSetting(
                "assessment_api_key (or GEMINI_API_KEY)".into(),
            ));
        }
        Ok(())
    }

    /// Generate a default config TOML string (for the `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(windows)]
fn dirs_home() -> PathBuf {
    std::env::var("USERPROFILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(not(windows))]
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.call_to_action_threshold, 8);
        assert_eq!(config.max_tokens, 500);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.generation_model, "gpt-4o-mini");
    }

    #[test]
    fn loads_and_overrides_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
generation_model = "gpt-4o"
call_to_action_threshold = 3

[persona]
name = "Ada Example"
title = "CTO"
organization = "Example Corp"
connection_url = "https://www.linkedin.com/in/ada-example"
"#
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.generation_model, "gpt-4o");
        assert_eq!(config.call_to_action_threshold, 3);
        assert_eq!(config.persona.name, "Ada Example");
        // Untouched fields keep their defaults.
        assert_eq!(config.assessment_model, "gemini-2.0-flash-exp");
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let mut config = AppConfig::default();
        config.temperature = 3.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_threshold() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "call_to_action_threshold = 0").unwrap();
        assert!(AppConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn require_api_keys_reports_what_is_missing() {
        let mut config = AppConfig::default();
        config.generation_api_key = Some("sk-test".into());
        let err = config.require_api_keys().unwrap_err();
        assert!(err.to_string().contains("assessment_api_key"));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let mut config = AppConfig::default();
        config.generation_api_key = Some("sk-super-secret".into());
        let debug = format!("{config:?}");
        assert!(!debug.contains("sk-super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
