//! Configuration management for the bounty applier.
//!
//! Provides TOML-based configuration with XDG-compliant paths. Session and
//! API secrets are never read from the file; they come from the environment
//! and are zeroed on drop.

use crate::error::{ConfigError, ConfigResult};
use crate::types::ContactMethod;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Placeholder in the prompt template replaced by the listing title.
pub const PROJECT_NAME_PLACEHOLDER: &str = "[Project Name]";

/// Environment variable pointing at an explicit config file.
const CONFIG_PATH_ENV: &str = "BOUNTY_CONFIG";

/// Session cookie variables, in lookup order.
const SESSION_COOKIE_ENV: [&str; 2] = ["BOUNTY_SESSION_COOKIE", "cookie"];

/// Generator API key variables, in lookup order.
const API_KEY_ENV: [&str; 2] = ["OPENAI_API_KEY", "openai_apikey"];

/// A secret string that is wiped from memory on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(Zeroizing<String>);

impl Secret {
    /// Wrap a secret value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(Zeroizing::new(value.into()))
    }

    /// Access the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Main application configuration.
///
/// Loaded from `$BOUNTY_CONFIG` or `~/.config/bounty/config.toml` (or
/// platform equivalent). Unlike most settings files, a missing file is an
/// error: contact details and the prompt have no sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Marketplace endpoint and session settings
    pub api: ApiConfig,
    /// Contact values attached to applications
    pub contact: ContactConfig,
    /// Application text generation settings
    pub generator: GeneratorConfig,
    /// Search pagination settings
    pub harvest: HarvestConfig,
    /// Submission pacing settings
    pub submission: SubmissionConfig,
}

impl AppConfig {
    /// Load configuration from the resolved config path.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File does not exist or cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.display().to_string(),
            });
        }

        tracing::debug!("Loading config from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration and fill in secrets from the process environment.
    ///
    /// Supports the following environment variables:
    /// - `BOUNTY_CONFIG`: Path of the config file
    /// - `BOUNTY_SESSION_COOKIE` (or `cookie`): Marketplace session cookie
    /// - `OPENAI_API_KEY` (or `openai_apikey`): Generator API key
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env(|name| std::env::var(name).ok());
        config.validate()?;
        Ok(config)
    }

    /// Fill secrets using the given variable lookup.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
        };

        if let Some(cookie) = first(&SESSION_COOKIE_ENV) {
            tracing::debug!("Session cookie loaded from environment");
            self.api.session_cookie = Some(Secret::new(cookie));
        }

        if let Some(key) = first(&API_KEY_ENV) {
            tracing::debug!("Generator API key loaded from environment");
            self.generator.api_key = Some(Secret::new(key));
        }
    }

    /// Check that the loaded configuration can drive a run.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.api.session_cookie.is_none() {
            return Err(ConfigError::MissingEnv {
                name: SESSION_COOKIE_ENV[0].to_string(),
            });
        }

        if self.generator.api_key.is_none() {
            return Err(ConfigError::MissingEnv {
                name: API_KEY_ENV[0].to_string(),
            });
        }

        if !self.generator.prompt_template.contains(PROJECT_NAME_PLACEHOLDER) {
            return Err(ConfigError::InvalidValue {
                field: "generator.prompt_template".to_string(),
                reason: format!("must contain the {PROJECT_NAME_PLACEHOLDER} placeholder"),
            });
        }

        if self.contact.email.is_none() && self.contact.discord.is_none() {
            return Err(ConfigError::InvalidValue {
                field: "contact".to_string(),
                reason: "at least one of email or discord must be set".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.generator.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "generator.temperature".to_string(),
                reason: format!("must be within 0.0..=2.0, got {}", self.generator.temperature),
            });
        }

        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// `$BOUNTY_CONFIG` wins; otherwise XDG: `~/.config/bounty/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("com", "bounty", "bounty").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Marketplace endpoint and session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// GraphQL endpoint all operations are posted to
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Fixed user agent; randomized per session when unset
    pub user_agent: Option<String>,
    /// Fixed client version header; randomized per session when unset
    pub client_version: Option<u32>,
    /// Session cookie (from the environment, never the file)
    #[serde(skip)]
    pub session_cookie: Option<Secret>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://replit.com/graphql".to_string(),
            timeout_secs: 30,
            user_agent: None,
            client_version: None,
            session_cookie: None,
        }
    }
}

/// Contact values attached to applications.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// Email address sent for listings preferring email
    #[serde(alias = "contact_email")]
    pub email: Option<String>,
    /// Discord handle sent for listings preferring Discord
    #[serde(alias = "contact_discord")]
    pub discord: Option<String>,
}

impl ContactConfig {
    /// Configured value for a contact method, if any.
    #[must_use]
    pub fn value_for(&self, method: ContactMethod) -> Option<&str> {
        let value = match method {
            ContactMethod::Email => self.email.as_deref(),
            ContactMethod::Discord => self.discord.as_deref(),
        };
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Application text generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Completions API base URL
    pub base_url: String,
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_tokens: u32,
    /// Prompt with a `[Project Name]` placeholder
    #[serde(alias = "gpt_prompt")]
    pub prompt_template: String,
    /// API key (from the environment, never the file)
    #[serde(skip)]
    pub api_key: Option<Secret>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-3.5-turbo-instruct".to_string(),
            temperature: 0.7,
            max_tokens: 300,
            prompt_template: String::new(),
            api_key: None,
        }
    }
}

/// Search pagination settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    /// Free-text filter passed to search
    pub search_query: Option<String>,
    /// Stop after this many pages even if the provider keeps returning results
    pub max_pages: Option<u32>,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            search_query: None,
            max_pages: Some(100),
        }
    }
}

/// Submission pacing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Pause between two submissions in milliseconds
    pub delay_between_applications_ms: u64,
}
