//! Core error types for the bounty applier.
//!
//! `BountyError` covers failures of the shared domain types; configuration
//! failures have their own enum since they are fatal at startup.

use thiserror::Error;

/// Central error type for shared domain operations.
#[derive(Error, Debug)]
pub enum BountyError {
    /// Configuration could not be loaded or is incomplete
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// The provider reported a contact method outside the supported set
    #[error("invalid contact method: {0}")]
    InvalidContactMethod(String),

    /// A value failed a domain check
    #[error("invalid value: {0}")]
    Validation(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No home or XDG config directory on this system
    #[error("no config directory available; set BOUNTY_CONFIG")]
    NoConfigDir,

    /// Config file not found; there is no usable default for contact details
    #[error("no config file at {path}")]
    NotFound {
        /// Path that was tried
        path: String,
    },

    /// Not valid TOML or wrong field types
    #[error("malformed config file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Config file exists but could not be read
    #[error("reading config file: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is not set
    #[error("missing environment variable {name}")]
    MissingEnv {
        /// Variable name
        name: String,
    },

    /// A field is present but unusable
    #[error("{field}: {reason}")]
    InvalidValue {
        /// Dotted field path, e.g. `generator.temperature`
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Result type alias using `BountyError`.
pub type Result<T> = std::result::Result<T, BountyError>;

/// Result of loading or validating configuration.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
