//! Bounty Core - Foundation crate for the bounty applier.
//!
//! This crate provides the shared listing types, error handling and
//! configuration management that the client, generator and harvester crates
//! depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths and env secrets
//! - [`types`] - Listing records, `ContactMethod`, `Cursor`, `ApplyOutcome`
//!
//! # Example
//!
//! ```rust
//! use bounty_core::{ContactMethod, Cursor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let method: ContactMethod = "discord".parse()?;
//! assert_eq!(method, ContactMethod::Discord);
//!
//! let cursor = Cursor::first_page().advance().ok_or("cursor overflow")?;
//! assert_eq!(cursor.offset(), 10);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    ApiConfig, AppConfig, ContactConfig, GeneratorConfig, HarvestConfig, Secret, SubmissionConfig,
    PROJECT_NAME_PLACEHOLDER,
};
pub use error::{BountyError, ConfigError, ConfigResult, Result};
pub use types::{
    ApplicationDraft, ApplyOutcome, ContactMethod, Cursor, ListingDetail, ListingId,
    ListingOwner, ListingSummary, PAGE_SIZE,
};
