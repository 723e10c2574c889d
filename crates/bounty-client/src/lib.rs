//! Bounty Client - typed access to the marketplace's bounty operations.
//!
//! This crate wraps the marketplace's single GraphQL endpoint with the three
//! operations the applier needs: search, detail fetch and apply. Transport
//! failures, empty result pages and unsupported contact methods are kept
//! apart in [`ClientError`] so the harvest loop can tell "no more results"
//! from "request failed".
//!
//! # Example
//!
//! ```rust,ignore
//! use bounty_client::{HttpTransport, ListingClient};
//! use std::sync::Arc;
//!
//! let transport = HttpTransport::from_config(&config.api)?;
//! let client = ListingClient::new(Arc::new(transport), config.contact.clone());
//!
//! let page = client.search(None, Some("discord bot")).await?;
//! let detail = client.fetch_detail(&page[0].slug, &page[0].owner.username).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod client;
pub mod error;
#[allow(missing_docs)]
pub mod fingerprint;
pub mod operation;
pub mod transport;

// Re-export commonly used types
pub use client::{contact_method_from_reported, ListingClient};
pub use error::{ClientError, Result};
pub use fingerprint::ClientFingerprint;
pub use operation::Operation;
pub use transport::{GraphqlRequest, HttpTransport, QueryTransport, TransportResponse};
