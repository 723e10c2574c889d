//! Bounty Harvester - end-to-end application workflow.
//!
//! This crate harvests every open listing from the marketplace and applies
//! to the ones the session user has not applied to yet.
//!
//! # Features
//!
//! - Paginated harvest that stops on the first empty page, with an optional
//!   page limit
//! - Eligibility re-check against fresh listing detail
//! - Contact method selection and generated application text
//! - Per-listing failure isolation with a run summary
//!
//! Everything runs sequentially: one remote call at a time.
//!
//! # Example
//!
//! ```rust,ignore
//! use bounty_harvester::{Harvester, SubmissionOrchestrator};
//! use std::sync::Arc;
//!
//! let client = Arc::new(listing_client);
//! let harvester = Harvester::new(client.clone()).with_max_pages(Some(50));
//! let orchestrator = SubmissionOrchestrator::new(client, generator);
//!
//! let summary = orchestrator.run(&harvester).await?;
//! println!("{summary}");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod harvest;
pub mod orchestrator;
pub mod outcome;

// Re-export commonly used types
pub use error::{HarvestError, Result};
pub use harvest::Harvester;
pub use orchestrator::SubmissionOrchestrator;
pub use outcome::{FailureStage, ListingOutcome, RunSummary, SkipReason};
