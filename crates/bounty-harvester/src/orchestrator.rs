//! Submission orchestrator for applying to harvested listings.
//!
//! This module provides the `SubmissionOrchestrator` which walks the
//! harvested listings in order and, for each one, re-checks eligibility,
//! picks the contact method, generates an application and submits it. Each
//! listing is its own recoverable unit: a failure is recorded as a
//! [`ListingOutcome::Failed`] and the run moves on.

use crate::error::Result;
use crate::harvest::Harvester;
use crate::outcome::{FailureStage, ListingOutcome, RunSummary, SkipReason};
use bounty_client::{contact_method_from_reported, ListingClient};
use bounty_core::{ApplyOutcome, ListingDetail, ListingId, ListingSummary};
use bounty_llm::ApplicationGenerator;
use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Orchestrates detail checks, generation and submission for listings.
pub struct SubmissionOrchestrator {
    /// Marketplace client shared with the harvester
    client: Arc<ListingClient>,
    /// Application text generator
    generator: ApplicationGenerator,
    /// Pause between two submissions
    delay_between_applications: Duration,
}

impl SubmissionOrchestrator {
    /// Create a new submission orchestrator.
    #[must_use]
    pub fn new(client: Arc<ListingClient>, generator: ApplicationGenerator) -> Self {
        Self {
            client,
            generator,
            delay_between_applications: Duration::ZERO,
        }
    }

    /// Set the pause between two submissions.
    #[must_use]
    pub fn with_delay_between_applications(mut self, delay: Duration) -> Self {
        self.delay_between_applications = delay;
        self
    }

    /// Harvest all open listings, then process each of them.
    ///
    /// # Errors
    /// Only a harvest failure fails the run; per-listing failures are part
    /// of the returned summary.
    pub async fn run(&self, harvester: &Harvester) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        tracing::info!(%run_id, "Starting run");

        let listings = harvester.harvest().await?;
        let outcomes = self.submit_all(&listings).await;

        let summary = RunSummary {
            run_id,
            started_at,
            finished_at: Utc::now(),
            harvested: listings.len(),
            outcomes,
        };
        tracing::info!(%run_id, "{}", summary);
        Ok(summary)
    }

    /// Process listings sequentially, in order.
    pub async fn submit_all(&self, listings: &[ListingSummary]) -> Vec<ListingOutcome> {
        let mut outcomes = Vec::with_capacity(listings.len());
        let mut seen: HashSet<ListingId> = HashSet::new();
        let mut submitted_before = false;

        for listing in listings {
            if !seen.insert(listing.id) {
                tracing::debug!(listing_id = %listing.id, "Skipping duplicate listing");
                outcomes.push(ListingOutcome::Skipped {
                    listing_id: listing.id,
                    title: listing.title.clone(),
                    reason: SkipReason::Duplicate,
                });
                continue;
            }

            let outcome = self.process_listing(listing, &mut submitted_before).await;
            match &outcome {
                ListingOutcome::Applied { .. } => tracing::info!("{}", outcome),
                ListingOutcome::Skipped { .. } => tracing::debug!("{}", outcome),
                ListingOutcome::Rejected { .. } => tracing::warn!("{}", outcome),
                ListingOutcome::Failed { .. } => tracing::error!("{}", outcome),
            }
            outcomes.push(outcome);
        }

        outcomes
    }

    /// Run the pipeline for one listing.
    async fn process_listing(
        &self,
        listing: &ListingSummary,
        submitted_before: &mut bool,
    ) -> ListingOutcome {
        let failed = |title: &str, stage: FailureStage, reason: String| ListingOutcome::Failed {
            listing_id: listing.id,
            title: title.to_string(),
            stage,
            reason,
        };

        // State may have changed since the harvest, so always re-fetch
        let detail = match self
            .client
            .fetch_detail(&listing.slug, &listing.owner.username)
            .await
        {
            Ok(detail) => detail,
            Err(e) => return failed(&listing.title, FailureStage::Detail, e.to_string()),
        };

        match detail.has_current_user_applied {
            Some(false) => {}
            Some(true) => {
                return ListingOutcome::Skipped {
                    listing_id: listing.id,
                    title: detail.title,
                    reason: SkipReason::AlreadyApplied,
                }
            }
            None => {
                return failed(
                    &detail.title,
                    FailureStage::Eligibility,
                    "detail did not report prior application status".to_string(),
                )
            }
        }

        let contact_method = match contact_method_from_reported(detail.contact_method.as_deref())
        {
            Ok(method) => method,
            Err(e) => return failed(&detail.title, FailureStage::ContactMethod, e.to_string()),
        };

        let draft = match self.generator.generate(listing.id, &detail.title).await {
            Ok(draft) => draft,
            Err(e) => return failed(&detail.title, FailureStage::Generation, e.to_string()),
        };

        if *submitted_before && !self.delay_between_applications.is_zero() {
            tokio::time::sleep(self.delay_between_applications).await;
        }
        *submitted_before = true;

        match self
            .client
            .apply(contact_method, submission_id(listing, &detail), &draft.content)
            .await
        {
            Ok(ApplyOutcome::Applied) => ListingOutcome::Applied {
                listing_id: listing.id,
                title: detail.title,
                content: draft.content,
            },
            Ok(ApplyOutcome::Rejected { reason }) => ListingOutcome::Rejected {
                listing_id: listing.id,
                title: detail.title,
                reason,
            },
            Err(e) => failed(&detail.title, FailureStage::Submission, e.to_string()),
        }
    }
}

/// Identifier sent with the application: the harvested one, as search
/// reported it.
fn submission_id(listing: &ListingSummary, detail: &ListingDetail) -> ListingId {
    if listing.id != detail.id {
        tracing::warn!(
            harvested = %listing.id,
            detail = %detail.id,
            "Detail reported a different listing id"
        );
    }
    listing.id
}
