//! Per-listing outcomes and the run summary.

use bounty_core::ListingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Why a listing was passed over without applying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SkipReason {
    /// The session user already applied
    AlreadyApplied,
    /// The listing appeared more than once in the harvest
    Duplicate,
}

/// Step of the per-listing pipeline that failed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FailureStage {
    /// Fetching the listing detail
    Detail,
    /// Deciding whether the listing is still open to us
    Eligibility,
    /// Mapping the preferred contact method
    ContactMethod,
    /// Generating the application text
    Generation,
    /// Submitting the application
    Submission,
}

impl fmt::Display for FailureStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::Detail => "detail",
            Self::Eligibility => "eligibility",
            Self::ContactMethod => "contact method",
            Self::Generation => "generation",
            Self::Submission => "submission",
        };
        f.write_str(stage)
    }
}

/// Outcome of processing one harvested listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ListingOutcome {
    /// Nothing was generated or submitted
    Skipped {
        /// Listing identifier
        listing_id: ListingId,
        /// Listing title
        title: String,
        /// Why it was skipped
        reason: SkipReason,
    },

    /// Application created
    Applied {
        /// Listing identifier
        listing_id: ListingId,
        /// Listing title
        title: String,
        /// Submitted application text
        content: String,
    },

    /// Submission reached the marketplace but was refused
    Rejected {
        /// Listing identifier
        listing_id: ListingId,
        /// Listing title
        title: String,
        /// Message reported by the marketplace
        reason: String,
    },

    /// A step failed; later listings are still processed
    Failed {
        /// Listing identifier
        listing_id: ListingId,
        /// Listing title
        title: String,
        /// Step that failed
        stage: FailureStage,
        /// Error message
        reason: String,
    },
}

impl ListingOutcome {
    /// Identifier of the listing this outcome belongs to.
    #[must_use]
    pub fn listing_id(&self) -> ListingId {
        match self {
            Self::Skipped { listing_id, .. }
            | Self::Applied { listing_id, .. }
            | Self::Rejected { listing_id, .. }
            | Self::Failed { listing_id, .. } => *listing_id,
        }
    }

    /// Check if the outcome is an application that was created
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Check if the outcome is a failure
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for ListingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped { title, reason, .. } => write!(f, "skipped {title} ({reason:?})"),
            Self::Applied { title, content, .. } => {
                write!(f, "Applied successfully to {title}, message: {content}")
            }
            Self::Rejected { title, reason, .. } => write!(f, "rejected by {title}: {reason}"),
            Self::Failed {
                title,
                stage,
                reason,
                ..
            } => write!(f, "Failed to apply to {title} during {stage}: {reason}"),
        }
    }
}

/// Everything one run did.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Run identifier used in logs
    pub run_id: Uuid,
    /// When the harvest started
    pub started_at: DateTime<Utc>,
    /// When the last listing was processed
    pub finished_at: DateTime<Utc>,
    /// Number of harvested summaries
    pub harvested: usize,
    /// Outcome per listing, in harvest order
    pub outcomes: Vec<ListingOutcome>,
}

impl RunSummary {
    /// Number of applications created.
    #[must_use]
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    /// Number of listings skipped.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ListingOutcome::Skipped { .. }))
            .count()
    }

    /// Number of submissions refused by the marketplace.
    #[must_use]
    pub fn rejected(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ListingOutcome::Rejected { .. }))
            .count()
    }

    /// Number of listings whose pipeline failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run {}: {} harvested, {} applied, {} skipped, {} rejected, {} failed",
            self.run_id,
            self.harvested,
            self.applied(),
            self.skipped(),
            self.rejected(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(id: i64) -> ListingOutcome {
        ListingOutcome::Applied {
            listing_id: ListingId::new(id),
            title: format!("Listing {id}"),
            content: "Hello".to_string(),
        }
    }

    #[test]
    fn test_outcome_predicates() {
        assert!(applied(1).is_applied());
        assert!(!applied(1).is_failure());

        let failed = ListingOutcome::Failed {
            listing_id: ListingId::new(2),
            title: "Listing 2".to_string(),
            stage: FailureStage::Generation,
            reason: "timeout".to_string(),
        };
        assert!(failed.is_failure());
        assert_eq!(failed.listing_id(), ListingId::new(2));
        assert_eq!(
            failed.to_string(),
            "Failed to apply to Listing 2 during generation: timeout"
        );
    }

    #[test]
    fn test_summary_counters() {
        let now = Utc::now();
        let summary = RunSummary {
            run_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            harvested: 4,
            outcomes: vec![
                applied(1),
                applied(2),
                ListingOutcome::Skipped {
                    listing_id: ListingId::new(3),
                    title: "Listing 3".to_string(),
                    reason: SkipReason::AlreadyApplied,
                },
                ListingOutcome::Rejected {
                    listing_id: ListingId::new(4),
                    title: "Listing 4".to_string(),
                    reason: "closed".to_string(),
                },
            ],
        };

        assert_eq!(summary.applied(), 2);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.rejected(), 1);
        assert_eq!(summary.failed(), 0);
        assert!(summary
            .to_string()
            .ends_with("4 harvested, 2 applied, 1 skipped, 1 rejected, 0 failed"));
    }
}
