//! Shared types used across the bounty applier.
//!
//! This module defines the listing records exchanged with the marketplace,
//! the closed `ContactMethod` enumeration, the pagination `Cursor` and the
//! outcome of a submission.

use crate::error::BountyError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of listings requested per search page.
pub const PAGE_SIZE: u32 = 10;

/// Newtype for numeric listing identifiers assigned by the marketplace.
///
/// Accepted on the wire as a JSON number or a numeric string; always
/// serialized as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ListingId(i64);

impl ListingId {
    /// Create a new `ListingId`.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value.
    #[must_use]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl<'de> Deserialize<'de> for ListingId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Number(i64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Number(id) => Ok(Self(id)),
            Wire::Text(text) => text
                .trim()
                .parse()
                .map(Self)
                .map_err(|_| de::Error::custom(format!("listing id is not numeric: {text:?}"))),
        }
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of a listing as reported by search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingOwner {
    /// Handle of the user that posted the listing
    pub username: String,
}

/// A listing as returned by a search page.
///
/// Only used to key the detail fetch; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingSummary {
    /// Marketplace identifier
    pub id: ListingId,
    /// URL slug, unique per owner
    pub slug: String,
    /// Listing title
    pub title: String,
    /// Owning user
    #[serde(rename = "user")]
    pub owner: ListingOwner,
}

/// Detailed view of a listing, fetched right before deciding to apply.
///
/// Fields are kept as the provider reported them; validation is up to the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetail {
    /// Marketplace identifier
    pub id: ListingId,
    /// Listing title
    pub title: String,
    /// Preferred contact channel as a raw provider string
    #[serde(default)]
    pub contact_method: Option<String>,
    /// Whether the session user already applied to this listing
    #[serde(default)]
    pub has_current_user_applied: Option<bool>,
}

/// Channel an applicant supplies when applying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    /// Contact by email address
    Email,
    /// Contact by Discord handle
    Discord,
}

impl ContactMethod {
    /// Provider string for this method.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Discord => "discord",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = BountyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(Self::Email),
            "discord" => Ok(Self::Discord),
            _ => Err(BountyError::InvalidContactMethod(s.to_string())),
        }
    }
}

impl fmt::Display for ContactMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination offset into the search results.
///
/// The default value is the first page. Every successful page advances the
/// cursor by exactly [`PAGE_SIZE`]; a cursor never repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(u32);

impl Cursor {
    /// Cursor of the first page.
    #[must_use]
    pub fn first_page() -> Self {
        Self(0)
    }

    /// Cursor of the page following this one, or `None` once the offset
    /// would overflow.
    #[must_use]
    pub fn advance(self) -> Option<Self> {
        self.0.checked_add(PAGE_SIZE).map(Self)
    }

    /// Offset in listings from the start of the result set.
    #[must_use]
    pub fn offset(self) -> u32 {
        self.0
    }

    /// Value of the `after` search variable for this cursor.
    #[must_use]
    pub fn as_after(self) -> String {
        self.0.to_string()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generated application content for a single listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    /// Listing the draft was written for
    pub listing_id: ListingId,
    /// Free-text application body
    pub content: String,
}

/// Result of a submission the marketplace accepted at the transport level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplyOutcome {
    /// The application was created
    Applied,
    /// The marketplace answered with an error marker
    Rejected {
        /// Message reported by the marketplace
        reason: String,
    },
}

impl ApplyOutcome {
    /// Check if the application was created.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
