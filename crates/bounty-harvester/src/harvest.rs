//! Harvest loop collecting every open listing.
//!
//! Search pages are requested with an advancing cursor until the marketplace
//! returns an empty page. A non-success response aborts the whole harvest;
//! partial results are not returned in that case.

use crate::error::Result;
use bounty_client::{ClientError, ListingClient};
use bounty_core::{Cursor, HarvestConfig, ListingSummary};
use std::sync::Arc;

/// Collects listing summaries page by page.
pub struct Harvester {
    client: Arc<ListingClient>,
    query: Option<String>,
    max_pages: Option<u32>,
}

impl Harvester {
    /// Create an unbounded harvester without a search filter.
    ///
    /// Without a page limit the loop only ends on an empty page.
    #[must_use]
    pub fn new(client: Arc<ListingClient>) -> Self {
        Self {
            client,
            query: None,
            max_pages: None,
        }
    }

    /// Create a harvester from the `[harvest]` config section.
    #[must_use]
    pub fn from_config(client: Arc<ListingClient>, config: &HarvestConfig) -> Self {
        let harvester = Self::new(client).with_max_pages(config.max_pages);
        match &config.search_query {
            Some(query) => harvester.with_query(query.clone()),
            None => harvester,
        }
    }

    /// Filter listings by a free-text query.
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into()).filter(|q: &String| !q.trim().is_empty());
        self
    }

    /// Stop after `max_pages` non-empty pages.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: Option<u32>) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Fetch pages until the results are exhausted.
    ///
    /// # Errors
    /// Returns the first failure other than [`ClientError::ExhaustedResults`].
    pub async fn harvest(&self) -> Result<Vec<ListingSummary>> {
        let mut listings = Vec::new();
        let mut cursor: Option<Cursor> = None;
        let mut pages: u32 = 0;

        loop {
            if self.max_pages.is_some_and(|max| pages >= max) {
                tracing::warn!(
                    pages,
                    listings = listings.len(),
                    "Page limit reached before results were exhausted"
                );
                break;
            }

            match self.client.search(cursor, self.query.as_deref()).await {
                Ok(page) => {
                    pages += 1;
                    tracing::info!(page = pages, count = page.len(), "Scraped listings");
                    listings.extend(page);
                    cursor = cursor.unwrap_or_default().advance();
                    if cursor.is_none() {
                        tracing::warn!(pages, "Search offset limit reached before results were exhausted");
                        break;
                    }
                }
                Err(ClientError::ExhaustedResults) => {
                    tracing::info!(pages, listings = listings.len(), "Reached end of results");
                    break;
                }
                Err(e) => {
                    tracing::error!(pages, "Harvest failed: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(listings)
    }
}
