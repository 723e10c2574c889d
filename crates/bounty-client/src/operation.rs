//! Remote operations understood by the marketplace endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Named GraphQL operations used by the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Paginated search of open listings
    #[serde(rename = "BountiesPageSearch")]
    SearchBounties,
    /// Detail of a single listing
    #[serde(rename = "BountyPage")]
    BountyPage,
    /// Application submission
    #[serde(rename = "CreateApplication")]
    CreateApplication,
}

impl Operation {
    /// Operation name sent as `operationName`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SearchBounties => "BountiesPageSearch",
            Self::BountyPage => "BountyPage",
            Self::CreateApplication => "CreateApplication",
        }
    }

    /// Query document sent with the operation.
    #[must_use]
    pub fn document(self) -> &'static str {
        match self {
            Self::SearchBounties => SEARCH_BOUNTIES_QUERY,
            Self::BountyPage => BOUNTY_PAGE_QUERY,
            Self::CreateApplication => CREATE_APPLICATION_MUTATION,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const SEARCH_BOUNTIES_QUERY: &str = r"query BountiesPageSearch($input: BountySearchInput!) {
  bountySearch(input: $input) {
    __typename
    ... on BountySearchConnection {
      items {
        id
        slug
        title
        status
        cycles
        deadline
        user {
          id
          username
        }
      }
      pageInfo {
        hasNextPage
        nextCursor
      }
    }
    ... on UserError {
      message
    }
  }
}";

const BOUNTY_PAGE_QUERY: &str = r"query BountyPage($input: BountyByUrlInput!) {
  bountyByUrl(input: $input) {
    id
    title
    description
    status
    cycles
    deadline
    contactMethod
    hasCurrentUserApplied
    user {
      id
      username
    }
  }
}";

const CREATE_APPLICATION_MUTATION: &str = r"mutation CreateApplication($input: CreateBountyApplicationInput!) {
  createBountyApplication(input: $input) {
    __typename
    ... on BountyApplication {
      id
      status
    }
    ... on UserError {
      message
    }
    ... on UnauthorizedError {
      message
    }
  }
}";
