//! Typed marketplace operations.
//!
//! `ListingClient` wraps a [`QueryTransport`] with the three operations the
//! workflow needs and maps raw responses onto the listing types and the
//! [`ClientError`] taxonomy.

use crate::error::{ClientError, Result};
use crate::operation::Operation;
use crate::transport::{GraphqlRequest, QueryTransport, TransportResponse};
use bounty_core::{
    ApplyOutcome, ContactConfig, ContactMethod, Cursor, ListingDetail, ListingId, ListingSummary,
    PAGE_SIZE,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// Client for searching, inspecting and applying to listings.
///
/// All calls go through the same transport, so they share one session.
pub struct ListingClient {
    transport: Arc<dyn QueryTransport>,
    contact: ContactConfig,
}

impl ListingClient {
    /// Create a client over `transport` that applies with the given contact values.
    #[must_use]
    pub fn new(transport: Arc<dyn QueryTransport>, contact: ContactConfig) -> Self {
        Self { transport, contact }
    }

    /// Fetch one page of open listings, newest first.
    ///
    /// # Errors
    /// - `RequestFailed` on a non-2xx response
    /// - `ExhaustedResults` when the page is empty
    pub async fn search(
        &self,
        cursor: Option<Cursor>,
        query: Option<&str>,
    ) -> Result<Vec<ListingSummary>> {
        let variables = search_variables(cursor, query);
        let response = self
            .send(GraphqlRequest::new(Operation::SearchBounties, variables))
            .await?;

        let items = payload(&response, Operation::SearchBounties, "/0/data/bountySearch/items")?;
        let listings: Vec<ListingSummary> = serde_json::from_value(items.clone())?;

        if listings.is_empty() {
            tracing::debug!(cursor = ?cursor.map(Cursor::offset), "Search page empty");
            return Err(ClientError::ExhaustedResults);
        }

        tracing::debug!(
            cursor = ?cursor.map(Cursor::offset),
            count = listings.len(),
            "Fetched search page"
        );
        Ok(listings)
    }

    /// Fetch the detail record of a listing.
    ///
    /// The record is returned as reported; missing fields are left for the
    /// caller to judge.
    ///
    /// # Errors
    /// - `RequestFailed` on a non-2xx response
    /// - `ListingNotFound` when the listing no longer exists
    pub async fn fetch_detail(&self, slug: &str, owner: &str) -> Result<ListingDetail> {
        let variables = json!({
            "input": {
                "slug": slug,
                "username": owner,
            }
        });
        let response = self
            .send(GraphqlRequest::new(Operation::BountyPage, variables))
            .await?;

        let detail = payload(&response, Operation::BountyPage, "/0/data/bountyByUrl")?;
        if detail.is_null() {
            return Err(ClientError::ListingNotFound {
                slug: slug.to_string(),
                owner: owner.to_string(),
            });
        }

        Ok(serde_json::from_value(detail.clone())?)
    }

    /// Submit an application for a listing.
    ///
    /// The contact value configured for `contact_method` is attached. A 2xx
    /// answer carrying an error marker is reported as
    /// [`ApplyOutcome::Rejected`].
    ///
    /// # Errors
    /// - `InvalidContactMethod` if no value is configured for the method;
    ///   nothing is sent in that case
    /// - `RequestFailed` on a non-2xx response
    pub async fn apply(
        &self,
        contact_method: ContactMethod,
        listing_id: ListingId,
        content: &str,
    ) -> Result<ApplyOutcome> {
        let contact_info = self.contact.value_for(contact_method).ok_or_else(|| {
            ClientError::InvalidContactMethod(format!("no {contact_method} contact configured"))
        })?;

        let variables = json!({
            "input": {
                "bountyId": listing_id.get(),
                "content": content,
                "contactInfo": contact_info,
            }
        });
        let response = self
            .send(GraphqlRequest::new(Operation::CreateApplication, variables))
            .await?;

        match rejection_reason(&response.body) {
            Some(reason) => {
                tracing::warn!(%listing_id, %reason, "Application rejected");
                Ok(ApplyOutcome::Rejected { reason })
            }
            None => Ok(ApplyOutcome::Applied),
        }
    }

    async fn send(&self, request: GraphqlRequest) -> Result<TransportResponse> {
        let operation = request.operation;
        let response = self.transport.execute(&request).await?;

        if !response.is_success() {
            tracing::error!(%operation, status = response.status, "Marketplace request failed");
            return Err(ClientError::RequestFailed {
                operation,
                status: response.status,
            });
        }
        Ok(response)
    }
}

/// Map the provider-reported contact string onto [`ContactMethod`].
///
/// # Errors
/// Returns `InvalidContactMethod` for a missing or unrecognized value.
pub fn contact_method_from_reported(reported: Option<&str>) -> Result<ContactMethod> {
    let reported = reported
        .ok_or_else(|| ClientError::InvalidContactMethod("not reported".to_string()))?;
    Ok(reported.parse::<ContactMethod>()?)
}

fn search_variables(cursor: Option<Cursor>, query: Option<&str>) -> Value {
    let mut input = json!({
        "count": PAGE_SIZE,
        "listingState": "listed",
        "order": "creationDateDescending",
        "searchQuery": query.unwrap_or_default(),
        "statuses": ["open"],
    });
    if let Some(cursor) = cursor {
        input["after"] = Value::String(cursor.as_after());
    }
    json!({ "input": input })
}

fn payload<'a>(
    response: &'a TransportResponse,
    operation: Operation,
    pointer: &str,
) -> Result<&'a Value> {
    response.body.pointer(pointer).ok_or_else(|| {
        let message = first_error_message(&response.body)
            .unwrap_or_else(|| format!("missing {pointer}"));
        ClientError::MalformedResponse { operation, message }
    })
}

/// Error marker of an application response, if any.
///
/// Checked at the top level, then in element 0, then as an error-typed
/// mutation payload.
fn rejection_reason(body: &Value) -> Option<String> {
    if let Some(message) = first_error_message(body) {
        return Some(message);
    }

    let result = body.pointer("/0/data/createBountyApplication")?;
    let typename = result.get("__typename").and_then(Value::as_str)?;
    typename.ends_with("Error").then(|| {
        result
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(typename)
            .to_string()
    })
}

fn first_error_message(body: &Value) -> Option<String> {
    error_marker(body).or_else(|| body.get(0).and_then(error_marker))
}

/// `error` or `errors` key of one response object; `null` is not a marker.
fn error_marker(value: &Value) -> Option<String> {
    if let Some(error) = value.get("error").filter(|e| !e.is_null()) {
        return Some(describe_error(error));
    }
    match value.get("errors")? {
        Value::Null => None,
        Value::Array(errors) => errors.first().map(describe_error),
        other => Some(describe_error(other)),
    }
}

fn describe_error(error: &Value) -> String {
    error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .map_or_else(|| error.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_variables_first_page() {
        let variables = search_variables(None, None);
        let input = &variables["input"];

        assert_eq!(input["count"], 10);
        assert_eq!(input["listingState"], "listed");
        assert_eq!(input["order"], "creationDateDescending");
        assert_eq!(input["searchQuery"], "");
        assert_eq!(input["statuses"], json!(["open"]));
        assert!(input.get("after").is_none());
    }

    #[test]
    fn test_search_variables_with_cursor_and_query() {
        let cursor = Cursor::first_page()
            .advance()
            .and_then(Cursor::advance)
            .expect("offset in range");
        let variables = search_variables(Some(cursor), Some("rust"));

        assert_eq!(variables["input"]["after"], "20");
        assert_eq!(variables["input"]["searchQuery"], "rust");
    }

    #[test]
    fn test_contact_method_from_reported() {
        assert_eq!(
            contact_method_from_reported(Some("email")).ok(),
            Some(ContactMethod::Email)
        );
        assert_eq!(
            contact_method_from_reported(Some("discord")).ok(),
            Some(ContactMethod::Discord)
        );
        assert!(matches!(
            contact_method_from_reported(Some("carrier pigeon")),
            Err(ClientError::InvalidContactMethod(_))
        ));
        assert!(matches!(
            contact_method_from_reported(None),
            Err(ClientError::InvalidContactMethod(_))
        ));
    }

    #[test]
    fn test_rejection_reason_accepts_clean_response() {
        let body = json!([{
            "data": {
                "createBountyApplication": { "__typename": "BountyApplication", "id": 3 }
            }
        }]);
        assert_eq!(rejection_reason(&body), None);
    }

    #[test]
    fn test_rejection_reason_detects_markers() {
        let top_level = json!({ "error": "Not logged in" });
        assert_eq!(rejection_reason(&top_level).as_deref(), Some("Not logged in"));

        let envelope = json!({ "errors": [{ "message": "Must provide query string." }] });
        assert_eq!(
            rejection_reason(&envelope).as_deref(),
            Some("Must provide query string.")
        );

        let scalar_errors = json!({ "errors": "forbidden" });
        assert_eq!(rejection_reason(&scalar_errors).as_deref(), Some("forbidden"));

        let graphql_errors = json!([{ "errors": [{ "message": "Bounty is closed" }], "data": null }]);
        assert_eq!(
            rejection_reason(&graphql_errors).as_deref(),
            Some("Bounty is closed")
        );

        let user_error = json!([{
            "data": {
                "createBountyApplication": {
                    "__typename": "UserError",
                    "message": "You already applied"
                }
            }
        }]);
        assert_eq!(
            rejection_reason(&user_error).as_deref(),
            Some("You already applied")
        );
    }

    #[test]
    fn test_rejection_reason_ignores_null_markers() {
        let body = json!([{
            "errors": null,
            "data": {
                "createBountyApplication": { "__typename": "BountyApplication", "id": 3 }
            }
        }]);
        assert_eq!(rejection_reason(&body), None);
    }

    #[test]
    fn test_payload_reports_graphql_error() {
        let response = TransportResponse {
            status: 200,
            body: json!([{ "errors": [{ "message": "rate limited" }] }]),
        };

        let err = payload(&response, Operation::SearchBounties, "/0/data/bountySearch/items")
            .expect_err("missing payload");
        assert!(matches!(err, ClientError::MalformedResponse { ref message, .. } if message == "rate limited"));
    }
}
