//! Shared fixtures: a scripted marketplace transport and a canned provider.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bounty_client::{
    ClientError, GraphqlRequest, ListingClient, Operation, QueryTransport, TransportResponse,
};
use bounty_core::ContactConfig;
use bounty_llm::{
    ApplicationGenerator, CompletionProvider, CompletionRequest, CompletionResponse, LlmError,
    PromptTemplate,
};
use serde_json::{json, Value};

/// Transport answering from per-operation queues and recording every request.
#[derive(Default)]
pub struct ScriptedTransport {
    queues: Mutex<HashMap<Operation, VecDeque<TransportResponse>>>,
    fallback: Mutex<HashMap<Operation, TransportResponse>>,
    requests: Mutex<Vec<GraphqlRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue a response for the next call of `operation`.
    pub fn push(&self, operation: Operation, status: u16, body: Value) {
        self.queues
            .lock()
            .expect("lock queues")
            .entry(operation)
            .or_default()
            .push_back(TransportResponse { status, body });
    }

    /// Answer every unscripted call of `operation` with this response.
    pub fn always(&self, operation: Operation, status: u16, body: Value) {
        self.fallback
            .lock()
            .expect("lock fallback")
            .insert(operation, TransportResponse { status, body });
    }

    pub fn requests(&self, operation: Operation) -> Vec<GraphqlRequest> {
        self.requests
            .lock()
            .expect("lock requests")
            .iter()
            .filter(|r| r.operation == operation)
            .cloned()
            .collect()
    }

    pub fn count(&self, operation: Operation) -> usize {
        self.requests(operation).len()
    }
}

#[async_trait]
impl QueryTransport for ScriptedTransport {
    async fn execute(&self, request: &GraphqlRequest) -> bounty_client::Result<TransportResponse> {
        self.requests
            .lock()
            .expect("lock requests")
            .push(request.clone());

        let queued = self
            .queues
            .lock()
            .expect("lock queues")
            .get_mut(&request.operation)
            .and_then(VecDeque::pop_front);
        if let Some(response) = queued {
            return Ok(response);
        }

        self.fallback
            .lock()
            .expect("lock fallback")
            .get(&request.operation)
            .cloned()
            .ok_or_else(|| ClientError::Internal(format!("unscripted {}", request.operation)))
    }
}

/// Provider that replies `"Application for <prompt>"` and counts calls.
#[derive(Default)]
pub struct CannedProvider {
    pub fail: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl CannedProvider {
    pub fn calls(&self) -> usize {
        self.prompts.lock().expect("lock prompts").len()
    }
}

#[async_trait]
impl CompletionProvider for CannedProvider {
    async fn complete(&self, request: CompletionRequest) -> bounty_llm::Result<CompletionResponse> {
        self.prompts
            .lock()
            .expect("lock prompts")
            .push(request.prompt.clone());
        if self.fail {
            return Err(LlmError::Provider {
                provider: "canned".to_string(),
                status: 500,
                message: "generation unavailable".to_string(),
            });
        }
        Ok(CompletionResponse {
            text: format!("Application for {}", request.prompt),
            model: "canned".to_string(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_id(&self) -> &str {
        "canned"
    }
}

pub fn contact() -> ContactConfig {
    ContactConfig {
        email: Some("dev@example.com".to_string()),
        discord: Some("dev#0001".to_string()),
    }
}

pub fn client(transport: &Arc<ScriptedTransport>) -> Arc<ListingClient> {
    Arc::new(ListingClient::new(transport.clone(), contact()))
}

pub fn generator(provider: &Arc<CannedProvider>) -> ApplicationGenerator {
    let template = PromptTemplate::new("Apply to [Project Name]").expect("valid template");
    ApplicationGenerator::new(provider.clone(), template)
}

/// Search response with listings `first..first + count`.
pub fn search_page(first: i64, count: i64) -> Value {
    let items: Vec<Value> = (first..first + count)
        .map(|id| {
            json!({
                "id": id,
                "slug": format!("listing-{id}"),
                "title": format!("Listing {id}"),
                "user": { "username": format!("owner-{id}") }
            })
        })
        .collect();
    json!([{ "data": { "bountySearch": { "items": items } } }])
}

pub fn detail(id: i64, contact_method: &str, applied: bool) -> Value {
    json!([{
        "data": {
            "bountyByUrl": {
                "id": id,
                "title": format!("Listing {id}"),
                "contactMethod": contact_method,
                "hasCurrentUserApplied": applied
            }
        }
    }])
}

pub fn application_created() -> Value {
    json!([{
        "data": { "createBountyApplication": { "__typename": "BountyApplication", "id": 1 } }
    }])
}
