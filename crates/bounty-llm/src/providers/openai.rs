//! `OpenAI` text-completions provider.
//!
//! Talks to the legacy `/completions` endpoint: one prompt in, a list of
//! choices out. Only the first choice is used.

use crate::error::{LlmError, Result};
use crate::provider::{CompletionProvider, CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use bounty_core::{GeneratorConfig, Secret};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "openai";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
const TIMEOUT: Duration = Duration::from_secs(60);

/// Completions client authenticated with a bearer key.
pub struct OpenAiProvider {
    api_key: Secret,
    model: String,
    base_url: String,
    client: Client,
}

impl OpenAiProvider {
    /// Provider for the default model on the public endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_model(api_key, DEFAULT_MODEL)
    }

    /// Provider for `model` on the public endpoint.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            api_key: Secret::new(api_key),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        })
    }

    /// Provider configured by the `[generator]` section.
    ///
    /// # Errors
    /// Returns `MissingApiKey` if no key was loaded from the environment.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let api_key = config.api_key.as_ref().ok_or_else(|| LlmError::MissingApiKey {
            provider: PROVIDER.to_string(),
        })?;
        let provider = Self::with_model(api_key.expose(), config.model.clone())?;
        Ok(provider.with_base_url(&config.base_url))
    }

    /// Use another `OpenAI`-compatible server.
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn body<'a>(&'a self, request: &'a CompletionRequest) -> CompletionsBody<'a> {
        CompletionsBody {
            model: request.model.as_deref().unwrap_or(&self.model),
            prompt: &request.prompt,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let response = self
            .client
            .post(format!("{}/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&self.body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), message));
        }

        let bytes = response.bytes().await?;
        let completions: Completions = serde_json::from_slice(&bytes)?;
        first_choice(completions)
    }

    fn provider_id(&self) -> &str {
        PROVIDER
    }
}

fn status_error(status: u16, message: String) -> LlmError {
    match status {
        401 | 403 => LlmError::Unauthorized {
            provider: PROVIDER.to_string(),
        },
        _ => LlmError::Provider {
            provider: PROVIDER.to_string(),
            status,
            message,
        },
    }
}

fn first_choice(completions: Completions) -> Result<CompletionResponse> {
    let choice = completions
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::NoCompletion {
            provider: PROVIDER.to_string(),
        })?;

    Ok(CompletionResponse {
        text: choice.text,
        model: completions.model,
        finish_reason: choice.finish_reason,
    })
}

#[derive(Debug, Serialize)]
struct CompletionsBody<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct Completions {
    #[serde(default)]
    model: String,
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    text: String,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model() {
        let provider = OpenAiProvider::new("test-key").expect("create provider");
        assert_eq!(provider.provider_id(), "openai");
        assert_eq!(provider.model, "gpt-3.5-turbo-instruct");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_from_config() {
        let result = OpenAiProvider::from_config(&GeneratorConfig::default());
        assert!(matches!(result, Err(LlmError::MissingApiKey { .. })));

        let config = GeneratorConfig {
            api_key: Some(Secret::new("sk-test")),
            base_url: "http://localhost:8080/v1/".to_string(),
            model: "davinci-002".to_string(),
            ..GeneratorConfig::default()
        };
        let provider = OpenAiProvider::from_config(&config).expect("create provider");
        assert_eq!(provider.model, "davinci-002");
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_body_omits_unset_sampling() {
        let provider = OpenAiProvider::new("test-key").expect("create provider");
        let request = CompletionRequest::new("1234 Write an application");

        let body = serde_json::to_value(provider.body(&request)).expect("serialize body");
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-3.5-turbo-instruct",
                "prompt": "1234 Write an application"
            })
        );

        let request = request.with_model("davinci-002").with_max_tokens(300);
        let body = serde_json::to_value(provider.body(&request)).expect("serialize body");
        assert_eq!(body["model"], "davinci-002");
        assert_eq!(body["max_tokens"], 300);
    }

    #[test]
    fn test_first_choice_text_is_verbatim() {
        let completions: Completions = serde_json::from_str(
            r#"{
                "model": "gpt-3.5-turbo-instruct",
                "choices": [
                    { "text": "\n\nHi, I'd love to help.  ", "finish_reason": "stop" },
                    { "text": "second", "finish_reason": "stop" }
                ]
            }"#,
        )
        .expect("parse response");

        let response = first_choice(completions).expect("first choice");
        assert_eq!(response.text, "\n\nHi, I'd love to help.  ");
        assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    }

    #[test]
    fn test_no_choices() {
        let completions = Completions {
            model: String::new(),
            choices: Vec::new(),
        };
        assert!(matches!(
            first_choice(completions),
            Err(LlmError::NoCompletion { .. })
        ));
    }

    #[test]
    fn test_status_error_mapping() {
        assert!(matches!(
            status_error(403, String::new()),
            LlmError::Unauthorized { .. }
        ));
        assert!(matches!(
            status_error(500, "oops".to_string()),
            LlmError::Provider { status: 500, .. }
        ));
    }
}
