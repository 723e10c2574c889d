//! Application drafting from a prompt template.
//!
//! The prompt sent for a listing is a random 4-digit nonce followed by the
//! configured template with `[Project Name]` replaced by the listing title.
//! The nonce keeps otherwise identical prompts from producing identical
//! drafts across listings with the same title.

use crate::error::{LlmError, Result};
use crate::provider::{CompletionProvider, CompletionRequest};
use bounty_core::{ApplicationDraft, GeneratorConfig, ListingId, PROJECT_NAME_PLACEHOLDER};
use rand::Rng;
use std::sync::Arc;

const NONCE_RANGE: std::ops::RangeInclusive<u16> = 1000..=9999;

/// Prompt text with a `[Project Name]` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Create a template.
    ///
    /// # Errors
    /// Returns `InvalidTemplate` if the placeholder is missing.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(PROJECT_NAME_PLACEHOLDER) {
            return Err(LlmError::InvalidTemplate(format!(
                "missing {PROJECT_NAME_PLACEHOLDER}"
            )));
        }
        Ok(Self(template))
    }

    /// Substitute every placeholder with `title`.
    #[must_use]
    pub fn render(&self, title: &str) -> String {
        self.0.replace(PROJECT_NAME_PLACEHOLDER, title)
    }
}

/// Writes application drafts through a completion provider.
pub struct ApplicationGenerator {
    provider: Arc<dyn CompletionProvider>,
    template: PromptTemplate,
    model: Option<String>,
    temperature: f32,
    max_tokens: u32,
}

impl ApplicationGenerator {
    /// Create a generator with the default sampling settings.
    #[must_use]
    pub fn new(provider: Arc<dyn CompletionProvider>, template: PromptTemplate) -> Self {
        Self {
            provider,
            template,
            model: None,
            temperature: 0.7,
            max_tokens: 300,
        }
    }

    /// Create a generator from the `[generator]` config section.
    ///
    /// # Errors
    /// Returns error if the prompt template has no placeholder.
    pub fn from_config(
        provider: Arc<dyn CompletionProvider>,
        config: &GeneratorConfig,
    ) -> Result<Self> {
        let template = PromptTemplate::new(config.prompt_template.clone())?;
        Ok(Self::new(provider, template)
            .with_model(config.model.clone())
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens))
    }

    /// Set the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum tokens to generate.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Build the prompt for `title` with the given nonce.
    #[must_use]
    pub fn prompt_with_nonce(&self, nonce: u16, title: &str) -> String {
        format!("{nonce} {}", self.template.render(title))
    }

    /// Generate an application for a listing.
    ///
    /// The draft content is the provider's text, unmodified.
    pub async fn generate(&self, listing_id: ListingId, title: &str) -> Result<ApplicationDraft> {
        let nonce = rand::thread_rng().gen_range(NONCE_RANGE);
        let prompt = self.prompt_with_nonce(nonce, title);

        let mut request = CompletionRequest::new(prompt)
            .with_temperature(self.temperature)
            .with_max_tokens(self.max_tokens);
        if let Some(model) = &self.model {
            request = request.with_model(model.clone());
        }

        tracing::debug!(
            %listing_id,
            provider = self.provider.provider_id(),
            "Generating application"
        );
        let response = self.provider.complete(request).await?;

        Ok(ApplicationDraft {
            listing_id,
            content: response.text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CompletionResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Provider that records prompts and answers with a fixed text.
    struct EchoProvider {
        reply: String,
        prompts: Mutex<Vec<CompletionRequest>>,
    }

    #[async_trait]
    impl CompletionProvider for EchoProvider {
        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
            self.prompts.lock().expect("lock prompts").push(request);
            Ok(CompletionResponse {
                text: self.reply.clone(),
                model: "echo".to_string(),
                finish_reason: Some("stop".to_string()),
            })
        }

        fn provider_id(&self) -> &str {
            "echo"
        }
    }

    #[test]
    fn test_template_requires_placeholder() {
        assert!(matches!(
            PromptTemplate::new("Write an application."),
            Err(LlmError::InvalidTemplate(_))
        ));
    }

    #[test]
    fn test_template_renders_every_placeholder() {
        let template =
            PromptTemplate::new("Apply to [Project Name]. Mention [Project Name] twice.")
                .expect("valid template");
        assert_eq!(
            template.render("Discord bot"),
            "Apply to Discord bot. Mention Discord bot twice."
        );
    }

    #[test]
    fn test_prompt_with_nonce() {
        let provider = Arc::new(EchoProvider {
            reply: String::new(),
            prompts: Mutex::new(Vec::new()),
        });
        let template = PromptTemplate::new("Apply to [Project Name]").expect("valid template");
        let generator = ApplicationGenerator::new(provider, template);

        assert_eq!(
            generator.prompt_with_nonce(4821, "Landing page"),
            "4821 Apply to Landing page"
        );
    }

    #[tokio::test]
    async fn test_generate_returns_provider_text_unchanged() {
        let provider = Arc::new(EchoProvider {
            reply: "\n\nHello! I'd be glad to build this.\n".to_string(),
            prompts: Mutex::new(Vec::new()),
        });
        let template = PromptTemplate::new("Apply to [Project Name]").expect("valid template");
        let generator = ApplicationGenerator::new(provider.clone(), template)
            .with_model("gpt-3.5-turbo-instruct")
            .with_max_tokens(120);

        let draft = generator
            .generate(ListingId::new(7), "Landing page")
            .await
            .expect("generate");

        assert_eq!(draft.listing_id, ListingId::new(7));
        assert_eq!(draft.content, "\n\nHello! I'd be glad to build this.\n");

        let prompts = provider.prompts.lock().expect("lock prompts");
        let request = &prompts[0];
        let (nonce, rest) = request.prompt.split_once(' ').expect("nonce prefix");
        assert!(nonce.parse::<u16>().is_ok_and(|n| NONCE_RANGE.contains(&n)));
        assert_eq!(rest, "Apply to Landing page");
        assert_eq!(request.max_tokens, Some(120));
        assert_eq!(request.temperature, Some(0.7));
        assert_eq!(request.model.as_deref(), Some("gpt-3.5-turbo-instruct"));
    }
}
