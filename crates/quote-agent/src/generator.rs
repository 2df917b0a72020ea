//! Quote generation over a completion provider
//!
//! The generator never fails from the caller's point of view: every error
//! is logged and turned into a human-readable fallback reply.

use crate::telemetry::{GenerationOutcome, GenerationStart, NoopTelemetry, Telemetry};
use crate::{AgentError, QuotePrompt, Result};
use quote_llm::providers::{OpenAIConfig, OpenAIProvider};
use quote_llm::{LLMProvider, TokenUsage};
use quote_utils::OpenAISettings;
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Reply when no completion credential is configured
pub const UNAVAILABLE_MESSAGE: &str = "Sorry, the quote generation service is currently unavailable. Please check the OpenAI API key configuration.";

/// Reply when a random quote could not be generated
pub const RANDOM_FALLBACK: &str =
    "Sorry, I couldn't generate a random quote at the moment. Please try again later.";

/// Reply when a topic quote could not be generated
pub fn topic_fallback(topic: &str) -> String {
    format!("Sorry, I couldn't generate a quote about {topic} at the moment. Please try again later.")
}

const PREVIEW_CHARS: usize = 50;

/// Generates quotes through an optional completion provider
pub struct QuoteGenerator {
    provider: Option<Arc<dyn LLMProvider>>,
    model: String,
    telemetry: Arc<dyn Telemetry>,
}

impl QuoteGenerator {
    /// Create a generator; `None` means the service is unavailable
    pub fn new(provider: Option<Arc<dyn LLMProvider>>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            telemetry: Arc::new(NoopTelemetry),
        }
    }

    /// Build a generator backed by the OpenAI provider
    ///
    /// A missing key or a provider that fails to build leaves the generator
    /// unavailable instead of failing startup.
    pub fn from_settings(settings: &OpenAISettings) -> Self {
        let provider = match &settings.api_key {
            None => {
                error!("OPENAI_API_KEY not found in environment variables");
                None
            }
            Some(api_key) => {
                let config = OpenAIConfig::new(api_key)
                    .with_api_base(&settings.api_base)
                    .with_timeout(settings.timeout_secs);
                match OpenAIProvider::with_config(config) {
                    Ok(provider) => {
                        info!(model = %settings.model, api_base = %settings.api_base, "OpenAI client initialized");
                        Some(Arc::new(provider) as Arc<dyn LLMProvider>)
                    }
                    Err(e) => {
                        error!(error = %e, "Failed to initialize OpenAI client");
                        None
                    }
                }
            }
        };

        Self::new(provider, settings.model.clone())
    }

    /// Attach a telemetry backend
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Whether a completion provider is configured
    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn telemetry(&self) -> &Arc<dyn Telemetry> {
        &self.telemetry
    }

    /// Generate a quote about `topic`
    pub async fn generate_quote(&self, topic: &str, trace_id: &str) -> String {
        let Some(provider) = &self.provider else {
            return UNAVAILABLE_MESSAGE.to_string();
        };

        info!(topic, "Generating quote for topic");
        let result = match QuotePrompt::topic(topic) {
            Ok(prompt) => {
                self.complete(provider.as_ref(), &prompt, "quote_generation", trace_id)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(quote) => {
                info!(preview = %preview(&quote), "Generated quote");
                quote
            }
            Err(e) => {
                error!(topic, error = %e, "Error generating quote for topic");
                topic_fallback(topic)
            }
        }
    }

    /// Generate a quote on a topic of the model's choosing
    pub async fn random_quote(&self, trace_id: &str) -> String {
        let Some(provider) = &self.provider else {
            return UNAVAILABLE_MESSAGE.to_string();
        };

        info!("Generating random quote");
        let result = match QuotePrompt::random() {
            Ok(prompt) => {
                self.complete(provider.as_ref(), &prompt, "random_quote_generation", trace_id)
                    .await
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(quote) => {
                info!(preview = %preview(&quote), "Generated random quote");
                quote
            }
            Err(e) => {
                error!(error = %e, "Error generating random quote");
                RANDOM_FALLBACK.to_string()
            }
        }
    }

    /// Single completion call wrapped in generation telemetry
    async fn complete(
        &self,
        provider: &dyn LLMProvider,
        prompt: &QuotePrompt,
        name: &str,
        trace_id: &str,
    ) -> Result<String> {
        let request = prompt.to_request(&self.model);
        let generation_id = Uuid::new_v4().to_string();

        self.telemetry
            .on_generation_start(&GenerationStart {
                trace_id,
                generation_id: &generation_id,
                name,
                model: &self.model,
                input: &request.messages,
                temperature: prompt.temperature,
                max_tokens: prompt.max_tokens,
            })
            .await;

        let result: Result<(String, TokenUsage)> = match provider.complete(request).await {
            Ok(response) if response.text().is_empty() => Err(AgentError::EmptyCompletion),
            Ok(response) => Ok((response.text().to_string(), response.usage)),
            Err(e) => Err(e.into()),
        };

        let error_text = result.as_ref().err().map(ToString::to_string);
        let outcome = match &result {
            Ok((output, usage)) => GenerationOutcome::Success {
                output,
                usage: *usage,
            },
            Err(_) => GenerationOutcome::Failure {
                error: error_text.as_deref().unwrap_or_default(),
            },
        };
        self.telemetry
            .on_generation_end(trace_id, &generation_id, &outcome)
            .await;

        let (quote, usage) = result?;
        debug!(total_tokens = usage.total(), "Token usage");
        Ok(quote)
    }
}

fn preview(text: &str) -> String {
    let head: String = text.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}
