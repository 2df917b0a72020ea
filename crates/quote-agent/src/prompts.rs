//! Prompt templates for quote generation
//!
//! Both prompts share the same system instruction and output format; they
//! differ in whether a topic is given and in sampling temperature.

use crate::Result;
use minijinja::{Environment, context};
use quote_llm::{CompletionRequest, Message};

/// System instruction shared by both prompts
pub const SYSTEM_PROMPT: &str =
    "You are a wise quote generator that creates original, inspirational quotes.";

/// Output token cap for a single quote
pub const MAX_TOKENS: usize = 150;

/// Temperature for topic quotes
pub const TOPIC_TEMPERATURE: f32 = 0.8;

/// Temperature for random quotes; higher for more variety
pub const RANDOM_TEMPERATURE: f32 = 0.9;

const TOPIC_TEMPLATE: &str = r#"Generate a single, original inspirational quote about {{ topic }}.
The quote should be:
- Meaningful and thought-provoking
- Concise (1-2 sentences maximum)
- Suitable for motivation or reflection
- Original (not a famous existing quote)

Format: Just return the quote with proper attribution like "Quote" - Anonymous

Topic: {{ topic }}"#;

const RANDOM_TEMPLATE: &str = r#"Generate a single, original inspirational quote on any topic you choose.
The quote should be:
- Meaningful and thought-provoking
- Concise (1-2 sentences maximum)
- Suitable for motivation or reflection
- Original (not a famous existing quote)
- On a randomly chosen topic ({{ example_topics | join(", ") }}, etc.)

Format: Just return the quote with proper attribution like "Quote" - Anonymous

Choose any inspiring topic you like!"#;

const EXAMPLE_TOPICS: [&str; 5] = ["success", "courage", "love", "growth", "wisdom"];

/// A rendered prompt plus its sampling parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
    pub max_tokens: usize,
}

impl QuotePrompt {
    /// Prompt for a quote about `topic`
    pub fn topic(topic: &str) -> Result<Self> {
        let user = render(TOPIC_TEMPLATE, context! { topic => topic })?;
        Ok(Self::new(user, TOPIC_TEMPERATURE))
    }

    /// Prompt for a quote on a topic the model picks
    pub fn random() -> Result<Self> {
        let user = render(RANDOM_TEMPLATE, context! { example_topics => EXAMPLE_TOPICS })?;
        Ok(Self::new(user, RANDOM_TEMPERATURE))
    }

    fn new(user: String, temperature: f32) -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            user,
            temperature,
            max_tokens: MAX_TOKENS,
        }
    }

    /// System and user messages in request order
    pub fn messages(&self) -> Vec<Message> {
        vec![Message::system(&self.system), Message::user(&self.user)]
    }

    /// Build the completion request for `model`
    pub fn to_request(&self, model: &str) -> CompletionRequest {
        CompletionRequest::builder(model)
            .messages(self.messages())
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .build()
    }
}

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    let env = Environment::new();
    Ok(env.render_str(template, ctx)?)
}
