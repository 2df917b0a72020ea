//! Inspirational quote agent
//!
//! A single-purpose agent: a short natural-language request is routed to
//! either a topic quote or a random quote, a fixed prompt is rendered, the
//! completion service is called once, and exactly one reply is delivered.
//!
//! - [`classifier`] decides random vs. topic
//! - [`topic`] pulls the topic out of the request text
//! - [`prompts`] renders the two prompt templates
//! - [`generator`] performs the completion call and owns the fallbacks
//! - [`executor`] adapts all of the above to the A2A executor contract
//! - [`telemetry`] reports traces and generations to Langfuse

pub mod card;
pub mod classifier;
pub mod error;
pub mod executor;
pub mod generator;
pub mod prompts;
pub mod telemetry;
pub mod topic;

#[cfg(test)]
mod testing;

pub use card::agent_card;
pub use classifier::{Classification, classify};
pub use error::{AgentError, Result};
pub use executor::QuoteExecutor;
pub use generator::QuoteGenerator;
pub use prompts::QuotePrompt;
pub use telemetry::{LangfuseTelemetry, NoopTelemetry, Telemetry};
pub use topic::extract_topic;
