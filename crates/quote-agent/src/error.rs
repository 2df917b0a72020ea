//! Error types for the quote agent

use thiserror::Error;

/// Result type alias for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Failures inside the agent
///
/// None of these reach the requester: the generator converts them into
/// fallback replies and telemetry swallows its own.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Prompt template failed to render
    #[error("Prompt rendering failed: {0}")]
    Prompt(#[from] minijinja::Error),

    /// Completion call failed
    #[error("Completion failed: {0}")]
    Completion(#[from] quote_llm::LLMError),

    /// Completion succeeded but produced no text
    #[error("Completion returned empty text")]
    EmptyCompletion,

    /// Telemetry backend could not be set up
    #[error("Telemetry setup failed: {0}")]
    TelemetrySetup(String),

    /// Telemetry HTTP error
    #[error("Telemetry HTTP error: {0}")]
    TelemetryHttp(#[from] reqwest::Error),
}
