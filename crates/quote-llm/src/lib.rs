//! Completion-service abstraction layer
//!
//! This crate provides provider-agnostic types for talking to a text
//! completion service:
//!
//! - Role-tagged message types
//! - Completion request/response types
//! - Provider trait for completion back-ends
//! - An OpenAI-compatible provider (behind the `openai` feature)

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;

// Re-export main types
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{Message, Role};
pub use provider::LLMProvider;

// Provider implementations (feature-gated)
#[cfg(feature = "openai")]
pub mod providers;
