//! Observability hooks around requests and completion calls
//!
//! The agent reports through the [`Telemetry`] trait. Every method has a
//! no-op default, so backends only implement what they record and
//! [`NoopTelemetry`] is the empty implementation used when observability is
//! disabled.

mod langfuse;

pub use langfuse::LangfuseTelemetry;

use async_trait::async_trait;
use quote_llm::{Message, TokenUsage};
use quote_utils::TelemetryConfig;
use std::sync::Arc;
use tracing::{error, info};

/// A completion call about to be made
#[derive(Debug, Clone)]
pub struct GenerationStart<'a> {
    pub trace_id: &'a str,
    pub generation_id: &'a str,
    pub name: &'a str,
    pub model: &'a str,
    pub input: &'a [Message],
    pub temperature: f32,
    pub max_tokens: usize,
}

/// How a completion call ended
#[derive(Debug, Clone)]
pub enum GenerationOutcome<'a> {
    Success { output: &'a str, usage: TokenUsage },
    Failure { error: &'a str },
}

/// Observability backend
#[async_trait]
pub trait Telemetry: Send + Sync {
    /// A request has been received
    async fn on_request_start(&self, _trace_id: &str, _input: &str) {}

    /// A completion call is starting
    async fn on_generation_start(&self, _generation: &GenerationStart<'_>) {}

    /// A completion call has finished
    async fn on_generation_end(
        &self,
        _trace_id: &str,
        _generation_id: &str,
        _outcome: &GenerationOutcome<'_>,
    ) {
    }

    /// The reply for a request has been produced
    async fn on_request_complete(&self, _trace_id: &str, _output: &str) {}

    /// Push buffered data to the backend
    async fn flush(&self) {}

    /// Whether this backend records anything
    fn is_enabled(&self) -> bool {
        false
    }
}

/// Telemetry that records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTelemetry;

#[async_trait]
impl Telemetry for NoopTelemetry {}

/// Pick the telemetry backend for this configuration
///
/// Langfuse is used only when enabled and fully configured; any setup
/// failure degrades to [`NoopTelemetry`].
pub fn from_config(config: &TelemetryConfig) -> Arc<dyn Telemetry> {
    if !config.enabled {
        info!("Observability is disabled");
        return Arc::new(NoopTelemetry);
    }

    match LangfuseTelemetry::from_config(config) {
        Ok(telemetry) => {
            info!(host = %config.host, "Observability enabled with Langfuse");
            Arc::new(telemetry)
        }
        Err(e) => {
            error!(error = %e, "Failed to set up observability; continuing without it");
            Arc::new(NoopTelemetry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_accepts_everything() {
        let telemetry = NoopTelemetry;
        telemetry.on_request_start("t", "in").await;
        telemetry
            .on_generation_end("t", "g", &GenerationOutcome::Failure { error: "x" })
            .await;
        telemetry.flush().await;
        assert!(!telemetry.is_enabled());
    }

    #[test]
    fn test_disabled_config_selects_noop() {
        let telemetry = from_config(&TelemetryConfig::default());
        assert!(!telemetry.is_enabled());
    }

    #[test]
    fn test_missing_keys_select_noop() {
        let config = TelemetryConfig {
            enabled: true,
            public_key: Some("pk".into()),
            secret_key: None,
            ..TelemetryConfig::default()
        };
        assert!(!from_config(&config).is_enabled());
    }

    #[test]
    fn test_complete_config_selects_langfuse() {
        let config = TelemetryConfig {
            enabled: true,
            public_key: Some("pk".into()),
            secret_key: Some("sk".into()),
            ..TelemetryConfig::default()
        };
        assert!(from_config(&config).is_enabled());
    }
}
