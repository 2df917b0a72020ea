//! Langfuse ingestion backend
//!
//! Events are buffered in memory and posted as one batch to
//! `{host}/api/public/ingestion` on [`Telemetry::flush`]. Delivery is best
//! effort: a failed flush is logged and its events are dropped.

use super::{GenerationOutcome, GenerationStart, Telemetry};
use crate::{AgentError, Result};
use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use quote_utils::TelemetryConfig;
use reqwest::Client;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

const INGESTION_PATH: &str = "/api/public/ingestion";
const TRACE_NAME: &str = "quote_request";
const FLUSH_TIMEOUT: Duration = Duration::from_secs(10);

/// Telemetry backend posting to the Langfuse ingestion API
pub struct LangfuseTelemetry {
    client: Client,
    endpoint: String,
    public_key: String,
    secret_key: String,
    service_name: String,
    service_version: String,
    buffer: Mutex<Vec<Value>>,
}

impl std::fmt::Debug for LangfuseTelemetry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LangfuseTelemetry")
            .field("endpoint", &self.endpoint)
            .field("public_key", &self.public_key)
            .field("service_name", &self.service_name)
            .finish_non_exhaustive()
    }
}

impl LangfuseTelemetry {
    /// Build from configuration; both keys are required
    pub fn from_config(config: &TelemetryConfig) -> Result<Self> {
        let (Some(public_key), Some(secret_key)) = (&config.public_key, &config.secret_key) else {
            return Err(AgentError::TelemetrySetup(
                "LANGFUSE_SECRET_KEY and LANGFUSE_PUBLIC_KEY must be set".to_string(),
            ));
        };

        let client = Client::builder().timeout(FLUSH_TIMEOUT).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{INGESTION_PATH}", config.host.trim_end_matches('/')),
            public_key: public_key.clone(),
            secret_key: secret_key.clone(),
            service_name: config.service_name.clone(),
            service_version: config.service_version.clone(),
            buffer: Mutex::new(Vec::new()),
        })
    }

    /// Ingestion URL events are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Number of events waiting for the next flush
    pub async fn pending(&self) -> usize {
        self.buffer.lock().await.len()
    }

    async fn push(&self, kind: &str, body: Value) {
        let event = json!({
            "id": Uuid::new_v4().to_string(),
            "timestamp": now(),
            "type": kind,
            "body": body,
        });
        self.buffer.lock().await.push(event);
    }

    fn metadata(&self) -> Value {
        json!({
            "service_name": self.service_name,
            "service_version": self.service_version,
        })
    }

    async fn send(&self, batch: &[Value]) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .json(&json!({ "batch": batch }))
            .send()
            .await?
            .error_for_status()?;

        debug!(status = %response.status(), events = batch.len(), "Observability data flushed");
        Ok(())
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[async_trait]
impl Telemetry for LangfuseTelemetry {
    async fn on_request_start(&self, trace_id: &str, input: &str) {
        let body = json!({
            "id": trace_id,
            "name": TRACE_NAME,
            "timestamp": now(),
            "input": input,
            "release": self.service_version,
            "metadata": self.metadata(),
        });
        self.push("trace-create", body).await;
    }

    async fn on_generation_start(&self, generation: &GenerationStart<'_>) {
        let body = json!({
            "id": generation.generation_id,
            "traceId": generation.trace_id,
            "name": generation.name,
            "startTime": now(),
            "model": generation.model,
            "input": generation.input,
            "modelParameters": {
                "temperature": generation.temperature,
                "max_tokens": generation.max_tokens,
            },
            "metadata": self.metadata(),
        });
        self.push("generation-create", body).await;
    }

    async fn on_generation_end(
        &self,
        trace_id: &str,
        generation_id: &str,
        outcome: &GenerationOutcome<'_>,
    ) {
        let mut body = json!({
            "id": generation_id,
            "traceId": trace_id,
            "endTime": now(),
        });

        match outcome {
            GenerationOutcome::Success { output, usage } => {
                body["output"] = json!(output);
                body["usage"] = json!({
                    "input": usage.input_tokens,
                    "output": usage.output_tokens,
                    "total": usage.total(),
                    "unit": "TOKENS",
                });
            }
            GenerationOutcome::Failure { error } => {
                body["level"] = json!("ERROR");
                body["statusMessage"] = json!(error);
            }
        }

        self.push("generation-update", body).await;
    }

    async fn on_request_complete(&self, trace_id: &str, output: &str) {
        // Same id as the opening trace-create; Langfuse upserts it.
        let body = json!({ "id": trace_id, "output": output });
        self.push("trace-create", body).await;
    }

    async fn flush(&self) {
        let batch = std::mem::take(&mut *self.buffer.lock().await);
        if batch.is_empty() {
            return;
        }

        if let Err(e) = self.send(&batch).await {
            warn!(error = %e, dropped = batch.len(), "Failed to flush observability data");
        }
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
