//! A2A executor for the quote agent

use crate::generator::UNAVAILABLE_MESSAGE;
use crate::{Classification, QuoteGenerator, classify, extract_topic};
use async_trait::async_trait;
use quote_a2a::{A2AError, AgentExecutor, Event, EventQueue, Message, RequestContext};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Request text used when the inbound message carries none
pub const DEFAULT_REQUEST_TEXT: &str = "Generate an inspirational quote";

const CANCEL_UNSUPPORTED: &str = "Cancel not supported for quote generation";

/// Routes each request to a topic or random quote and replies once
pub struct QuoteExecutor {
    generator: Arc<QuoteGenerator>,
}

impl QuoteExecutor {
    pub fn new(generator: QuoteGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    pub fn generator(&self) -> &QuoteGenerator {
        &self.generator
    }

    /// Produce the reply text for a request
    ///
    /// Without a provider the request is not even classified.
    pub async fn respond(&self, text: &str, trace_id: &str) -> String {
        if !self.generator.is_available() {
            warn!("Completion service unavailable; replying without generation");
            return UNAVAILABLE_MESSAGE.to_string();
        }

        match classify(text) {
            Classification::Random => {
                info!("Routing to random quote generation");
                self.generator.random_quote(trace_id).await
            }
            Classification::Topic => {
                let topic = extract_topic(text);
                info!(topic = %topic, "Routing to topic quote generation");
                self.generator.generate_quote(&topic, trace_id).await
            }
        }
    }
}

#[async_trait]
impl AgentExecutor for QuoteExecutor {
    #[instrument(skip_all, fields(task_id = %context.task_id()))]
    async fn execute(&self, context: RequestContext, queue: &EventQueue) -> quote_a2a::Result<()> {
        let text = context.user_text().unwrap_or_else(|| {
            warn!("Could not extract message text; using default request");
            DEFAULT_REQUEST_TEXT
        });
        info!(request = %text, "Processing request");

        let trace_id = context.task_id();
        let telemetry = self.generator.telemetry();
        telemetry.on_request_start(trace_id, text).await;

        let reply = self.respond(text, trace_id).await;

        telemetry.on_request_complete(trace_id, &reply).await;
        let telemetry = Arc::clone(telemetry);
        tokio::spawn(async move { telemetry.flush().await });

        queue
            .enqueue_event(Event::Message(Message::agent_text(reply)))
            .await?;
        info!("Quote generation completed");
        Ok(())
    }

    async fn cancel(&self, context: RequestContext, _queue: &EventQueue) -> quote_a2a::Result<()> {
        warn!(task_id = %context.task_id(), "Cancel operation requested but not supported");
        Err(A2AError::UnsupportedOperation(CANCEL_UNSUPPORTED.to_string()))
    }
}
