//! JSON-RPC client for talking to a remote agent

use crate::jsonrpc::{JsonRpcRequest, JsonRpcResponse, methods};
use crate::server::AGENT_CARD_PATH;
use crate::{A2AError, AgentCard, Message, MessageSendParams, Result, TaskIdParams};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for a single remote agent
#[derive(Debug, Clone)]
pub struct A2AClient {
    client: Client,
    base_url: Url,
}

impl A2AClient {
    /// Create a client for the agent at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL of the remote agent (always ends with `/`)
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the agent card
    pub async fn get_agent_card(&self) -> Result<AgentCard> {
        let url = self.base_url.join(AGENT_CARD_PATH.trim_start_matches('/'))?;
        debug!(url = %url, "Fetching agent card");

        let card = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(card)
    }

    /// Send a message and return the agent's reply
    pub async fn send_message(&self, message: Message) -> Result<Message> {
        let params = serde_json::to_value(MessageSendParams {
            message,
            metadata: None,
        })?;
        let result = self.call(methods::MESSAGE_SEND, params).await?;
        Ok(serde_json::from_value(result)?)
    }

    /// Send a single text message and return the reply text
    pub async fn send_text(&self, text: &str) -> Result<String> {
        let reply = self.send_message(Message::user_text(text)).await?;
        Ok(reply.first_text().unwrap_or_default().to_string())
    }

    /// Ask the agent to cancel a task
    pub async fn cancel_task(&self, task_id: &str) -> Result<Value> {
        let params = serde_json::to_value(TaskIdParams {
            id: task_id.to_string(),
        })?;
        self.call(methods::TASKS_CANCEL, params).await
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let request = JsonRpcRequest::new(method, params);
        debug!(method, id = %request.id, "Sending JSON-RPC request");

        let response: JsonRpcResponse = self
            .client
            .post(self.base_url.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = response.error {
            return Err(A2AError::Remote {
                code: error.code,
                message: error.message,
            });
        }

        response
            .result
            .ok_or_else(|| A2AError::Internal("Response carried neither result nor error".into()))
    }
}
