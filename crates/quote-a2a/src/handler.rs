//! JSON-RPC request handling on top of an [`AgentExecutor`]

use crate::jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, methods};
use crate::{
    A2AError, AgentExecutor, Event, Message, RequestContext, Result, TaskIdParams, event_channel,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Runs an executor for each request and turns its events into replies
#[derive(Clone)]
pub struct DefaultRequestHandler {
    executor: Arc<dyn AgentExecutor>,
}

impl DefaultRequestHandler {
    /// Create a handler for the given executor
    pub fn new(executor: Arc<dyn AgentExecutor>) -> Self {
        Self { executor }
    }

    /// Dispatch a JSON-RPC request to the matching method
    pub async fn handle(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();
        debug!(method = %request.method, "Dispatching JSON-RPC request");

        let outcome = match request.method.as_str() {
            methods::MESSAGE_SEND => self
                .on_message_send(&request.params)
                .await
                .and_then(|message| serde_json::to_value(message).map_err(A2AError::from)),
            methods::TASKS_CANCEL => self.on_cancel_task(&request.params).await,
            other => Err(A2AError::MethodNotFound(other.to_string())),
        };

        match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                warn!(method = %request.method, code = err.code(), error = %err, "Request failed");
                JsonRpcResponse::failure(id, JsonRpcError::from(&err))
            }
        }
    }

    /// Run the executor and return the first message it enqueued
    #[instrument(skip_all)]
    pub async fn on_message_send(&self, params: &Value) -> Result<Message> {
        let context = RequestContext::from_params(params);
        let task_id = context.task_id().to_string();
        let context_id = context.context_id().to_string();

        let (queue, mut receiver) = event_channel();
        self.executor.execute(context, &queue).await?;
        drop(queue);

        let mut reply = None;
        let mut extra = 0usize;
        while let Some(event) = receiver.recv().await {
            match event {
                Event::Message(message) if reply.is_none() => reply = Some(message),
                Event::Message(_) => extra += 1,
            }
        }

        if extra > 0 {
            warn!(task_id = %task_id, extra, "Executor enqueued more than one reply; extras dropped");
        }

        let reply = reply.ok_or(A2AError::NoResponse)?;
        info!(task_id = %task_id, "Reply delivered");
        Ok(reply.in_task(task_id, context_id))
    }

    /// Ask the executor to cancel a task
    #[instrument(skip_all)]
    pub async fn on_cancel_task(&self, params: &Value) -> Result<Value> {
        let TaskIdParams { id } = serde_json::from_value(params.clone())
            .map_err(|e| A2AError::InvalidParams(e.to_string()))?;

        let (queue, _receiver) = event_channel();
        self.executor
            .cancel(RequestContext::for_task(id.clone()), &queue)
            .await?;

        Ok(json!({ "id": id, "status": { "state": "canceled" } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EventQueue;
    use crate::jsonrpc::codes;
    use async_trait::async_trait;

    /// Replies with the request text, `replies` times
    struct EchoExecutor {
        replies: usize,
    }

    #[async_trait]
    impl AgentExecutor for EchoExecutor {
        async fn execute(&self, context: RequestContext, queue: &EventQueue) -> Result<()> {
            let text = context.user_text().unwrap_or("<none>").to_string();
            for i in 0..self.replies {
                queue
                    .enqueue_event(Event::Message(Message::agent_text(format!("{text}#{i}"))))
                    .await?;
            }
            Ok(())
        }

        async fn cancel(&self, _context: RequestContext, _queue: &EventQueue) -> Result<()> {
            Err(A2AError::UnsupportedOperation("cancel".into()))
        }
    }

    /// Accepts cancellation
    struct CancellableExecutor;

    #[async_trait]
    impl AgentExecutor for CancellableExecutor {
        async fn execute(&self, _context: RequestContext, _queue: &EventQueue) -> Result<()> {
            Err(A2AError::Internal("boom".into()))
        }

        async fn cancel(&self, _context: RequestContext, _queue: &EventQueue) -> Result<()> {
            Ok(())
        }
    }

    fn handler(replies: usize) -> DefaultRequestHandler {
        DefaultRequestHandler::new(Arc::new(EchoExecutor { replies }))
    }

    fn send_params(text: &str) -> Value {
        json!({
            "message": {
                "role": "user",
                "messageId": "m-1",
                "parts": [{"kind": "text", "text": text}]
            }
        })
    }

    #[tokio::test]
    async fn test_message_send_returns_single_reply() {
        let reply = handler(1)
            .on_message_send(&send_params("hello"))
            .await
            .unwrap();
        assert_eq!(reply.first_text(), Some("hello#0"));
        assert!(reply.task_id.is_some());
        assert!(reply.context_id.is_some());
    }

    #[tokio::test]
    async fn test_message_send_keeps_first_of_many() {
        let reply = handler(3)
            .on_message_send(&send_params("x"))
            .await
            .unwrap();
        assert_eq!(reply.first_text(), Some("x#0"));
    }

    #[tokio::test]
    async fn test_message_send_without_reply() {
        let result = handler(0).on_message_send(&send_params("x")).await;
        assert!(matches!(result, Err(A2AError::NoResponse)));
    }

    #[tokio::test]
    async fn test_dispatch_unknown_method() {
        let response = handler(1)
            .handle(JsonRpcRequest::new("tasks/resubscribe", json!({})))
            .await;
        assert_eq!(response.error.unwrap().code, codes::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dispatch_cancel_unsupported() {
        let response = handler(1)
            .handle(JsonRpcRequest::new(
                methods::TASKS_CANCEL,
                json!({"id": "t-1"}),
            ))
            .await;
        assert!(response.result.is_none());
        assert_eq!(response.error.unwrap().code, codes::UNSUPPORTED_OPERATION);
    }

    #[tokio::test]
    async fn test_dispatch_cancel_invalid_params() {
        let response = handler(1)
            .handle(JsonRpcRequest::new(methods::TASKS_CANCEL, json!({})))
            .await;
        assert_eq!(response.error.unwrap().code, codes::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_dispatch_cancel_supported() {
        let handler = DefaultRequestHandler::new(Arc::new(CancellableExecutor));
        let response = handler
            .handle(JsonRpcRequest::new(
                methods::TASKS_CANCEL,
                json!({"id": "t-1"}),
            ))
            .await;
        assert_eq!(response.result.unwrap()["status"]["state"], "canceled");
    }

    #[tokio::test]
    async fn test_dispatch_executor_failure() {
        let handler = DefaultRequestHandler::new(Arc::new(CancellableExecutor));
        let response = handler
            .handle(JsonRpcRequest::new(methods::MESSAGE_SEND, send_params("x")))
            .await;
        assert_eq!(response.error.unwrap().code, codes::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_dispatch_message_send() {
        let request = JsonRpcRequest::new(methods::MESSAGE_SEND, send_params("hi"));
        let id = request.id.clone();
        let response = handler(1).handle(request).await;

        assert_eq!(response.id, id);
        let result = response.result.unwrap();
        assert_eq!(result["role"], "agent");
        assert_eq!(result["parts"][0]["text"], "hi#0");
    }
}
