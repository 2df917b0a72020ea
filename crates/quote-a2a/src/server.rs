//! HTTP transport: agent card discovery and JSON-RPC endpoint

use crate::jsonrpc::{JSONRPC_VERSION, JsonRpcError, JsonRpcRequest, JsonRpcResponse, codes};
use crate::{AgentCard, DefaultRequestHandler};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

/// Well-known path of the agent card
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";
/// Newer well-known path of the agent card, served as an alias
pub const AGENT_CARD_ALIAS_PATH: &str = "/.well-known/agent-card.json";

#[derive(Clone)]
struct ServerState {
    card: Arc<AgentCard>,
    handler: DefaultRequestHandler,
}

/// A2A server publishing one agent
pub struct A2AServer {
    state: ServerState,
}

impl A2AServer {
    /// Create a server for the given card and handler
    pub fn new(card: AgentCard, handler: DefaultRequestHandler) -> Self {
        Self {
            state: ServerState {
                card: Arc::new(card),
                handler,
            },
        }
    }

    /// Build the axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route(AGENT_CARD_PATH, get(agent_card))
            .route(AGENT_CARD_ALIAS_PATH, get(agent_card))
            .route("/", post(rpc))
            .with_state(self.state.clone())
    }

    /// Bind `address` and serve until Ctrl-C
    pub async fn serve(self, address: &str) -> std::io::Result<()> {
        let listener = TcpListener::bind(address).await?;
        self.serve_with_shutdown(listener, shutdown_signal()).await
    }

    /// Serve on an existing listener until `signal` resolves
    pub async fn serve_with_shutdown<F>(self, listener: TcpListener, signal: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(
            address = %listener.local_addr()?,
            agent = %self.state.card.name,
            "A2A server listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(signal)
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}

async fn agent_card(State(state): State<ServerState>) -> Json<AgentCard> {
    Json(state.card.as_ref().clone())
}

async fn rpc(State(state): State<ServerState>, body: Bytes) -> Json<JsonRpcResponse> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(e) => {
            return Json(JsonRpcResponse::failure(
                Value::Null,
                JsonRpcError::new(codes::PARSE_ERROR, format!("Parse error: {e}")),
            ));
        }
    };

    let id = raw.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(raw) {
        Ok(request) => request,
        Err(e) => {
            return Json(JsonRpcResponse::failure(
                id,
                JsonRpcError::new(codes::INVALID_REQUEST, format!("Invalid request: {e}")),
            ));
        }
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Json(JsonRpcResponse::failure(
            id,
            JsonRpcError::new(
                codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version '{}'", request.jsonrpc),
            ),
        ));
    }

    Json(state.handler.handle(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        A2AError, AgentCapabilities, AgentExecutor, Event, EventQueue, Message, RequestContext,
        Result,
    };
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    struct UpperExecutor;

    #[async_trait]
    impl AgentExecutor for UpperExecutor {
        async fn execute(&self, context: RequestContext, queue: &EventQueue) -> Result<()> {
            let text = context.user_text().unwrap_or_default().to_uppercase();
            queue
                .enqueue_event(Event::Message(Message::agent_text(text)))
                .await
        }

        async fn cancel(&self, _context: RequestContext, _queue: &EventQueue) -> Result<()> {
            Err(A2AError::UnsupportedOperation("cancel".into()))
        }
    }

    fn server() -> A2AServer {
        let card = AgentCard {
            name: "Upper".into(),
            description: "Shouts".into(),
            url: "http://localhost:8080/".into(),
            version: "1.0.0".into(),
            default_input_modes: vec!["text".into()],
            default_output_modes: vec!["text".into()],
            capabilities: AgentCapabilities::default(),
            skills: vec![],
        };
        A2AServer::new(card, DefaultRequestHandler::new(Arc::new(UpperExecutor)))
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn post_rpc(body: impl Into<Body>) -> Value {
        let response = server()
            .router()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(body.into())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response).await
    }

    #[tokio::test]
    async fn test_agent_card_paths() {
        for path in [AGENT_CARD_PATH, AGENT_CARD_ALIAS_PATH] {
            let response = server()
                .router()
                .oneshot(Request::get(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let card = body_json(response).await;
            assert_eq!(card["name"], "Upper");
            assert_eq!(card["defaultOutputModes"], json!(["text"]));
        }
    }

    #[tokio::test]
    async fn test_message_send() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "message/send",
            "params": {"message": {
                "role": "user",
                "messageId": "m",
                "parts": [{"kind": "text", "text": "hi"}]
            }}
        });
        let response = post_rpc(request.to_string()).await;

        assert_eq!(response["id"], 7);
        assert_eq!(response["result"]["parts"][0]["text"], "HI");
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = post_rpc("{not json").await;
        assert_eq!(response["error"]["code"], codes::PARSE_ERROR);
        assert_eq!(response["id"], Value::Null);
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let response = post_rpc(json!({"jsonrpc": "2.0", "id": 1}).to_string()).await;
        assert_eq!(response["error"]["code"], codes::INVALID_REQUEST);
        assert_eq!(response["id"], 1);
    }

    #[tokio::test]
    async fn test_wrong_version() {
        let response =
            post_rpc(json!({"jsonrpc": "1.0", "id": 1, "method": "message/send"}).to_string())
                .await;
        assert_eq!(response["error"]["code"], codes::INVALID_REQUEST);
    }

    #[tokio::test]
    async fn test_cancel_is_reported_as_unsupported() {
        let response = post_rpc(
            json!({"jsonrpc": "2.0", "id": "c", "method": "tasks/cancel", "params": {"id": "t"}})
                .to_string(),
        )
        .await;
        assert_eq!(response["error"]["code"], codes::UNSUPPORTED_OPERATION);
    }
}
