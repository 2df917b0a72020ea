//! Agent-to-agent messaging boundary
//!
//! This crate hosts an agent behind the A2A JSON-RPC protocol. It keeps the
//! surface an agent implementation sees deliberately small:
//!
//! - [`RequestContext`] carries the already-extracted request text
//! - [`EventQueue`] is the outbound sink for reply events
//! - [`AgentExecutor`] is the trait the agent implements
//!
//! Around that sit the [`DefaultRequestHandler`] (runs the executor and
//! collects its reply), the axum-based [`A2AServer`] and the reqwest-based
//! [`A2AClient`].

pub mod client;
pub mod context;
pub mod error;
pub mod events;
pub mod executor;
pub mod handler;
pub mod jsonrpc;
pub mod server;
pub mod types;

pub use client::A2AClient;
pub use context::RequestContext;
pub use error::{A2AError, Result};
pub use events::{Event, EventQueue, EventReceiver, event_channel};
pub use executor::AgentExecutor;
pub use handler::DefaultRequestHandler;
pub use jsonrpc::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use server::A2AServer;
pub use types::{
    AgentCapabilities, AgentCard, AgentSkill, Message, MessageSendParams, Part, Role,
    TaskIdParams,
};
