//! Executor trait definition

use crate::{EventQueue, RequestContext, Result};
use async_trait::async_trait;

/// Agent business logic entry point
///
/// Implementors process one request per `execute` call and write their
/// reply events to the queue.
#[async_trait]
pub trait AgentExecutor: Send + Sync + 'static {
    /// Handle a request and enqueue the reply
    async fn execute(&self, context: RequestContext, queue: &EventQueue) -> Result<()>;

    /// Cancel an in-flight task
    ///
    /// Agents that cannot cancel must return an error rather than succeed.
    async fn cancel(&self, context: RequestContext, queue: &EventQueue) -> Result<()>;
}
