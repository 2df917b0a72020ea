//! Request context handed to executors
//!
//! Inbound payloads are loosely shaped: depending on the client, the user's
//! text may sit at different places in the `params` object. All of that is
//! resolved here, once, so executors only ever see `Option<&str>`.

use crate::types::{Message, MessageSendParams};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Structural fallbacks tried in order when `params` is not a well-formed
/// `MessageSendParams` or its message has no text part.
const TEXT_POINTERS: [&str; 4] = [
    "/message/parts/0/text",
    "/message/parts/0/root/text",
    "/text",
    "/body/message/parts/0/text",
];

const TASK_ID_POINTERS: [&str; 2] = ["/message/taskId", "/body/message/taskId"];
const CONTEXT_ID_POINTERS: [&str; 2] = ["/message/contextId", "/body/message/contextId"];

fn first_str(params: &Value, pointers: &[&str]) -> Option<String> {
    pointers
        .iter()
        .find_map(|pointer| params.pointer(pointer)?.as_str())
        .map(str::to_string)
}

/// Context for a single executor invocation
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    task_id: String,
    context_id: String,
    user_text: Option<String>,
}

impl RequestContext {
    /// Create a context with fresh identifiers and no text
    pub fn new() -> Self {
        Self {
            task_id: Uuid::new_v4().to_string(),
            context_id: Uuid::new_v4().to_string(),
            user_text: None,
        }
    }

    /// Build a context from raw `message/send` parameters
    ///
    /// Never fails: when no access path yields text, the context simply has
    /// no user text.
    pub fn from_params(params: &Value) -> Self {
        let typed = serde_json::from_value::<MessageSendParams>(params.clone()).ok();

        let mut context = match &typed {
            Some(p) => Self::from_message(&p.message),
            None => {
                let mut context = Self::new();
                if let Some(task_id) = first_str(params, &TASK_ID_POINTERS) {
                    context.task_id = task_id;
                }
                if let Some(context_id) = first_str(params, &CONTEXT_ID_POINTERS) {
                    context.context_id = context_id;
                }
                context
            }
        };

        if context.user_text.is_none() {
            context.user_text = TEXT_POINTERS.iter().find_map(|pointer| {
                let text = params.pointer(pointer)?.as_str()?;
                debug!(pointer, "Request text found via structural fallback");
                Some(text.to_string())
            });
        }

        context
    }

    /// Build a context from a typed message
    pub fn from_message(message: &Message) -> Self {
        let mut context = Self::new().with_user_text_opt(message.first_text());
        if let Some(task_id) = &message.task_id {
            context.task_id.clone_from(task_id);
        }
        if let Some(context_id) = &message.context_id {
            context.context_id.clone_from(context_id);
        }
        context
    }

    /// Context addressing an existing task (used by cancel)
    pub fn for_task(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            ..Self::new()
        }
    }

    /// Set the user text
    pub fn with_user_text(mut self, text: impl Into<String>) -> Self {
        self.user_text = Some(text.into());
        self
    }

    fn with_user_text_opt(mut self, text: Option<&str>) -> Self {
        self.user_text = text.map(str::to_string);
        self
    }

    /// Text of the first text part of the inbound message
    pub fn user_text(&self) -> Option<&str> {
        self.user_text.as_deref()
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
