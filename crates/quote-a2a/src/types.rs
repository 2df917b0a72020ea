//! Protocol data types
//!
//! Field names follow the A2A wire format (camelCase JSON).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Author of a protocol message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message sent by the requesting client
    User,
    /// Message produced by the agent
    Agent,
}

/// A piece of message content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Plain text
    Text { text: String },
    /// Structured JSON payload
    Data { data: Value },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Text content, if this is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            Self::Data { .. } => None,
        }
    }
}

fn message_kind() -> String {
    "message".to_string()
}

/// A protocol message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub parts: Vec<Part>,
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default = "message_kind")]
    pub kind: String,
}

impl Message {
    fn with_text(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            parts: vec![Part::text(text)],
            message_id: Uuid::new_v4().to_string(),
            context_id: None,
            task_id: None,
            kind: message_kind(),
        }
    }

    /// Create a single-part text message from the user
    pub fn user_text(text: impl Into<String>) -> Self {
        Self::with_text(Role::User, text)
    }

    /// Create a single-part text message from the agent
    pub fn agent_text(text: impl Into<String>) -> Self {
        Self::with_text(Role::Agent, text)
    }

    /// Attach task and context identifiers
    pub fn in_task(mut self, task_id: impl Into<String>, context_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self.context_id = Some(context_id.into());
        self
    }

    /// First text part of the message
    pub fn first_text(&self) -> Option<&str> {
        self.parts.iter().find_map(Part::as_text)
    }
}

/// Parameters of `message/send`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSendParams {
    pub message: Message,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

/// Parameters of task-addressed methods such as `tasks/cancel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskIdParams {
    pub id: String,
}

/// Optional protocol features an agent supports
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub streaming: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_notifications: Option<bool>,
}

/// A capability advertised in the agent card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl AgentSkill {
    /// Create a skill without tags or examples
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            tags: Vec::new(),
            examples: Vec::new(),
        }
    }

    /// Set the tags
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the example prompts
    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = examples.into_iter().map(Into::into).collect();
        self
    }
}

/// Self-description published at the well-known card path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    pub name: String,
    pub description: String,
    pub url: String,
    pub version: String,
    pub default_input_modes: Vec<String>,
    pub default_output_modes: Vec<String>,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_wire_format() {
        let msg = Message::agent_text("hello").in_task("t-1", "c-1");
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "agent");
        assert_eq!(json["kind"], "message");
        assert_eq!(json["taskId"], "t-1");
        assert_eq!(json["contextId"], "c-1");
        assert_eq!(json["parts"][0], json!({"kind": "text", "text": "hello"}));
        assert!(json["messageId"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[test]
    fn test_message_parses_minimal_payload() {
        let msg: Message = serde_json::from_value(json!({
            "role": "user",
            "messageId": "m-1",
            "parts": [{"kind": "text", "text": "Give me a random quote"}]
        }))
        .unwrap();

        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.kind, "message");
        assert_eq!(msg.first_text(), Some("Give me a random quote"));
        assert!(msg.task_id.is_none());
    }

    #[test]
    fn test_first_text_skips_data_parts() {
        let msg = Message {
            role: Role::User,
            parts: vec![
                Part::Data {
                    data: json!({"k": 1}),
                },
                Part::text("second"),
            ],
            message_id: "m".into(),
            context_id: None,
            task_id: None,
            kind: "message".into(),
        };
        assert_eq!(msg.first_text(), Some("second"));
    }

    #[test]
    fn test_agent_card_wire_format() {
        let card = AgentCard {
            name: "Agent".into(),
            description: "desc".into(),
            url: "http://localhost:8080/".into(),
            version: "1.0.0".into(),
            default_input_modes: vec!["text".into()],
            default_output_modes: vec!["text".into()],
            capabilities: AgentCapabilities::default(),
            skills: vec![
                AgentSkill::new("s", "Skill", "does things")
                    .with_tags(["a", "b"])
                    .with_examples(["try this"]),
            ],
        };

        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["defaultInputModes"], json!(["text"]));
        assert_eq!(json["capabilities"], json!({}));
        assert_eq!(json["skills"][0]["tags"], json!(["a", "b"]));

        let back: AgentCard = serde_json::from_value(json).unwrap();
        assert_eq!(back, card);
    }
}
