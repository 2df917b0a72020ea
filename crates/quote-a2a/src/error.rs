//! Error types for the messaging boundary

use crate::jsonrpc::codes;
use thiserror::Error;

/// Result type alias for messaging operations
pub type Result<T> = std::result::Result<T, A2AError>;

/// Error type for messaging operations
#[derive(Error, Debug)]
pub enum A2AError {
    /// The agent does not implement the requested operation
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Request body was not valid JSON
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Request was not a valid JSON-RPC envelope
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unknown JSON-RPC method
    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Method parameters did not match the expected shape
    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// The outbound event queue was closed before an event could be sent
    #[error("Event queue closed")]
    QueueClosed,

    /// The executor finished without enqueueing a reply
    #[error("Agent produced no response message")]
    NoResponse,

    /// Error reported by a remote agent
    #[error("Remote error {code}: {message}")]
    Remote { code: i64, message: String },

    /// Invalid agent URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP error
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Any other failure inside the agent
    #[error("Internal error: {0}")]
    Internal(String),
}

impl A2AError {
    /// JSON-RPC error code reported for this error
    pub fn code(&self) -> i64 {
        match self {
            Self::UnsupportedOperation(_) => codes::UNSUPPORTED_OPERATION,
            Self::ParseError(_) => codes::PARSE_ERROR,
            Self::InvalidRequest(_) => codes::INVALID_REQUEST,
            Self::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            Self::InvalidParams(_) => codes::INVALID_PARAMS,
            Self::Remote { code, .. } => *code,
            _ => codes::INTERNAL_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            A2AError::UnsupportedOperation("cancel".into()).code(),
            -32004
        );
        assert_eq!(A2AError::MethodNotFound("x".into()).code(), -32601);
        assert_eq!(A2AError::InvalidParams("x".into()).code(), -32602);
        assert_eq!(A2AError::QueueClosed.code(), -32603);
        assert_eq!(
            A2AError::Remote {
                code: -32001,
                message: "gone".into()
            }
            .code(),
            -32001
        );
    }

    #[test]
    fn test_error_display() {
        let err = A2AError::UnsupportedOperation("Cancel not supported".into());
        assert_eq!(err.to_string(), "Unsupported operation: Cancel not supported");
    }
}
