//! Test doubles shared by the unit tests

use async_trait::async_trait;
use mockall::mock;
use quote_llm::{
    CompletionRequest, CompletionResponse, LLMProvider, Message, StopReason, TokenUsage,
};

mock! {
    pub Provider {}

    #[async_trait]
    impl LLMProvider for Provider {
        async fn complete(&self, request: CompletionRequest) -> quote_llm::Result<CompletionResponse>;
        fn name(&self) -> &str;
    }
}

/// Completion response carrying `text`
pub fn response(text: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage {
            input_tokens: 30,
            output_tokens: 10,
        },
    }
}

/// Text of the user message in a request
pub fn user_prompt(request: &CompletionRequest) -> &str {
    request.messages.last().map_or("", Message::text)
}
