use async_trait::async_trait;

use crate::domain::{CompletionRequest, DomainError};

/// An interface for sending chat-style prompts to an LLM and receiving text responses.
///
/// Implementors encapsulate transport, serialization, and vendor-specific API
/// details. The returned text is untrusted: callers must run it through
/// [`crate::application::parse_recommendations`] before use.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the request's system and user messages and return the assistant's text.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
