use async_trait::async_trait;
use thiserror::Error;

/// External knowledge-base query service the `knowledgeBaseCall` handler
/// depends on. Injected so tests can substitute a stub for the real
/// HTTP-backed implementation.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn query(&self, query: &str) -> Result<String, KnowledgeError>;
}

#[derive(Error, Debug, Clone)]
pub enum KnowledgeError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected response: {0}")]
    Response(String),
}
