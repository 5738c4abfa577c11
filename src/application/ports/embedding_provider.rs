use async_trait::async_trait;
use pgvector::Vector;

#[derive(Debug)]
pub enum EmbeddingProviderError {
    NetworkError(String),
    ApiError(String),
    InvalidInput(String),
    RateLimitExceeded,
    ServiceUnavailable,
    Timeout,
}

impl std::fmt::Display for EmbeddingProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingProviderError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            EmbeddingProviderError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            EmbeddingProviderError::ServiceUnavailable => write!(f, "Service unavailable"),
            EmbeddingProviderError::Timeout => write!(f, "Embedding request timed out"),
        }
    }
}

impl std::error::Error for EmbeddingProviderError {}

#[derive(Debug, Clone)]
pub struct EmbeddingRequest {
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingResponse {
    pub embedding: Vector,
}

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError>;

    fn model_info(&self) -> String;

    fn embedding_dimension(&self) -> usize;
}
