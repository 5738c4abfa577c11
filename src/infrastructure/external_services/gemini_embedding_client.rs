use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::embedding_provider::{
    EmbeddingProvider, EmbeddingProviderError, EmbeddingRequest, EmbeddingResponse,
};

#[derive(Serialize)]
pub struct EmbedContentRequest {
    pub model: String,
    pub content: Content,
}

#[derive(Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Serialize)]
pub struct Part {
    pub text: String,
}

#[derive(Deserialize)]
pub struct EmbedContentResponse {
    pub embedding: ContentEmbedding,
}

#[derive(Deserialize)]
pub struct ContentEmbedding {
    pub values: Vec<f32>,
}

#[derive(Debug, Clone)]
pub struct GeminiClientConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

/// Calls the Generative Language `embedContent` endpoint. There is no retry
/// here; a failed call fails its chunk.
#[derive(Debug, Clone)]
pub struct GeminiEmbeddingClient {
    client: Client,
    config: GeminiClientConfig,
}

impl GeminiEmbeddingClient {
    pub fn new(config: GeminiClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:embedContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    pub fn build_request(model: &str, text: &str) -> EmbedContentRequest {
        EmbedContentRequest {
            model: format!("models/{}", model),
            content: Content {
                parts: vec![Part {
                    text: text.to_string(),
                }],
            },
        }
    }

    async fn embed_content(
        &self,
        model: &str,
        text: &str,
    ) -> Result<Vec<f32>, EmbeddingProviderError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::build_request(model, text))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    EmbeddingProviderError::Timeout
                } else {
                    EmbeddingProviderError::NetworkError(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        let parsed = response
            .json::<EmbedContentResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        Ok(parsed.embedding.values)
    }

    fn status_error(status: StatusCode, body: String) -> EmbeddingProviderError {
        match status {
            StatusCode::TOO_MANY_REQUESTS => EmbeddingProviderError::RateLimitExceeded,
            StatusCode::BAD_REQUEST => EmbeddingProviderError::InvalidInput(body),
            s if s.is_server_error() => EmbeddingProviderError::ServiceUnavailable,
            s => EmbeddingProviderError::ApiError(format!("{}: {}", s, body)),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingClient {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError> {
        if request.text.trim().is_empty() {
            return Err(EmbeddingProviderError::InvalidInput(
                "cannot embed empty text".to_string(),
            ));
        }

        let values = self
            .embed_content(&self.config.model, &request.text)
            .await?;

        if values.is_empty() {
            return Err(EmbeddingProviderError::ApiError(
                "No embedding returned".to_string(),
            ));
        }

        Ok(EmbeddingResponse {
            embedding: Vector::from(values),
        })
    }

    fn model_info(&self) -> String {
        self.config.model.clone()
    }

    fn embedding_dimension(&self) -> usize {
        self.config.dimension
    }
}
