use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug)]
pub enum DocumentExtractionError {
    /// The container itself could not be parsed or opened.
    DocumentUnreadable(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for DocumentExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentExtractionError::DocumentUnreadable(msg) => {
                write!(f, "Document unreadable: {}", msg)
            }
            DocumentExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for DocumentExtractionError {}

#[derive(Debug, Clone, Default)]
pub struct ExtractedContent {
    /// Page texts concatenated in page order.
    pub text: String,
    pub page_count: usize,
    /// Pages that produced no text because extraction failed on them.
    pub failed_pages: usize,
}

impl ExtractedContent {
    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    /// A failing page contributes an empty string; only an unreadable
    /// container is an error.
    async fn extract_text_from_bytes(
        &self,
        data: Bytes,
    ) -> Result<ExtractedContent, DocumentExtractionError>;
}
