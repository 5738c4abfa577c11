use async_trait::async_trait;
use bytes::Bytes;
use lopdf::Document;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};

pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    fn load(data: &[u8], password: &str) -> Result<Document, DocumentExtractionError> {
        let mut doc = Document::load_mem(data)
            .map_err(|e| DocumentExtractionError::DocumentUnreadable(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(password).map_err(|_e| {
                DocumentExtractionError::DocumentUnreadable(
                    "Failed to decrypt PDF - invalid password".to_string(),
                )
            })?;
        }

        Ok(doc)
    }

    /// Pages are visited in page-number order. A page that fails to extract
    /// adds nothing to the text and is counted in `failed_pages`.
    fn extract_pages(doc: &Document) -> ExtractedContent {
        let pages = doc.get_pages();
        let mut text = String::new();
        let mut failed_pages = 0;

        for page_num in pages.keys() {
            match doc.extract_text(&[*page_num]) {
                Ok(page_text) => text.push_str(&page_text),
                Err(e) => {
                    tracing::debug!(page = page_num, error = %e, "Page has no extractable text");
                    failed_pages += 1;
                }
            }
        }

        ExtractedContent {
            text,
            page_count: pages.len(),
            failed_pages,
        }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract_text_from_bytes(
        &self,
        data: Bytes,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        let password = self.password.clone();

        // Parsing is CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let doc = Self::load(&data, &password)?;
            Ok(Self::extract_pages(&doc))
        })
        .await
        .map_err(|e| DocumentExtractionError::ExtractionFailed(e.to_string()))?
    }
}
