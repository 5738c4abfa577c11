use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::DocumentSummary;

#[derive(Debug, Deserialize)]
pub struct ListDocumentsQueryDto {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DocumentResponseDto {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub storage_key: String,
    pub note_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentSummary> for DocumentResponseDto {
    fn from(summary: DocumentSummary) -> Self {
        let document = summary.document;
        Self {
            id: document.id(),
            user_id: document.user_id().to_string(),
            file_name: document.file_name().to_string(),
            storage_key: document.storage_key().to_string(),
            note_count: summary.note_count,
            created_at: document.created_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentListResponseDto {
    pub documents: Vec<DocumentResponseDto>,
    pub total: usize,
}
