use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::StudyNote;

#[derive(Debug)]
pub enum NoteRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for NoteRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NoteRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for NoteRepositoryError {}

#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Inserts one note and commits it before returning.
    async fn save(&self, note: &StudyNote) -> Result<(), NoteRepositoryError>;
    async fn count_by_document_id(&self, document_id: Uuid) -> Result<i64, NoteRepositoryError>;
}
