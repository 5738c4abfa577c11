use async_trait::async_trait;

use crate::domain::entities::Document;
use crate::domain::value_objects::UploadPath;

#[derive(Debug)]
pub enum DocumentRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for DocumentRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            DocumentRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentRepositoryError {}

/// Result of a registry lookup. `was_existing` means the storage key had
/// already been registered before this call.
#[derive(Debug, Clone)]
pub struct ResolvedDocument {
    pub document: Document,
    pub was_existing: bool,
}

/// The document registry: maps storage keys to durable document identities.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Looks the key up and inserts a new document when it is absent. The
    /// insert is committed immediately. Concurrent callers for the same key
    /// all observe the same document; only one sees `was_existing == false`.
    async fn resolve_or_create(
        &self,
        upload: &UploadPath,
    ) -> Result<ResolvedDocument, DocumentRepositoryError>;

    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError>;

    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Document>, DocumentRepositoryError>;
}
