use std::sync::Arc;

use crate::domain::entities::Document;
use crate::domain::repositories::{
    DocumentRepository, NoteRepository, document_repository::DocumentRepositoryError,
    note_repository::NoteRepositoryError,
};

#[derive(Debug)]
pub enum ListDocumentsError {
    RepositoryError(String),
    ValidationError(String),
}

impl std::fmt::Display for ListDocumentsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListDocumentsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ListDocumentsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ListDocumentsError {}

impl From<DocumentRepositoryError> for ListDocumentsError {
    fn from(error: DocumentRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

impl From<NoteRepositoryError> for ListDocumentsError {
    fn from(error: NoteRepositoryError) -> Self {
        ListDocumentsError::RepositoryError(error.to_string())
    }
}

/// A document with the number of notes stored for it. Zero means the
/// upload was unreadable, empty, or never embedded successfully.
#[derive(Debug, Clone)]
pub struct DocumentSummary {
    pub document: Document,
    pub note_count: i64,
}

pub struct ListDocumentsUseCase {
    document_repository: Arc<dyn DocumentRepository>,
    note_repository: Arc<dyn NoteRepository>,
}

impl ListDocumentsUseCase {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        note_repository: Arc<dyn NoteRepository>,
    ) -> Self {
        Self {
            document_repository,
            note_repository,
        }
    }

    pub async fn execute(&self, user_id: &str) -> Result<Vec<DocumentSummary>, ListDocumentsError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(ListDocumentsError::ValidationError(
                "user_id cannot be empty".to_string(),
            ));
        }

        let documents = self.document_repository.list_by_user(user_id).await?;

        let mut summaries = Vec::with_capacity(documents.len());
        for document in documents {
            let note_count = self
                .note_repository
                .count_by_document_id(document.id())
                .await?;
            summaries.push(DocumentSummary {
                document,
                note_count,
            });
        }

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::StudyNote;
    use crate::testing::{InMemoryDocumentRepository, InMemoryNoteRepository};
    use pgvector::Vector;

    #[tokio::test]
    async fn test_lists_only_the_users_documents() {
        let repository = Arc::new(InMemoryDocumentRepository::default());
        let alices = Document::new(
            "alice".to_string(),
            "a.pdf".to_string(),
            "alice/a.pdf".to_string(),
        );
        let notes = Arc::new(InMemoryNoteRepository::default());
        for content in ["first chunk", "second chunk"] {
            notes
                .save(&StudyNote::new(
                    "alice".to_string(),
                    alices.id(),
                    content.to_string(),
                    Vector::from(vec![0.0; 4]),
                ))
                .await
                .unwrap();
        }
        repository.insert(alices);
        repository.insert(Document::new(
            "bob".to_string(),
            "b.pdf".to_string(),
            "bob/b.pdf".to_string(),
        ));
        let use_case = ListDocumentsUseCase::new(repository, notes);

        let summaries = use_case.execute("alice").await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].document.file_name(), "a.pdf");
        assert_eq!(summaries[0].note_count, 2);
    }

    #[tokio::test]
    async fn test_rejects_blank_user() {
        let use_case = ListDocumentsUseCase::new(
            Arc::new(InMemoryDocumentRepository::default()),
            Arc::new(InMemoryNoteRepository::default()),
        );

        let result = use_case.execute("  ").await;

        assert!(matches!(result, Err(ListDocumentsError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_surfaces_repository_errors() {
        let use_case = ListDocumentsUseCase::new(
            Arc::new(InMemoryDocumentRepository::failing()),
            Arc::new(InMemoryNoteRepository::default()),
        );

        let result = use_case.execute("alice").await;

        assert!(matches!(result, Err(ListDocumentsError::RepositoryError(_))));
    }
}
