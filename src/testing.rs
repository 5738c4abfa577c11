//! In-memory stand-ins for every port, shared by the unit tests.

use async_trait::async_trait;
use bytes::Bytes;
use pgvector::Vector;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::document_extractor::{
    DocumentExtractionError, DocumentExtractor, ExtractedContent,
};
use crate::application::ports::embedding_provider::{
    EmbeddingProvider, EmbeddingProviderError, EmbeddingRequest, EmbeddingResponse,
};
use crate::application::ports::object_storage::{ObjectStorage, ObjectStorageError};
use crate::domain::entities::{Document, StudyNote};
use crate::domain::repositories::document_repository::{
    DocumentRepository, DocumentRepositoryError, ResolvedDocument,
};
use crate::domain::repositories::note_repository::{NoteRepository, NoteRepositoryError};
use crate::domain::value_objects::UploadPath;

#[derive(Default)]
pub struct InMemoryDocumentRepository {
    documents: Mutex<HashMap<String, Document>>,
    pub fail: bool,
}

impl InMemoryDocumentRepository {
    pub fn failing() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            fail: true,
        }
    }

    pub fn len(&self) -> usize {
        self.documents.lock().unwrap().len()
    }

    pub fn insert(&self, document: Document) {
        self.documents
            .lock()
            .unwrap()
            .insert(document.storage_key().to_string(), document);
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn resolve_or_create(
        &self,
        upload: &UploadPath,
    ) -> Result<ResolvedDocument, DocumentRepositoryError> {
        if self.fail {
            return Err(DocumentRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }

        let mut documents = self.documents.lock().unwrap();
        if let Some(existing) = documents.get(upload.storage_key()) {
            return Ok(ResolvedDocument {
                document: existing.clone(),
                was_existing: true,
            });
        }

        let document = Document::new(
            upload.user_id().to_string(),
            upload.file_name().to_string(),
            upload.storage_key().to_string(),
        );
        documents.insert(upload.storage_key().to_string(), document.clone());

        Ok(ResolvedDocument {
            document,
            was_existing: false,
        })
    }

    async fn find_by_storage_key(
        &self,
        storage_key: &str,
    ) -> Result<Option<Document>, DocumentRepositoryError> {
        if self.fail {
            return Err(DocumentRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }
        Ok(self.documents.lock().unwrap().get(storage_key).cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Document>, DocumentRepositoryError> {
        if self.fail {
            return Err(DocumentRepositoryError::DatabaseError(
                "connection refused".to_string(),
            ));
        }
        let mut documents: Vec<Document> = self
            .documents
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.user_id() == user_id)
            .cloned()
            .collect();
        documents.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        Ok(documents)
    }
}

#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<Vec<StudyNote>>,
    /// Every save after this many successful ones fails.
    pub fail_after: Option<usize>,
}

impl InMemoryNoteRepository {
    pub fn failing_after(saved: usize) -> Self {
        Self {
            notes: Mutex::new(Vec::new()),
            fail_after: Some(saved),
        }
    }

    pub fn notes(&self) -> Vec<StudyNote> {
        self.notes.lock().unwrap().clone()
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn save(&self, note: &StudyNote) -> Result<(), NoteRepositoryError> {
        let mut notes = self.notes.lock().unwrap();
        if self.fail_after.is_some_and(|limit| notes.len() >= limit) {
            return Err(NoteRepositoryError::DatabaseError(
                "server closed the connection unexpectedly".to_string(),
            ));
        }
        notes.push(note.clone());
        Ok(())
    }

    async fn count_by_document_id(&self, document_id: Uuid) -> Result<i64, NoteRepositoryError> {
        let notes = self.notes.lock().unwrap();
        Ok(notes.iter().filter(|n| n.document_id() == document_id).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryObjectStorage {
    objects: Mutex<HashMap<(String, String), Bytes>>,
}

impl InMemoryObjectStorage {
    pub fn put(&self, bucket: &str, key: &str, data: impl Into<Bytes>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), data.into());
    }
}

#[async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, ObjectStorageError> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| ObjectStorageError::ObjectNotFound(format!("{}/{}", bucket, key)))
    }
}

/// Treats the stored bytes as the document text; invalid UTF-8 plays the
/// part of a corrupt PDF.
pub struct PlainTextExtractor;

#[async_trait]
impl DocumentExtractor for PlainTextExtractor {
    async fn extract_text_from_bytes(
        &self,
        data: Bytes,
    ) -> Result<ExtractedContent, DocumentExtractionError> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| DocumentExtractionError::DocumentUnreadable(e.to_string()))?;
        Ok(ExtractedContent {
            text,
            page_count: 1,
            failed_pages: 0,
        })
    }
}

/// Embeds any text as a constant vector. Texts containing `fail_marker` are
/// rejected; texts containing `slow_marker` stall for `slow_delay`.
pub struct FakeEmbeddingProvider {
    pub dimension: usize,
    pub fail_marker: Option<String>,
    pub slow_marker: Option<String>,
    pub slow_delay: Duration,
    pub calls: AtomicUsize,
}

impl FakeEmbeddingProvider {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            fail_marker: None,
            slow_marker: None,
            slow_delay: Duration::from_secs(5),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    pub fn stalling_on(mut self, marker: &str, delay: Duration) -> Self {
        self.slow_marker = Some(marker.to_string());
        self.slow_delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddingProvider {
    async fn generate_embedding(
        &self,
        request: EmbeddingRequest,
    ) -> Result<EmbeddingResponse, EmbeddingProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(marker) = &self.slow_marker {
            if request.text.contains(marker.as_str()) {
                tokio::time::sleep(self.slow_delay).await;
            }
        }

        if let Some(marker) = &self.fail_marker {
            if request.text.contains(marker.as_str()) {
                return Err(EmbeddingProviderError::ApiError(
                    "400 Bad Request".to_string(),
                ));
            }
        }

        Ok(EmbeddingResponse {
            embedding: Vector::from(vec![0.5; self.dimension]),
        })
    }

    fn model_info(&self) -> String {
        "fake-embedding".to_string()
    }

    fn embedding_dimension(&self) -> usize {
        self.dimension
    }
}
