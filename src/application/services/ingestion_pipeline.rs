use futures::{StreamExt, stream};
use pgvector::Vector;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use uuid::Uuid;
use tracing::{error, info, warn};

use crate::application::ports::{
    DocumentExtractor, EmbeddingProvider, ObjectStorage,
    embedding_provider::{EmbeddingProviderError, EmbeddingRequest},
};
use crate::application::services::chunking::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CHUNK_LENGTH, FixedWindowChunker, TextSplitter,
};
use crate::domain::entities::{Document, StudyNote};
use crate::domain::repositories::{
    DocumentRepository, NoteRepository, note_repository::NoteRepositoryError,
};
use crate::domain::value_objects::{
    AbortReason, ChunkFailure, IngestionOutcome, SkipReason, UploadEvent, UploadPath,
};

#[derive(Debug, Clone)]
pub struct IngestionSettings {
    pub chunk_size: usize,
    pub min_chunk_length: usize,
    /// Pause before every embedding call after the first. Each in-flight
    /// call paces itself, so with `embed_concurrency` above one that many
    /// calls leave together after a single delay.
    pub embed_delay: Duration,
    pub embed_timeout: Duration,
    pub pipeline_timeout: Duration,
    pub embed_concurrency: usize,
    pub embedding_dimension: usize,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            min_chunk_length: DEFAULT_MIN_CHUNK_LENGTH,
            embed_delay: Duration::from_secs(1),
            embed_timeout: Duration::from_secs(30),
            pipeline_timeout: Duration::from_secs(840),
            embed_concurrency: 1,
            embedding_dimension: 768,
        }
    }
}

enum ChunkOutcome {
    Stored,
    EmbeddingFailed(ChunkFailure),
    PersistFailed(NoteRepositoryError),
}

#[derive(Debug, Default)]
struct ChunkTally {
    stored: usize,
    failures: Vec<ChunkFailure>,
}

/// Turns one upload notification into persisted, embedded study notes.
///
/// Each run registers the document, downloads and extracts the PDF, then
/// embeds and stores chunk by chunk. Every stored chunk is committed on its
/// own, so an interrupted run leaves the chunks it finished.
pub struct IngestionPipeline {
    document_repository: Arc<dyn DocumentRepository>,
    note_repository: Arc<dyn NoteRepository>,
    object_storage: Arc<dyn ObjectStorage>,
    document_extractor: Arc<dyn DocumentExtractor>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    chunker: FixedWindowChunker,
    settings: IngestionSettings,
}

impl IngestionPipeline {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        note_repository: Arc<dyn NoteRepository>,
        object_storage: Arc<dyn ObjectStorage>,
        document_extractor: Arc<dyn DocumentExtractor>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        settings: IngestionSettings,
    ) -> Self {
        Self {
            document_repository,
            note_repository,
            object_storage,
            document_extractor,
            embedding_provider,
            chunker: FixedWindowChunker::new(settings.chunk_size, settings.min_chunk_length),
            settings,
        }
    }

    pub async fn ingest(&self, event: &UploadEvent) -> IngestionOutcome {
        let limit = self.settings.pipeline_timeout;
        let registered = OnceLock::new();

        match tokio::time::timeout(limit, self.run(event, &registered)).await {
            Ok(outcome) => outcome,
            Err(_) => {
                let document_id = registered.get().copied();
                error!(
                    bucket = %event.bucket,
                    key = %event.key,
                    ?document_id,
                    timeout_secs = limit.as_secs(),
                    "Ingestion timed out"
                );
                IngestionOutcome::Aborted(AbortReason::TimedOut {
                    document_id,
                    seconds: limit.as_secs(),
                })
            }
        }
    }

    /// `registered` receives the document id as soon as the row exists, so
    /// a timeout can tell whether a re-delivery would be skipped.
    async fn run(&self, event: &UploadEvent, registered: &OnceLock<Uuid>) -> IngestionOutcome {
        let upload = match UploadPath::parse(&event.key) {
            Ok(upload) => upload,
            Err(e) => {
                warn!(bucket = %event.bucket, error = %e, "Skipping upload with bad path");
                return IngestionOutcome::Skipped(SkipReason::MalformedEventPath {
                    key: event.key.clone(),
                });
            }
        };

        info!(
            bucket = %event.bucket,
            storage_key = %upload,
            user_id = upload.user_id(),
            "Processing upload"
        );

        // Known keys stop here, before anything is downloaded.
        match self
            .document_repository
            .find_by_storage_key(upload.storage_key())
            .await
        {
            Ok(Some(existing)) => return Self::already_ingested(&existing),
            Ok(None) => {}
            Err(e) => return Self::registry_failure(e),
        }

        let data = match self
            .object_storage
            .fetch(&event.bucket, upload.storage_key())
            .await
        {
            Ok(data) => data,
            Err(e) => {
                error!(storage_key = %upload, error = %e, "Failed to download upload");
                return IngestionOutcome::Aborted(AbortReason::StoreFetchFailed {
                    message: e.to_string(),
                });
            }
        };
        info!(storage_key = %upload, size_bytes = data.len(), "Download complete");

        let resolved = match self.document_repository.resolve_or_create(&upload).await {
            Ok(resolved) => resolved,
            Err(e) => return Self::registry_failure(e),
        };
        // Lost a race with a concurrent delivery of the same key.
        if resolved.was_existing {
            return Self::already_ingested(&resolved.document);
        }
        let document = resolved.document;
        let _ = registered.set(document.id());
        info!(document_id = %document.id(), storage_key = %upload, "Created new document");

        let content = match self.document_extractor.extract_text_from_bytes(data).await {
            Ok(content) => content,
            Err(e) => {
                error!(document_id = %document.id(), error = %e, "PDF corrupt or unreadable");
                return IngestionOutcome::Aborted(AbortReason::DocumentUnreadable {
                    document_id: document.id(),
                    message: e.to_string(),
                });
            }
        };

        if content.failed_pages > 0 {
            warn!(
                document_id = %document.id(),
                failed_pages = content.failed_pages,
                page_count = content.page_count,
                "Some pages yielded no text"
            );
        }

        let characters = content.character_count();
        if characters < self.chunker.min_length() {
            error!(
                document_id = %document.id(),
                characters,
                "PDF has no text, possibly a scanned image"
            );
            return IngestionOutcome::Aborted(AbortReason::EmptyOrScannedDocument {
                document_id: document.id(),
                characters,
            });
        }

        let chunks = self.chunker.split_text(&content.text);
        info!(document_id = %document.id(), chunks = chunks.len(), "Chunks to embed");

        let tally = match self.embed_and_store(&document, chunks).await {
            Ok(tally) => tally,
            Err(reason) => return IngestionOutcome::Aborted(reason),
        };

        if tally.failures.is_empty() {
            info!(
                document_id = %document.id(),
                chunks_stored = tally.stored,
                "Ingestion complete"
            );
            IngestionOutcome::Succeeded {
                document_id: document.id(),
                chunks_stored: tally.stored,
            }
        } else {
            warn!(
                document_id = %document.id(),
                chunks_stored = tally.stored,
                failed_chunks = tally.failures.len(),
                "Ingestion complete with failed chunks"
            );
            IngestionOutcome::PartiallySucceeded {
                document_id: document.id(),
                chunks_stored: tally.stored,
                failed_chunks: tally.failures.len(),
            }
        }
    }

    fn already_ingested(document: &Document) -> IngestionOutcome {
        info!(
            document_id = %document.id(),
            storage_key = document.storage_key(),
            "Document already exists, skipping"
        );
        IngestionOutcome::Skipped(SkipReason::AlreadyIngested {
            document_id: document.id(),
        })
    }

    fn registry_failure(e: impl std::fmt::Display) -> IngestionOutcome {
        error!(error = %e, "Document registry failed");
        IngestionOutcome::Aborted(AbortReason::DatabaseError {
            document_id: None,
            chunks_stored: 0,
            message: e.to_string(),
        })
    }

    /// Embedding failures are tallied and skipped; the first persistence
    /// failure ends the loop.
    async fn embed_and_store(
        &self,
        document: &Document,
        chunks: Vec<String>,
    ) -> Result<ChunkTally, AbortReason> {
        let total = chunks.len();
        let mut tally = ChunkTally::default();

        let mut outcomes = stream::iter(chunks.into_iter().enumerate())
            .map(|(index, chunk)| self.process_chunk(document, index, total, chunk))
            .buffered(self.settings.embed_concurrency.max(1));

        while let Some(outcome) = outcomes.next().await {
            match outcome {
                ChunkOutcome::Stored => tally.stored += 1,
                ChunkOutcome::EmbeddingFailed(failure) => tally.failures.push(failure),
                ChunkOutcome::PersistFailed(e) => {
                    error!(
                        document_id = %document.id(),
                        chunks_stored = tally.stored,
                        error = %e,
                        "Failed to persist chunk, aborting"
                    );
                    return Err(AbortReason::DatabaseError {
                        document_id: Some(document.id()),
                        chunks_stored: tally.stored,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(tally)
    }

    async fn process_chunk(
        &self,
        document: &Document,
        index: usize,
        total: usize,
        chunk: String,
    ) -> ChunkOutcome {
        if index > 0 && !self.settings.embed_delay.is_zero() {
            tokio::time::sleep(self.settings.embed_delay).await;
        }

        let embedding = match self.embed_chunk(&chunk).await {
            Ok(embedding) => embedding,
            Err(e) => {
                warn!(
                    document_id = %document.id(),
                    chunk = index,
                    error = %e,
                    "Failed to embed chunk, continuing"
                );
                return ChunkOutcome::EmbeddingFailed(ChunkFailure {
                    index,
                    message: e.to_string(),
                });
            }
        };

        let note = StudyNote::new(
            document.user_id().to_string(),
            document.id(),
            chunk,
            embedding,
        );

        match self.note_repository.save(&note).await {
            Ok(()) => {
                info!(document_id = %document.id(), "Saved chunk {}/{}", index + 1, total);
                ChunkOutcome::Stored
            }
            Err(e) => ChunkOutcome::PersistFailed(e),
        }
    }

    async fn embed_chunk(&self, chunk: &str) -> Result<Vector, EmbeddingProviderError> {
        let request = EmbeddingRequest {
            text: chunk.to_string(),
        };

        let response = tokio::time::timeout(
            self.settings.embed_timeout,
            self.embedding_provider.generate_embedding(request),
        )
        .await
        .map_err(|_| EmbeddingProviderError::Timeout)??;

        let dimension = response.embedding.as_slice().len();
        if dimension != self.settings.embedding_dimension {
            return Err(EmbeddingProviderError::ApiError(format!(
                "expected a {}-dimensional embedding, got {}",
                self.settings.embedding_dimension, dimension
            )));
        }

        Ok(response.embedding)
    }
}
