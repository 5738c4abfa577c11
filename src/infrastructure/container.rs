use std::sync::Arc;

use crate::{
    application::{
        ports::{DocumentExtractor, EmbeddingProvider, ObjectStorage},
        services::IngestionPipeline,
        use_cases::{IngestUploadsUseCase, ListDocumentsUseCase},
    },
    domain::repositories::{DocumentRepository, NoteRepository},
    infrastructure::{
        config::AppConfig,
        database::{
            create_connection_pool,
            repositories::{PostgresDocumentRepository, PostgresNoteRepository},
            run_migrations,
        },
        external_services::{GeminiClientConfig, GeminiEmbeddingClient, PdfExtractor},
        object_storage::CloudObjectStorage,
    },
    presentation::http::handlers::{DocumentHandler, HealthHandler, IngestHandler},
};

pub struct AppContainer {
    // Repositories
    pub document_repository: Arc<dyn DocumentRepository>,
    pub note_repository: Arc<dyn NoteRepository>,

    // External Services
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
    pub object_storage: Arc<dyn ObjectStorage>,
    pub document_extractor: Arc<dyn DocumentExtractor>,

    // Application Services
    pub ingestion_pipeline: Arc<IngestionPipeline>,

    // Use Cases
    pub ingest_uploads_use_case: Arc<IngestUploadsUseCase>,
    pub list_documents_use_case: Arc<ListDocumentsUseCase>,

    // HTTP Handlers
    pub ingest_handler: Arc<IngestHandler>,
    pub document_handler: Arc<DocumentHandler>,
    pub health_handler: Arc<HealthHandler>,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool(&config.database_url, config.db_max_connections)?;

        let migration_pool = db_pool.clone();
        tokio::task::spawn_blocking(move || run_migrations(&migration_pool))
            .await
            .map_err(|e| format!("Migration task failed: {}", e))??;

        // Create repositories
        let document_repository: Arc<dyn DocumentRepository> =
            Arc::new(PostgresDocumentRepository::new(db_pool.clone()));
        let note_repository: Arc<dyn NoteRepository> =
            Arc::new(PostgresNoteRepository::new(db_pool.clone()));

        // Create external services
        let embedding_provider: Arc<dyn EmbeddingProvider> =
            Arc::new(GeminiEmbeddingClient::new(GeminiClientConfig {
                base_url: config.embedding_api_url.clone(),
                api_key: config.gemini_api_key.clone(),
                model: config.embedding_model.clone(),
                dimension: config.ingestion.embedding_dimension,
                timeout_secs: config.ingestion.embed_timeout.as_secs(),
            })?);
        let object_storage: Arc<dyn ObjectStorage> =
            Arc::new(CloudObjectStorage::new(config.storage_provider));
        let document_extractor: Arc<dyn DocumentExtractor> = Arc::new(PdfExtractor::new());

        tracing::info!(
            model = %embedding_provider.model_info(),
            dimension = embedding_provider.embedding_dimension(),
            storage = ?config.storage_provider,
            "Services configured"
        );

        // Create application services
        let ingestion_pipeline = Arc::new(IngestionPipeline::new(
            document_repository.clone(),
            note_repository.clone(),
            object_storage.clone(),
            document_extractor.clone(),
            embedding_provider.clone(),
            config.ingestion.clone(),
        ));

        // Create use cases
        let ingest_uploads_use_case =
            Arc::new(IngestUploadsUseCase::new(ingestion_pipeline.clone()));
        let list_documents_use_case = Arc::new(ListDocumentsUseCase::new(
            document_repository.clone(),
            note_repository.clone(),
        ));

        // Create HTTP handlers
        let ingest_handler = Arc::new(IngestHandler::new(ingest_uploads_use_case.clone()));
        let document_handler = Arc::new(DocumentHandler::new(list_documents_use_case.clone()));
        let health_handler = Arc::new(HealthHandler::new(Some(db_pool)));

        Ok(Self {
            document_repository,
            note_repository,
            embedding_provider,
            object_storage,
            document_extractor,
            ingestion_pipeline,
            ingest_uploads_use_case,
            list_documents_use_case,
            ingest_handler,
            document_handler,
            health_handler,
        })
    }
}
