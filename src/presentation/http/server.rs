use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{DocumentHandler, HealthHandler, IngestHandler},
    routes::{document_routes, health_routes, ingest_routes},
};

/// Notifications are small JSON documents; the PDFs themselves are fetched
/// from the object store.
const MAX_BODY_BYTES: usize = 1024 * 1024;

pub struct HttpServer {
    ingest_handler: Arc<IngestHandler>,
    document_handler: Arc<DocumentHandler>,
    health_handler: Arc<HealthHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        ingest_handler: Arc<IngestHandler>,
        document_handler: Arc<DocumentHandler>,
        health_handler: Arc<HealthHandler>,
        port: Option<u16>,
    ) -> Self {
        Self {
            ingest_handler,
            document_handler,
            health_handler,
            port: port.unwrap_or(3000),
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(self.health_handler.clone()))
            .merge(ingest_routes(self.ingest_handler.clone()))
            .merge(document_routes(self.document_handler.clone()))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::{IngestionPipeline, IngestionSettings};
    use crate::application::use_cases::{IngestUploadsUseCase, ListDocumentsUseCase};
    use crate::domain::repositories::NoteRepository;
    use crate::testing::{
        FakeEmbeddingProvider, InMemoryDocumentRepository, InMemoryNoteRepository,
        InMemoryObjectStorage, PlainTextExtractor,
    };
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    struct Harness {
        server: HttpServer,
        storage: Arc<InMemoryObjectStorage>,
        notes: Arc<InMemoryNoteRepository>,
    }

    fn harness() -> Harness {
        let documents = Arc::new(InMemoryDocumentRepository::default());
        let notes = Arc::new(InMemoryNoteRepository::default());
        let storage = Arc::new(InMemoryObjectStorage::default());
        let pipeline = Arc::new(IngestionPipeline::new(
            documents.clone(),
            notes.clone(),
            storage.clone(),
            Arc::new(PlainTextExtractor),
            Arc::new(FakeEmbeddingProvider::new(4)),
            IngestionSettings {
                embed_delay: Duration::ZERO,
                embedding_dimension: 4,
                ..IngestionSettings::default()
            },
        ));

        let server = HttpServer::new(
            Arc::new(IngestHandler::new(Arc::new(IngestUploadsUseCase::new(
                pipeline,
            )))),
            Arc::new(DocumentHandler::new(Arc::new(ListDocumentsUseCase::new(
                documents,
                notes.clone(),
            )))),
            Arc::new(HealthHandler::new(None)),
            None,
        );

        Harness {
            server,
            storage,
            notes,
        }
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn s3_notification(bucket: &str, key: &str) -> Value {
        json!({
            "Records": [{
                "eventName": "ObjectCreated:Put",
                "s3": { "bucket": { "name": bucket }, "object": { "key": key } }
            }]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(
            harness().server.router(),
            Request::builder().uri("/health").body(Body::empty()).unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "healthy");
    }

    #[tokio::test]
    async fn test_s3_notification_is_ingested() {
        let harness = harness();
        harness
            .storage
            .put("study-uploads", "user42/cell biology.pdf", "x".repeat(2300));

        let (status, body) = send(
            harness.server.router(),
            post_json(
                "/events/s3",
                s3_notification("study-uploads", "uploads/user42/cell+biology.pdf"),
            ),
        )
        .await;

        // The prefix is part of the storage key, so nothing is found there.
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], false);
        assert_eq!(body["data"]["results"][0]["outcome"]["status"], "aborted");

        let (status, body) = send(
            harness.server.router(),
            post_json(
                "/events/s3",
                s3_notification("study-uploads", "user42/cell+biology.pdf"),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["results"][0]["key"], "user42/cell biology.pdf");
        assert_eq!(body["data"]["results"][0]["outcome"]["status"], "succeeded");
        assert_eq!(body["data"]["results"][0]["outcome"]["chunks_stored"], 3);
        assert_eq!(harness.notes.notes().len(), 3);
    }

    #[tokio::test]
    async fn test_scanned_document_is_unprocessable() {
        let harness = harness();
        harness.storage.put("study-uploads", "user42/scan.pdf", "x".repeat(40));

        let (status, body) = send(
            harness.server.router(),
            post_json("/events/s3", s3_notification("study-uploads", "user42/scan.pdf")),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "INGESTION_FAILED");
    }

    #[tokio::test]
    async fn test_malformed_key_is_acknowledged() {
        let (status, body) = send(
            harness().server.router(),
            post_json("/events/s3", s3_notification("study-uploads", "notes.pdf")),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["results"][0]["outcome"]["status"], "skipped");
    }

    #[tokio::test]
    async fn test_event_grid_validation_handshake() {
        let (status, body) = send(
            harness().server.router(),
            post_json(
                "/events/eventgrid",
                json!([{
                    "id": "2d1781af-3a4c-4d7c-bd0c-e34b19da4e66",
                    "eventType": "Microsoft.EventGrid.SubscriptionValidationEvent",
                    "subject": "",
                    "data": { "validationCode": "512d38b6-c7b8-40c8-89fe-f46f9e9622b6" }
                }]),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({ "validationResponse": "512d38b6-c7b8-40c8-89fe-f46f9e9622b6" })
        );
    }

    #[tokio::test]
    async fn test_event_grid_blob_created() {
        let harness = harness();
        harness.storage.put("pdfs", "user7/notes.pdf", "y".repeat(120));

        let (status, body) = send(
            harness.server.router(),
            post_json(
                "/events/eventgrid",
                json!([
                    {
                        "eventType": "Microsoft.Storage.BlobCreated",
                        "data": { "url": "https://studyacct.blob.core.windows.net/pdfs/user7/notes.pdf" }
                    },
                    {
                        "eventType": "Microsoft.Storage.BlobDeleted",
                        "data": { "url": "https://studyacct.blob.core.windows.net/pdfs/user7/old.pdf" }
                    }
                ]),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["results"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"]["results"][0]["bucket"], "pdfs");
        assert_eq!(harness.notes.notes().len(), 1);
    }

    #[tokio::test]
    async fn test_list_documents_with_note_counts() {
        let harness = harness();
        harness.storage.put("study-uploads", "user42/a.pdf", "z".repeat(1500));
        let router = harness.server.router();
        send(
            router.clone(),
            post_json("/events/s3", s3_notification("study-uploads", "user42/a.pdf")),
        )
        .await;

        let (status, body) = send(
            router.clone(),
            Request::builder()
                .uri("/documents?user_id=user42")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
        assert_eq!(body["data"]["documents"][0]["file_name"], "a.pdf");
        assert_eq!(body["data"]["documents"][0]["note_count"], 2);
        let document_id = body["data"]["documents"][0]["id"].as_str().unwrap();
        let stored = harness
            .notes
            .count_by_document_id(document_id.parse().unwrap())
            .await
            .unwrap();
        assert_eq!(stored, 2);

        let (status, _) = send(
            router,
            Request::builder().uri("/documents").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
