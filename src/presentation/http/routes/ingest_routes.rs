use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::IngestHandler;

pub fn ingest_routes(ingest_handler: Arc<IngestHandler>) -> Router {
    Router::new()
        .route("/events/s3", post(IngestHandler::handle_s3_event))
        .route("/events/eventgrid", post(IngestHandler::handle_event_grid))
        .with_state(ingest_handler)
}
