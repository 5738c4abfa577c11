use std::sync::Arc;
use tracing::info;

use crate::application::services::IngestionPipeline;
use crate::domain::value_objects::{IngestionOutcome, UploadEvent};

#[derive(Debug, Clone)]
pub struct IngestUploadsRequest {
    pub events: Vec<UploadEvent>,
}

#[derive(Debug, Clone)]
pub struct IngestUploadsResponse {
    pub outcomes: Vec<(UploadEvent, IngestionOutcome)>,
    pub processing_time_ms: u64,
}

impl IngestUploadsResponse {
    pub fn any_retryable(&self) -> bool {
        self.outcomes.iter().any(|(_, outcome)| outcome.is_retryable())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|(_, outcome)| outcome.is_success())
    }
}

/// Runs the pipeline for every upload in a notification, one after another.
pub struct IngestUploadsUseCase {
    pipeline: Arc<IngestionPipeline>,
}

impl IngestUploadsUseCase {
    pub fn new(pipeline: Arc<IngestionPipeline>) -> Self {
        Self { pipeline }
    }

    pub async fn execute(&self, request: IngestUploadsRequest) -> IngestUploadsResponse {
        let start_time = std::time::Instant::now();
        let mut outcomes = Vec::with_capacity(request.events.len());

        for event in request.events {
            let outcome = self.pipeline.ingest(&event).await;
            outcomes.push((event, outcome));
        }

        let processing_time_ms = start_time.elapsed().as_millis() as u64;
        info!(
            uploads = outcomes.len(),
            processing_time_ms, "Finished upload notification"
        );

        IngestUploadsResponse {
            outcomes,
            processing_time_ms,
        }
    }
}
