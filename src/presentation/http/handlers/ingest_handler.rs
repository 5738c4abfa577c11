use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::use_cases::{
    IngestUploadsUseCase,
    ingest_uploads::{IngestUploadsRequest, IngestUploadsResponse},
};
use crate::presentation::http::dto::{
    ApiResponse, EventGridEventDto, IngestionReportDto, S3EventNotificationDto,
    SubscriptionValidationResponseDto,
};

/// Receives storage notifications. The status code tells the delivery
/// system whether to re-deliver: 503 for transient failures, 422 for
/// uploads that will never ingest, 200 otherwise.
pub struct IngestHandler {
    ingest_uploads_use_case: Arc<IngestUploadsUseCase>,
}

impl IngestHandler {
    pub fn new(ingest_uploads_use_case: Arc<IngestUploadsUseCase>) -> Self {
        Self {
            ingest_uploads_use_case,
        }
    }

    pub async fn handle_s3_event(
        State(handler): State<Arc<IngestHandler>>,
        Json(notification): Json<S3EventNotificationDto>,
    ) -> Response {
        let events = notification.into_upload_events();
        info!(records = events.len(), "Received S3 notification");

        let response = handler
            .ingest_uploads_use_case
            .execute(IngestUploadsRequest { events })
            .await;

        report(response)
    }

    pub async fn handle_event_grid(
        State(handler): State<Arc<IngestHandler>>,
        Json(events): Json<Vec<EventGridEventDto>>,
    ) -> Response {
        // The handshake arrives alone, before any blob event is sent.
        if let Some(code) = events.iter().find_map(|event| event.validation_code()) {
            info!("Answering Event Grid subscription validation");
            let body = SubscriptionValidationResponseDto {
                validation_response: code.to_string(),
            };
            return (StatusCode::OK, Json(body)).into_response();
        }

        let mut uploads = Vec::with_capacity(events.len());
        for event in &events {
            match event.upload_event() {
                Some(upload) => uploads.push(upload),
                None => info!(
                    event_type = %event.event_type,
                    id = event.id.as_deref().unwrap_or("-"),
                    subject = event.subject.as_deref().unwrap_or("-"),
                    "Ignoring Event Grid event"
                ),
            }
        }

        let response = handler
            .ingest_uploads_use_case
            .execute(IngestUploadsRequest { events: uploads })
            .await;

        report(response)
    }
}

fn report(response: IngestUploadsResponse) -> Response {
    let status = report_status(&response);
    let dto = IngestionReportDto::from(response);

    if status == StatusCode::OK {
        return (status, Json(ApiResponse::success(dto))).into_response();
    }

    let (code, message) = if status == StatusCode::SERVICE_UNAVAILABLE {
        ("INGESTION_RETRYABLE", "At least one upload failed transiently")
    } else {
        ("INGESTION_FAILED", "At least one upload could not be ingested")
    };
    warn!(status = %status, "{}", message);

    (
        status,
        Json(ApiResponse::failure(
            dto,
            code.to_string(),
            message.to_string(),
        )),
    )
        .into_response()
}

pub fn report_status(response: &IngestUploadsResponse) -> StatusCode {
    if response.any_retryable() {
        StatusCode::SERVICE_UNAVAILABLE
    } else if !response.all_succeeded() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    }
}
