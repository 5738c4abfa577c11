use serde::Serialize;

use crate::application::use_cases::ingest_uploads::IngestUploadsResponse;
use crate::domain::value_objects::IngestionOutcome;

#[derive(Debug, Serialize)]
pub struct IngestionResultDto {
    pub bucket: String,
    pub key: String,
    pub outcome: IngestionOutcome,
}

#[derive(Debug, Serialize)]
pub struct IngestionReportDto {
    pub results: Vec<IngestionResultDto>,
    pub processing_time_ms: u64,
}

impl From<IngestUploadsResponse> for IngestionReportDto {
    fn from(response: IngestUploadsResponse) -> Self {
        Self {
            results: response
                .outcomes
                .into_iter()
                .map(|(event, outcome)| IngestionResultDto {
                    bucket: event.bucket,
                    key: event.key,
                    outcome,
                })
                .collect(),
            processing_time_ms: response.processing_time_ms,
        }
    }
}
