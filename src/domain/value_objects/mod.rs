pub mod ingestion_outcome;
pub mod upload_event;
pub mod upload_path;

pub use ingestion_outcome::{AbortReason, ChunkFailure, IngestionOutcome, SkipReason};
pub use upload_event::UploadEvent;
pub use upload_path::{MalformedEventPath, UploadPath};
