pub mod ingest_uploads;
pub mod list_documents;

pub use ingest_uploads::IngestUploadsUseCase;
pub use list_documents::{DocumentSummary, ListDocumentsUseCase};
