pub mod document_handler;
pub mod health_handler;
pub mod ingest_handler;

pub use document_handler::DocumentHandler;
pub use health_handler::HealthHandler;
pub use ingest_handler::IngestHandler;
