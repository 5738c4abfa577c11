pub mod document_routes;
pub mod health_routes;
pub mod ingest_routes;

pub use document_routes::*;
pub use health_routes::*;
pub use ingest_routes::*;
