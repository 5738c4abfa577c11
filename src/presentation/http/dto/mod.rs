pub mod document_dto;
pub mod event_dto;
pub mod ingestion_dto;
pub mod response_dto;

pub use document_dto::*;
pub use event_dto::*;
pub use ingestion_dto::*;
pub use response_dto::*;
