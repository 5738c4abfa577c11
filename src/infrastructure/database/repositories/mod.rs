pub mod postgres_document_repository;
pub mod postgres_note_repository;

pub use postgres_document_repository::PostgresDocumentRepository;
pub use postgres_note_repository::PostgresNoteRepository;
