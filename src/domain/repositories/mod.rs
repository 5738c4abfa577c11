pub mod document_repository;
pub mod note_repository;

pub use document_repository::{DocumentRepository, ResolvedDocument};
pub use note_repository::NoteRepository;
