pub mod document_model;
pub mod note_model;

pub use document_model::{DocumentModel, NewDocumentModel};
pub use note_model::NewNoteModel;
