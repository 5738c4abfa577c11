pub mod document;
pub mod study_note;

pub use document::Document;
pub use study_note::StudyNote;
