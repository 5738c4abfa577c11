pub mod document_extractor;
pub mod embedding_provider;
pub mod object_storage;

pub use document_extractor::DocumentExtractor;
pub use embedding_provider::EmbeddingProvider;
pub use object_storage::ObjectStorage;
