pub mod gemini_embedding_client;
pub mod pdf_extractor;

pub use gemini_embedding_client::{GeminiClientConfig, GeminiEmbeddingClient};
pub use pdf_extractor::PdfExtractor;
