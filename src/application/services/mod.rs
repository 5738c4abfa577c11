pub mod chunking;
pub mod ingestion_pipeline;

pub use chunking::{FixedWindowChunker, TextSplitter};
pub use ingestion_pipeline::{IngestionPipeline, IngestionSettings};
