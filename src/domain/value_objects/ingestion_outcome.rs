use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MalformedEventPath { key: String },
    AlreadyIngested { document_id: Uuid },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AbortReason {
    DocumentUnreadable { document_id: Uuid, message: String },
    EmptyOrScannedDocument { document_id: Uuid, characters: usize },
    StoreFetchFailed { message: String },
    /// `document_id` is set once the upload was registered.
    DatabaseError {
        document_id: Option<Uuid>,
        chunks_stored: usize,
        message: String,
    },
    TimedOut {
        document_id: Option<Uuid>,
        seconds: u64,
    },
}

impl AbortReason {
    /// Whether re-delivering the same event could succeed. A registered
    /// document makes every later delivery skip, so failures after
    /// registration are final.
    pub fn is_retryable(&self) -> bool {
        match self {
            AbortReason::StoreFetchFailed { .. } => true,
            AbortReason::DatabaseError { document_id, .. }
            | AbortReason::TimedOut { document_id, .. } => document_id.is_none(),
            AbortReason::DocumentUnreadable { .. }
            | AbortReason::EmptyOrScannedDocument { .. } => false,
        }
    }
}

impl std::fmt::Display for AbortReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbortReason::DocumentUnreadable { message, .. } => {
                write!(f, "Document unreadable: {}", message)
            }
            AbortReason::EmptyOrScannedDocument { characters, .. } => write!(
                f,
                "PDF is empty or a scanned image ({} characters extracted)",
                characters
            ),
            AbortReason::StoreFetchFailed { message } => write!(f, "Store fetch failed: {}", message),
            AbortReason::DatabaseError { message, .. } => write!(f, "Database error: {}", message),
            AbortReason::TimedOut { seconds, .. } => {
                write!(f, "Ingestion timed out after {} seconds", seconds)
            }
        }
    }
}

/// A chunk whose embedding call failed. The run continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkFailure {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestionOutcome {
    Skipped(SkipReason),
    Aborted(AbortReason),
    Succeeded {
        document_id: Uuid,
        chunks_stored: usize,
    },
    PartiallySucceeded {
        document_id: Uuid,
        chunks_stored: usize,
        failed_chunks: usize,
    },
}

impl IngestionOutcome {
    /// Ran to completion or had nothing to do.
    pub fn is_success(&self) -> bool {
        !matches!(self, IngestionOutcome::Aborted(_))
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            IngestionOutcome::Aborted(reason) => reason.is_retryable(),
            _ => false,
        }
    }

    pub fn chunks_stored(&self) -> usize {
        match self {
            IngestionOutcome::Succeeded { chunks_stored, .. }
            | IngestionOutcome::PartiallySucceeded { chunks_stored, .. } => *chunks_stored,
            IngestionOutcome::Aborted(AbortReason::DatabaseError { chunks_stored, .. }) => {
                *chunks_stored
            }
            _ => 0,
        }
    }
}
