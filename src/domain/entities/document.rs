use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered upload. Identity is the storage key; at most one document
/// exists per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: Uuid,
    user_id: String,
    file_name: String,
    storage_key: String,
    created_at: DateTime<Utc>,
}

impl Document {
    pub fn new(user_id: String, file_name: String, storage_key: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            file_name,
            storage_key,
            created_at: Utc::now(),
        }
    }

    /// Rebuilds a document from a persisted row.
    pub fn restore(
        id: Uuid,
        user_id: String,
        file_name: String,
        storage_key: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            file_name,
            storage_key,
            created_at,
        }
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
