use serde::{Deserialize, Serialize};

/// A "new object created" notification reduced to where the object lives.
/// `key` is already URL-decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadEvent {
    pub bucket: String,
    pub key: String,
}

impl UploadEvent {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }
}
