use serde::{Deserialize, Serialize};

/// The object key did not follow `{userId}/{fileName}` or
/// `{prefix}/{userId}/{fileName}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEventPath(pub String);

impl std::fmt::Display for MalformedEventPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed upload path: {:?}", self.0)
    }
}

impl std::error::Error for MalformedEventPath {}

/// An uploaded object key split into its owner and file name. The full key
/// stays the document's storage key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UploadPath {
    storage_key: String,
    user_id: String,
    file_name: String,
}

impl UploadPath {
    pub fn parse(key: &str) -> Result<Self, MalformedEventPath> {
        let segments: Vec<&str> = key.split('/').collect();

        let (user_id, file_name) = match segments.as_slice() {
            [user_id, file_name] => (*user_id, *file_name),
            [prefix, user_id, file_name] if !prefix.is_empty() => (*user_id, *file_name),
            _ => return Err(MalformedEventPath(key.to_string())),
        };

        if user_id.trim().is_empty() || file_name.trim().is_empty() {
            return Err(MalformedEventPath(key.to_string()));
        }

        Ok(Self {
            storage_key: key.to_string(),
            user_id: user_id.to_string(),
            file_name: file_name.to_string(),
        })
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl std::fmt::Display for UploadPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.storage_key)
    }
}
