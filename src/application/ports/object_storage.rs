use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug)]
pub enum ObjectStorageError {
    ObjectNotFound(String),
    InvalidKey(String),
    PermissionDenied(String),
    ConfigurationError(String),
    NetworkError(String),
}

impl std::fmt::Display for ObjectStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectStorageError::ObjectNotFound(path) => write!(f, "Object not found: {}", path),
            ObjectStorageError::InvalidKey(msg) => write!(f, "Invalid object key: {}", msg),
            ObjectStorageError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            ObjectStorageError::ConfigurationError(msg) => {
                write!(f, "Storage configuration error: {}", msg)
            }
            ObjectStorageError::NetworkError(msg) => write!(f, "Storage network error: {}", msg),
        }
    }
}

impl std::error::Error for ObjectStorageError {}

/// Read access to the bucket (S3) or container (Azure Blob) an upload landed in.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, ObjectStorageError>;
}
