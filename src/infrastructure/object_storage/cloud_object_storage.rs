use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::azure::MicrosoftAzureBuilder;
use object_store::{ObjectStore, path::Path as ObjPath};
use std::sync::Arc;

use crate::application::ports::object_storage::{ObjectStorage, ObjectStorageError};
use crate::infrastructure::config::StorageProvider;

pub type DynStore = Arc<dyn ObjectStore>;

enum Backend {
    /// A client is built per fetch for whichever bucket the event names.
    Provider(StorageProvider),
    /// One store regardless of bucket.
    Fixed(DynStore),
}

pub struct CloudObjectStorage {
    backend: Backend,
}

impl CloudObjectStorage {
    /// Credentials and region come from the standard `AWS_*` or `AZURE_*`
    /// environment variables.
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            backend: Backend::Provider(provider),
        }
    }

    pub fn with_store(store: DynStore) -> Self {
        Self {
            backend: Backend::Fixed(store),
        }
    }

    fn store_for(&self, bucket: &str) -> Result<DynStore, ObjectStorageError> {
        let store: DynStore = match &self.backend {
            Backend::Fixed(store) => return Ok(store.clone()),
            Backend::Provider(StorageProvider::S3) => Arc::new(
                AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .build()
                    .map_err(|e| ObjectStorageError::ConfigurationError(e.to_string()))?,
            ),
            Backend::Provider(StorageProvider::Azure) => Arc::new(
                MicrosoftAzureBuilder::from_env()
                    .with_container_name(bucket)
                    .build()
                    .map_err(|e| ObjectStorageError::ConfigurationError(e.to_string()))?,
            ),
        };
        Ok(store)
    }
}

/// Keys are taken verbatim. `Path::from` would percent-encode characters
/// such as `[` or `%` and request an object nobody uploaded.
fn object_path(key: &str) -> Result<ObjPath, ObjectStorageError> {
    ObjPath::parse(key).map_err(|e| ObjectStorageError::InvalidKey(format!("{}: {}", key, e)))
}

fn map_store_error(error: object_store::Error) -> ObjectStorageError {
    match error {
        object_store::Error::NotFound { path, .. } => ObjectStorageError::ObjectNotFound(path),
        e @ (object_store::Error::PermissionDenied { .. }
        | object_store::Error::Unauthenticated { .. }) => {
            ObjectStorageError::PermissionDenied(e.to_string())
        }
        other => ObjectStorageError::NetworkError(other.to_string()),
    }
}

#[async_trait]
impl ObjectStorage for CloudObjectStorage {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Bytes, ObjectStorageError> {
        let store = self.store_for(bucket)?;
        let path = object_path(key)?;

        let result = store.get(&path).await.map_err(map_store_error)?;
        result.bytes().await.map_err(map_store_error)
    }
}
