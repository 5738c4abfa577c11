pub mod cloud_object_storage;

pub use cloud_object_storage::CloudObjectStorage;
