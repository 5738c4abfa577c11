pub mod config;
pub mod container;
pub mod database;
pub mod external_services;
pub mod object_storage;

pub use config::{AppConfig, ConfigError, StorageProvider};
pub use database::{DbPool, create_connection_pool};
