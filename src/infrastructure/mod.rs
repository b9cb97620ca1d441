//! External concerns: database, in-memory storage, local file store.

pub mod database;
pub mod files;
pub mod storage;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
pub use files::{InMemoryFileStore, LocalFileStore};
pub use storage::InMemoryRepositoryProvider;
