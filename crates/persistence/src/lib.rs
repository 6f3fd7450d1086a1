//! Persistence collaborators: key/value stores, the snapshot repository, and
//! the JSON export.
//!
//! The domain signals outcomes through `DomainError`; everything here that
//! can fail for infrastructure reasons (IO, serialization) uses
//! [`PersistenceError`] instead.

pub mod error;
pub mod export;
pub mod file_store;
pub mod kv;
pub mod repository;

pub use error::{PersistenceError, PersistenceResult};
pub use export::{export_expenses_json, export_expenses_to_file};
pub use file_store::FileKeyValueStore;
pub use kv::{InMemoryKeyValueStore, KeyValueStore};
pub use repository::{EXPENSES_KEY, PEOPLE_KEY, SnapshotRepository};
