//! Document store backends for facility records.
//!
//! [`DocumentStore`] is the seam: a Firestore backend over its REST API and
//! a local SQLite backend with the same schema-less document semantics.

pub mod document;
pub mod error;
pub mod firestore;
pub mod sqlite;
pub mod store;

pub use document::{Document, Fields, MAX_BATCH_WRITES, Write, WriteBatch, generate_id, record_fields};
pub use error::StoreError;
pub use firestore::{FirestoreConfig, FirestoreStore};
pub use sqlite::SqliteStore;
pub use store::DocumentStore;
