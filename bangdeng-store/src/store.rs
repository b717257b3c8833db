use crate::document::{Document, Fields, WriteBatch, generate_id};
use crate::error::StoreError;

/// A schema-less document collection store.
///
/// Backends are constructed once per run and passed by reference to
/// whatever needs them.
pub trait DocumentStore {
    /// Short backend name for log output ("firestore", "sqlite").
    fn backend_name(&self) -> &'static str;

    /// Every document in `collection`, in the store's natural order.
    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Create a document with a store-generated id and return that id.
    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError>;

    /// Apply every write in `batch`, or none of them.
    fn commit(&self, batch: &WriteBatch) -> Result<(), StoreError>;

    /// A fresh id for a document that will be created through [`commit`](Self::commit).
    fn new_id(&self) -> String {
        generate_id()
    }

    /// Delete a single document. Deleting a missing document is not an error.
    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut batch = WriteBatch::new();
        batch.delete(collection, id)?;
        self.commit(&batch)
    }
}

impl<S: DocumentStore + ?Sized> DocumentStore for Box<S> {
    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }

    fn list(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        (**self).list(collection)
    }

    fn add(&self, collection: &str, fields: Fields) -> Result<String, StoreError> {
        (**self).add(collection, fields)
    }

    fn commit(&self, batch: &WriteBatch) -> Result<(), StoreError> {
        (**self).commit(batch)
    }

    fn new_id(&self) -> String {
        (**self).new_id()
    }

    fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        (**self).delete(collection, id)
    }
}
