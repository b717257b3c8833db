//! Schema-less documents and atomic write batches.

use serde_json::{Map, Value};

use bangdeng_core::FacilityRecord;

use crate::error::StoreError;

/// Most writes a single atomic commit may carry.
pub const MAX_BATCH_WRITES: usize = 500;

/// Field map of a stored document.
pub type Fields = Map<String, Value>;

/// A stored document: its store-assigned id plus whatever fields it holds.
/// Nothing guarantees the fields match the facility shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn from_record(id: impl Into<String>, record: &FacilityRecord) -> Self {
        Self::new(id, record_fields(record))
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// A string field, or `""` when absent or not a string.
    pub fn str_field(&self, field: &str) -> &str {
        self.fields.get(field).and_then(Value::as_str).unwrap_or("")
    }
}

/// Field map for a facility record. Coordinates are stored as numbers.
pub fn record_fields(record: &FacilityRecord) -> Fields {
    let mut fields = Fields::new();
    fields.insert("name".into(), Value::from(record.name.as_str()));
    fields.insert("address".into(), Value::from(record.address.as_str()));
    fields.insert("lat".into(), Value::from(record.lat));
    fields.insert("lng".into(), Value::from(record.lng));
    fields.insert("type".into(), Value::from(record.category.label()));
    fields
}

/// One pending write.
#[derive(Debug, Clone, PartialEq)]
pub enum Write {
    /// Create or fully replace a document
    Set {
        collection: String,
        id: String,
        fields: Fields,
    },
    Delete {
        collection: String,
        id: String,
    },
}

/// Up to [`MAX_BATCH_WRITES`] writes committed all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    writes: Vec<Write>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, write: Write) -> Result<(), StoreError> {
        if self.is_full() {
            return Err(StoreError::BatchFull);
        }
        self.writes.push(write);
        Ok(())
    }

    pub fn set(&mut self, collection: &str, id: impl Into<String>, fields: Fields) -> Result<(), StoreError> {
        self.push(Write::Set {
            collection: collection.to_string(),
            id: id.into(),
            fields,
        })
    }

    pub fn delete(&mut self, collection: &str, id: impl Into<String>) -> Result<(), StoreError> {
        self.push(Write::Delete {
            collection: collection.to_string(),
            id: id.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.writes.len() >= MAX_BATCH_WRITES
    }

    pub fn writes(&self) -> &[Write] {
        &self.writes
    }
}

/// A fresh 20-character document id, in the style of Firestore auto-ids.
pub fn generate_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(20);
    id
}
