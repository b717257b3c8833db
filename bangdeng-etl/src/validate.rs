//! Re-read a stored collection and report what is wrong with it.

use std::collections::BTreeMap;

use bangdeng_core::{Category, REQUIRED_FIELDS, is_valid_latitude, is_valid_longitude};
use bangdeng_store::{Document, DocumentStore};
use serde_json::Value;

use crate::error::EtlError;

/// Label tallied for documents without a `type` field.
pub const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub struct MissingFields {
    pub id: String,
    pub fields: Vec<&'static str>,
}

/// A document with at least one unparsable or out-of-range coordinate.
/// Values are carried as they were stored; `None` means the field is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCoordinates {
    pub id: String,
    pub lat: Option<Value>,
    pub lng: Option<Value>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ValidationReport {
    pub total: usize,
    pub missing_fields: Vec<MissingFields>,
    pub invalid_coordinates: Vec<InvalidCoordinates>,
    /// Distinct `type` labels outside the category set, sorted
    pub unknown_categories: Vec<String>,
    pub category_distribution: BTreeMap<String, usize>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.missing_fields.is_empty()
            && self.invalid_coordinates.is_empty()
            && self.unknown_categories.is_empty()
    }
}

/// A coordinate as stored: a number, or a string holding one.
fn coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn type_label(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Validate documents. Each present coordinate is checked on its own: a
/// missing `lat`/`lng` is reported only as a missing field, a present but
/// unparsable or out-of-range one makes the document invalid.
pub fn validate_documents(docs: &[Document]) -> ValidationReport {
    let mut report = ValidationReport {
        total: docs.len(),
        ..Default::default()
    };

    for doc in docs {
        let missing: Vec<&'static str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|f| !doc.fields.contains_key(*f))
            .collect();
        if !missing.is_empty() {
            report.missing_fields.push(MissingFields {
                id: doc.id.clone(),
                fields: missing,
            });
        }

        let (lat, lng) = (doc.get("lat"), doc.get("lng"));
        let lat_ok = lat.is_none_or(|v| coordinate(v).is_some_and(is_valid_latitude));
        let lng_ok = lng.is_none_or(|v| coordinate(v).is_some_and(is_valid_longitude));
        if !(lat_ok && lng_ok) {
            report.invalid_coordinates.push(InvalidCoordinates {
                id: doc.id.clone(),
                lat: lat.cloned(),
                lng: lng.cloned(),
            });
        }

        let label = doc
            .get("type")
            .map(type_label)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string());
        if doc.get("type").is_some()
            && Category::from_label(&label).is_none()
            && !report.unknown_categories.contains(&label)
        {
            report.unknown_categories.push(label.clone());
        }
        *report.category_distribution.entry(label).or_default() += 1;
    }

    report.unknown_categories.sort();
    report
}

/// List `collection` and validate every document in it.
pub fn validate_collection(
    store: &dyn DocumentStore,
    collection: &str,
) -> Result<ValidationReport, EtlError> {
    let docs = store.list(collection)?;
    log::debug!("Validating {} documents in {collection}", docs.len());
    Ok(validate_documents(&docs))
}

#[cfg(test)]
#[path = "tests/validate_tests.rs"]
mod tests;
