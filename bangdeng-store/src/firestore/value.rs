//! Conversion between plain JSON and Firestore's typed value encoding.

use serde_json::{Map, Value, json};

use crate::document::Fields;

/// Encode one JSON value as a Firestore `Value`.
pub fn to_firestore(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // int64 travels as a decimal string
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64().unwrap_or(0.0) }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(to_firestore).collect::<Vec<_>>() }
        }),
        Value::Object(map) => json!({ "mapValue": { "fields": encode_fields(map) } }),
    }
}

/// Decode a Firestore `Value` into plain JSON. Unrecognized encodings
/// decode to `null`.
pub fn from_firestore(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return Value::Null;
    };

    if let Some(s) = obj.get("stringValue") {
        return s.clone();
    }
    if let Some(d) = obj.get("doubleValue") {
        // NaN/Infinity arrive as strings
        return match d {
            Value::String(s) => s.parse::<f64>().map(Value::from).unwrap_or(Value::Null),
            other => other.clone(),
        };
    }
    if let Some(i) = obj.get("integerValue") {
        return match i {
            Value::String(s) => s.parse::<i64>().map(Value::from).unwrap_or(Value::Null),
            other => other.clone(),
        };
    }
    if let Some(b) = obj.get("booleanValue") {
        return b.clone();
    }
    if obj.contains_key("nullValue") {
        return Value::Null;
    }
    if let Some(t) = obj.get("timestampValue") {
        return t.clone();
    }
    if let Some(r) = obj.get("referenceValue") {
        return r.clone();
    }
    if let Some(geo) = obj.get("geoPointValue") {
        return json!({
            "latitude": geo.get("latitude").cloned().unwrap_or(Value::from(0.0)),
            "longitude": geo.get("longitude").cloned().unwrap_or(Value::from(0.0)),
        });
    }
    if let Some(arr) = obj.get("arrayValue") {
        let values = arr
            .get("values")
            .and_then(Value::as_array)
            .map(|v| v.iter().map(from_firestore).collect())
            .unwrap_or_default();
        return Value::Array(values);
    }
    if let Some(map) = obj.get("mapValue") {
        let fields = map
            .get("fields")
            .and_then(Value::as_object)
            .map(decode_fields)
            .unwrap_or_default();
        return Value::Object(fields);
    }
    Value::Null
}

pub fn encode_fields(fields: &Fields) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), to_firestore(v)))
        .collect()
}

pub fn decode_fields(fields: &Map<String, Value>) -> Fields {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), from_firestore(v)))
        .collect()
}
