use super::*;

#[test]
fn test_production_and_emulator_roots() {
    let mut config = FirestoreConfig::new("dengue-map");
    assert_eq!(
        config.documents_root(),
        "https://firestore.googleapis.com/v1/projects/dengue-map/databases/(default)/documents"
    );

    config.emulator_host = Some("localhost:8080".into());
    assert_eq!(
        config.documents_root(),
        "http://localhost:8080/v1/projects/dengue-map/databases/(default)/documents"
    );
}

#[test]
fn test_new_requires_token_outside_emulator() {
    let config = FirestoreConfig::new("dengue-map");
    assert!(matches!(FirestoreStore::new(config), Err(StoreError::Config(_))));

    let mut config = FirestoreConfig::new("dengue-map");
    config.emulator_host = Some("localhost:8080".into());
    assert!(FirestoreStore::new(config).is_ok());

    assert!(FirestoreStore::new(FirestoreConfig::new(" ")).is_err());
}

#[test]
fn test_encode_scalar_values() {
    assert_eq!(to_firestore(&json!("Dhaka")), json!({"stringValue": "Dhaka"}));
    assert_eq!(to_firestore(&json!(23.81)), json!({"doubleValue": 23.81}));
    assert_eq!(to_firestore(&json!(42)), json!({"integerValue": "42"}));
    assert_eq!(to_firestore(&json!(true)), json!({"booleanValue": true}));
    assert_eq!(to_firestore(&Value::Null), json!({"nullValue": null}));
}

#[test]
fn test_decode_nested_values() {
    let encoded = json!({
        "mapValue": {"fields": {
            "tags": {"arrayValue": {"values": [
                {"stringValue": "a"},
                {"integerValue": "7"}
            ]}},
            "empty": {"arrayValue": {}},
            "where": {"geoPointValue": {"latitude": 23.8, "longitude": 90.4}}
        }}
    });
    assert_eq!(
        from_firestore(&encoded),
        json!({
            "tags": ["a", 7],
            "empty": [],
            "where": {"latitude": 23.8, "longitude": 90.4}
        })
    );
}

#[test]
fn test_decode_unknown_is_null() {
    assert_eq!(from_firestore(&json!({"bytesValue": "AA=="})), Value::Null);
    assert_eq!(from_firestore(&json!("bare")), Value::Null);
    assert_eq!(from_firestore(&json!({"integerValue": "x"})), Value::Null);
}

#[test]
fn test_record_fields_survive_encoding() {
    let mut fields = Fields::new();
    fields.insert("name".into(), json!("Lazz Pharma"));
    fields.insert("lat".into(), json!(23.7506));
    fields.insert("lng".into(), json!(90.3925));
    fields.insert("type".into(), json!("pharmacy"));
    assert_eq!(decode_fields(&encode_fields(&fields)), fields);
}

#[test]
fn test_commit_body_uses_full_names() {
    let mut batch = WriteBatch::new();
    let mut fields = Fields::new();
    fields.insert("name".into(), json!("X"));
    batch.set("locations", "abc", fields).unwrap();
    batch.delete("locations", "def").unwrap();

    let body = commit_body("p", "(default)", &batch);
    let writes = body["writes"].as_array().unwrap();
    assert_eq!(writes.len(), 2);
    assert_eq!(
        writes[0]["update"]["name"],
        "projects/p/databases/(default)/documents/locations/abc"
    );
    assert_eq!(writes[0]["update"]["fields"]["name"]["stringValue"], "X");
    assert_eq!(
        writes[1]["delete"],
        "projects/p/databases/(default)/documents/locations/def"
    );
}

#[test]
fn test_parse_list_page() {
    let body = r#"{
        "documents": [{
            "name": "projects/p/databases/(default)/documents/locations/k1",
            "fields": {"name": {"stringValue": "DMCH"}, "lat": {"doubleValue": 23.72}},
            "createTime": "2024-01-01T00:00:00Z"
        }],
        "nextPageToken": "tok"
    }"#;
    let (docs, token) = parse_list_page(body).unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "k1");
    assert_eq!(docs[0].str_field("name"), "DMCH");
    assert_eq!(token.as_deref(), Some("tok"));

    let (docs, token) = parse_list_page("{}").unwrap();
    assert!(docs.is_empty());
    assert_eq!(token, None);
}

#[test]
fn test_error_message_extraction() {
    let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
    assert_eq!(error_message(body), "Missing or insufficient permissions.");
    assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
}

#[test]
fn test_add_body_and_response() {
    let mut fields = Fields::new();
    fields.insert("name".into(), json!("Square Hospital"));
    fields.insert("lat".into(), json!(23.7529));
    let body = add_body(&fields);
    assert_eq!(body["fields"]["name"]["stringValue"], "Square Hospital");
    assert_eq!(body["fields"]["lat"]["doubleValue"], 23.7529);

    let created = r#"{
        "name": "projects/p/databases/(default)/documents/locations/Xk2pQ9",
        "fields": {"name": {"stringValue": "Square Hospital"}},
        "createTime": "2024-01-01T00:00:00Z",
        "updateTime": "2024-01-01T00:00:00Z"
    }"#;
    assert_eq!(parse_added(created).unwrap(), "Xk2pQ9");
    assert!(parse_added("{}").is_err());
}
