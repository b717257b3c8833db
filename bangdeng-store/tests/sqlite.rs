use bangdeng_core::{Category, FacilityRecord};
use bangdeng_store::sqlite::CURRENT_VERSION;
use bangdeng_store::{DocumentStore, Fields, SqliteStore, StoreError, WriteBatch, record_fields};
use serde_json::json;

fn record(name: &str) -> FacilityRecord {
    FacilityRecord::new(name, "Dhaka", 23.81, 90.41, Category::Hospital)
}

#[test]
fn add_then_list_in_insertion_order() {
    let store = SqliteStore::open_memory().unwrap();
    let a = store.add("locations", record_fields(&record("A"))).unwrap();
    let b = store.add("locations", record_fields(&record("B"))).unwrap();
    store.add("other", record_fields(&record("C"))).unwrap();

    let docs = store.list("locations").unwrap();
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].id, a);
    assert_eq!(docs[0].str_field("name"), "A");
    assert_eq!(docs[1].id, b);
    assert_eq!(store.count("other").unwrap(), 1);
}

#[test]
fn commit_applies_sets_and_deletes() {
    let store = SqliteStore::open_memory().unwrap();
    let keep = store.add("locations", record_fields(&record("Keep"))).unwrap();
    let gone = store.add("locations", record_fields(&record("Gone"))).unwrap();

    let mut batch = WriteBatch::new();
    batch.delete("locations", &gone).unwrap();
    batch
        .set("locations", "fixed-id", record_fields(&record("New")))
        .unwrap();
    store.commit(&batch).unwrap();

    let names: Vec<String> = store
        .list("locations")
        .unwrap()
        .iter()
        .map(|d| d.str_field("name").to_string())
        .collect();
    assert_eq!(names, ["Keep", "New"]);
    assert!(store.get("locations", &keep).unwrap().is_some());
    assert!(store.get("locations", &gone).unwrap().is_none());
}

#[test]
fn set_replaces_whole_document() {
    let store = SqliteStore::open_memory().unwrap();
    let mut batch = WriteBatch::new();
    batch.set("locations", "x", record_fields(&record("First"))).unwrap();
    store.commit(&batch).unwrap();

    let mut fields = Fields::new();
    fields.insert("name".into(), json!("Second"));
    let mut batch = WriteBatch::new();
    batch.set("locations", "x", fields).unwrap();
    store.commit(&batch).unwrap();

    let doc = store.get("locations", "x").unwrap().unwrap();
    assert_eq!(doc.str_field("name"), "Second");
    assert!(doc.get("lat").is_none());
}

#[test]
fn delete_missing_is_ok() {
    let store = SqliteStore::open_memory().unwrap();
    store.delete("locations", "nope").unwrap();
}

#[test]
fn reopen_file_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("locations.db");
    {
        let store = SqliteStore::open(&path).unwrap();
        store.add("locations", record_fields(&record("A"))).unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.count("locations").unwrap(), 1);
}

#[test]
fn newer_schema_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("locations.db");
    drop(SqliteStore::open(&path).unwrap());

    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [CURRENT_VERSION + 1],
    )
    .unwrap();
    drop(conn);

    assert!(matches!(
        SqliteStore::open(&path),
        Err(StoreError::VersionMismatch { .. })
    ));
}
