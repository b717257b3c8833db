use std::collections::HashMap;

use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |var| map.get(var).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn file(text: &str) -> ConfigFile {
    toml::from_str(text).unwrap()
}

#[test]
fn test_defaults() {
    let s = Settings::resolve(StoreFlags::default(), None, &no_env).unwrap();
    assert_eq!(s.backend.value, Backend::Sqlite);
    assert_eq!(s.backend.source, ValueSource::Default);
    assert_eq!(s.collection.value, "locations");
    assert_eq!(s.database.value, "(default)");
    assert_eq!(s.project_id.value, None);
    assert_eq!(s.project_id.source, ValueSource::Missing);
    assert!(s.sqlite_path.value.ends_with("locations.db"));
    assert_eq!(s.overpass_timeout.value, Duration::from_secs(120));
}

#[test]
fn test_flag_beats_env_beats_file() {
    let cfg = file(
        r#"
        [store]
        backend = "firestore"
        collection = "from_file"
        sqlite_path = "/tmp/file.db"
        "#,
    );
    let env = env_from(&[(ENV_COLLECTION, "from_env")]);
    let flags = StoreFlags {
        db: Some(PathBuf::from("/tmp/flag.db")),
        ..Default::default()
    };

    let s = Settings::resolve(flags, Some(cfg), &env).unwrap();
    assert_eq!(s.sqlite_path.value, PathBuf::from("/tmp/flag.db"));
    assert_eq!(s.sqlite_path.source, ValueSource::Flag);
    assert_eq!(s.collection.value, "from_env");
    assert_eq!(s.collection.source, ValueSource::EnvVar(ENV_COLLECTION));
    assert_eq!(s.backend.value, Backend::Firestore);
    assert_eq!(s.backend.source, ValueSource::ConfigFile);
}

#[test]
fn test_blank_env_is_ignored() {
    let env = env_from(&[(ENV_COLLECTION, "  ")]);
    let s = Settings::resolve(StoreFlags::default(), None, &env).unwrap();
    assert_eq!(s.collection.source, ValueSource::Default);
}

#[test]
fn test_bad_backend_env_is_error() {
    let env = env_from(&[(ENV_STORE, "mongo")]);
    assert!(matches!(
        Settings::resolve(StoreFlags::default(), None, &env),
        Err(CliError::Config(_))
    ));
}

#[test]
fn test_firestore_config_needs_project() {
    let s = Settings::resolve(StoreFlags::default(), None, &no_env).unwrap();
    assert!(s.firestore_config().is_err());

    let cfg = file(
        r#"
        [firestore]
        project_id = "dengue-map"
        emulator_host = "localhost:8080"

        [overpass]
        timeout_secs = 30
        "#,
    );
    let env = env_from(&[(ENV_ACCESS_TOKEN, "ya29.token")]);
    let s = Settings::resolve(StoreFlags::default(), Some(cfg), &env).unwrap();
    let fc = s.firestore_config().unwrap();
    assert_eq!(fc.project_id, "dengue-map");
    assert_eq!(fc.access_token.as_deref(), Some("ya29.token"));
    assert_eq!(fc.emulator_host.as_deref(), Some("localhost:8080"));
    assert_eq!(s.overpass_timeout.value, Duration::from_secs(30));
}

#[test]
fn test_unknown_section_is_rejected() {
    assert!(toml::from_str::<ConfigFile>("[screenscraper]\ndev_id = \"x\"\n").is_err());
}

#[test]
fn test_load_config_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    assert!(load_config_file(&path, false).unwrap().is_none());
    assert!(load_config_file(&path, true).is_err());

    std::fs::write(&path, "[store]\ncollection = \"test\"\n").unwrap();
    let cfg = load_config_file(&path, true).unwrap().unwrap();
    assert_eq!(cfg.store.unwrap().collection.as_deref(), Some("test"));
}

#[test]
fn test_open_sqlite_store() {
    let dir = tempfile::tempdir().unwrap();
    let flags = StoreFlags {
        db: Some(dir.path().join("locations.db")),
        ..Default::default()
    };
    let s = Settings::resolve(flags, None, &no_env).unwrap();
    let store = s.open_store().unwrap();
    assert_eq!(store.backend_name(), "sqlite");
    assert!(store.list("locations").unwrap().is_empty());
}
