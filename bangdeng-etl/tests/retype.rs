use bangdeng_etl::{backup_path, retype_csv};
use bangdeng_source::read_rows;
use std::path::Path;

const INPUT: &str = "\
name,address,lat,lng,type
A,Dhaka,23.81,90.41,clinicX
B,Dhaka,23.82,90.42,pharmacy
C,Dhaka,23.83,90.43,
D,Dhaka,23.84,90.44,dengue_center
E,Dhaka,23.85,90.45,Hospital
F,Dhaka,23.86,90.46,aid
";

#[test]
fn backup_name_uses_stem() {
    assert_eq!(
        backup_path(Path::new("/data/sample_data.csv")),
        Path::new("/data/sample_data_backup.csv")
    );
}

#[test]
fn retype_assigns_cyclic_types_and_keeps_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample_data.csv");
    std::fs::write(&path, INPUT).unwrap();

    let changed = retype_csv(&path).unwrap();
    assert_eq!(changed, 4);

    let backup = std::fs::read_to_string(dir.path().join("sample_data_backup.csv")).unwrap();
    assert_eq!(backup, INPUT);

    let types: Vec<String> = read_rows(&path)
        .unwrap()
        .map(|r| r.unwrap().get("type").to_string())
        .collect();
    // Row index modulo five over hospital, pharmacy, vaccine, blood_test, aid
    assert_eq!(
        types,
        ["hospital", "pharmacy", "vaccine", "blood_test", "aid", "aid"]
    );
}

#[test]
fn retype_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(retype_csv(&dir.path().join("nope.csv")).is_err());
}
