use std::fs;

use bangdeng_core::Category;
use bangdeng_source::*;
use tempfile::TempDir;

const SAMPLE: &str = "\
name,address,lat,lng,type
Dhaka Medical College Hospital,\"Ramna, Dhaka 1000\",23.7261,90.3961,hospital
Lazz Pharma,Kalabagan,23.7465,90.3833,pharmacy
IEDCR,\"Mohakhali, Dhaka 1212\",23.7806,90.4193,blood_test
";

fn write_sample(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn read_rows_is_lazy_and_ordered() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "sample.csv", SAMPLE);

    let mut reader = read_rows(&path).unwrap();
    assert_eq!(reader.headers(), &FACILITY_HEADER.map(String::from));

    let first = reader.next().unwrap().unwrap();
    assert_eq!(first.index, 0);
    assert_eq!(first.get("address"), "Ramna, Dhaka 1000");

    let rest: Vec<_> = reader.map(Result::unwrap).collect();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[1].get("name"), "IEDCR");
    assert_eq!(rest[1].index, 2);
}

#[test]
fn missing_file_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = read_rows(&dir.path().join("nope.csv")).err().unwrap();
    assert!(matches!(err, SourceError::NotFound(_)));
}

#[test]
fn malformed_rows_pass_through() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(
        &dir,
        "bad.csv",
        "name,address,lat,lng,type\nShort Row,Dhaka\nNo Coords,Sylhet,abc,,aid\n",
    );

    let rows: Vec<_> = read_rows(&path).unwrap().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("lat"), "");
    assert_eq!(rows[1].get("lat"), "abc");
}

#[test]
fn bom_is_stripped_from_header() {
    let dir = TempDir::new().unwrap();
    let path = write_sample(&dir, "bom.csv", &format!("\u{feff}{SAMPLE}"));
    let row = read_rows(&path).unwrap().next().unwrap().unwrap();
    assert_eq!(row.get("name"), "Dhaka Medical College Hospital");
}

#[test]
fn normalize_then_write_preserves_fields() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(&dir, "in.csv", SAMPLE);
    let output = dir.path().join("out.csv");

    let records: Vec<_> = read_rows(&input)
        .unwrap()
        .map(|r| normalize_row(&r.unwrap(), UnknownCategoryPolicy::Hospital).unwrap().unwrap())
        .collect();
    assert_eq!(records[2].category, Category::BloodTest);

    write_records(&output, &records).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), SAMPLE);
}

#[test]
fn round_trip_keeps_coordinate_text_and_type_spelling() {
    let dir = TempDir::new().unwrap();
    let sample = "\
name,address,lat,lng,type
A Clinic,Dhaka,24,90,hospital
B,Sylhet,23.810,90.4100,aid
Lazz Pharma,Kalabagan,-0.50,1e1,Pharmacy
";
    let input = write_sample(&dir, "in.csv", sample);
    let output = dir.path().join("out.csv");

    let records: Vec<_> = read_rows(&input)
        .unwrap()
        .map(|r| normalize_row(&r.unwrap(), UnknownCategoryPolicy::Hospital).unwrap().unwrap())
        .collect();
    assert_eq!(records[1].lat, 23.81);
    assert_eq!(records[2].category, Category::Pharmacy);

    write_records(&output, &records).unwrap();
    assert_eq!(fs::read_to_string(&output).unwrap(), sample);
}

#[test]
fn fallback_types_are_written_as_labels() {
    let row = RawRow::from_fields(4, "X", "Y", "23.8", "90.4", "clinicX");
    let record = normalize_row(&row, UnknownCategoryPolicy::Cyclic).unwrap().unwrap();
    let mut buf = Vec::new();
    write_records_to(&mut buf, &[record]).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "name,address,lat,lng,type\nX,Y,23.8,90.4,aid\n"
    );
}

#[test]
fn write_rows_keeps_extra_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_sample(
        &dir,
        "in.csv",
        "name,address,lat,lng,type,country\nA,B,1.5,2.5,clinic,BD\n",
    );
    let mut rows: Vec<_> = read_rows(&input).unwrap().map(Result::unwrap).collect();
    rows[0].set("type", "hospital");

    let output = dir.path().join("out.csv");
    write_rows(&output, &rows).unwrap();
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "name,address,lat,lng,type,country\nA,B,1.5,2.5,hospital,BD\n"
    );
}

#[test]
fn empty_record_list_writes_header_only() {
    let mut buf = Vec::new();
    write_records_to(&mut buf, &[]).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), "name,address,lat,lng,type\n");
}
