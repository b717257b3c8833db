use super::*;

fn element(tags: &[(&str, &str)]) -> OverpassElement {
    OverpassElement {
        kind: "node".into(),
        id: 7,
        lat: Some(23.780_612_345),
        lon: Some(90.419_3),
        center: None,
        tags: tags.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
    }
}

fn classify(tags: &[(&str, &str)]) -> Option<Category> {
    let el = element(tags);
    classify_tags(|k| el.tag(k))
}

#[test]
fn test_unknown_type_defaults_to_hospital() {
    let row = RawRow::from_fields(0, "A Clinic", "", "23.81", "90.41", "clinicX");
    let record = normalize_row(&row, UnknownCategoryPolicy::Hospital).unwrap().unwrap();
    assert_eq!(record.name, "A Clinic");
    assert_eq!(record.address, PLACEHOLDER_ADDRESS);
    assert_eq!(record.lat, 23.81);
    assert_eq!(record.lng, 90.41);
    assert_eq!(record.category, Category::Hospital);
}

#[test]
fn test_unknown_type_cyclic_uses_row_index() {
    let row = RawRow::from_fields(2, "A Clinic", "Dhaka", "23.81", "90.41", "clinicX");
    let record = normalize_row(&row, UnknownCategoryPolicy::Cyclic).unwrap().unwrap();
    assert_eq!(record.category, Category::Vaccine);

    let row = RawRow::from_fields(5, "A Clinic", "Dhaka", "23.81", "90.41", "clinicX");
    let record = normalize_row(&row, UnknownCategoryPolicy::Cyclic).unwrap().unwrap();
    assert_eq!(record.category, Category::Hospital);
}

#[test]
fn test_unknown_type_rejected() {
    let row = RawRow::from_fields(0, "A Clinic", "Dhaka", "23.81", "90.41", "clinicX");
    assert_eq!(normalize_row(&row, UnknownCategoryPolicy::Reject).unwrap(), None);
}

#[test]
fn test_known_type_ignores_policy() {
    let row = RawRow::from_fields(3, "Lab", "Dhaka", "23.8", "90.4", " Blood_Test ");
    let record = normalize_row(&row, UnknownCategoryPolicy::Reject).unwrap().unwrap();
    assert_eq!(record.category, Category::BloodTest);
}

#[test]
fn test_bad_coordinates_are_errors() {
    let row = RawRow::from_fields(4, "X", "Y", "north", "90.4", "aid");
    let err = normalize_row(&row, UnknownCategoryPolicy::Hospital).unwrap_err();
    assert!(matches!(err, NormalizeError::BadCoordinate { field: "lat", .. }));
    assert_eq!(err.location(), "row 5");

    let row = RawRow::from_fields(0, "X", "Y", "23.8", "  ", "aid");
    let err = normalize_row(&row, UnknownCategoryPolicy::Hospital).unwrap_err();
    assert!(matches!(err, NormalizeError::MissingCoordinate { field: "lng", .. }));

    let row = RawRow::from_fields(0, "X", "Y", "123.0", "90.4", "aid");
    let err = normalize_row(&row, UnknownCategoryPolicy::Hospital).unwrap_err();
    assert!(matches!(err, NormalizeError::OutOfRange { .. }));

    let row = RawRow::from_fields(0, "X", "Y", "NaN", "90.4", "aid");
    assert!(normalize_row(&row, UnknownCategoryPolicy::Hospital).is_err());
}

#[test]
fn test_normalize_is_deterministic() {
    let row = RawRow::from_fields(9, "", "Mohakhali", " 23.7806 ", "90.4193", "mystery");
    let a = normalize_row(&row, UnknownCategoryPolicy::Cyclic).unwrap();
    let b = normalize_row(&row, UnknownCategoryPolicy::Cyclic).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.unwrap().name, PLACEHOLDER_NAME);
}

#[test]
fn test_pharmacy_tag_wins_over_keywords() {
    let got = classify(&[("amenity", "pharmacy"), ("name", "Free Vaccination Pharmacy")]);
    assert_eq!(got, Some(Category::Pharmacy));
    assert_eq!(classify(&[("shop", "chemist")]), Some(Category::Pharmacy));
}

#[test]
fn test_keyword_priority_order() {
    assert_eq!(
        classify(&[("name", "Dengue Immunization Clinic")]),
        Some(Category::Vaccine)
    );
    assert_eq!(
        classify(&[("name", "Popular Diagnostic Centre")]),
        Some(Category::BloodTest)
    );
    assert_eq!(
        classify(&[("name", "Free Blood Test Camp")]),
        Some(Category::BloodTest)
    );
    assert_eq!(
        classify(&[("description", "Charity hospital")]),
        Some(Category::Aid)
    );
    assert_eq!(
        classify(&[("name", "Fever Clinic"), ("healthcare", "clinic")]),
        Some(Category::DengueCenter)
    );
    assert_eq!(classify(&[("healthcare", "laboratory")]), Some(Category::BloodTest));
}

#[test]
fn test_short_keywords_need_word_boundaries() {
    assert_eq!(classify(&[("name", "Rangoon General Hospital")]), None);
    assert_eq!(classify(&[("name", "BRAC NGO Health Centre")]), Some(Category::Aid));
    assert_eq!(classify(&[("name", "NGO-run clinic")]), Some(Category::Aid));
    assert_eq!(classify(&[("description", "clinic run by an ngo,")]), Some(Category::Aid));
    assert_eq!(classify(&[("name", "Mongla Port Hospital")]), None);
}

#[test]
fn test_no_keyword_is_none() {
    assert_eq!(classify(&[("amenity", "hospital"), ("name", "Sadar Hospital")]), None);
}

#[test]
fn test_element_name_and_address_resolution() {
    let el = element(&[
        ("amenity", "hospital"),
        ("name:en", "Dhaka Medical College Hospital"),
        ("name:bn", "ঢাকা মেডিকেল কলেজ হাসপাতাল"),
        ("addr:housenumber", "12"),
        ("addr:street", "Secretariat Road"),
        ("addr:city", "Dhaka"),
    ]);
    let record = normalize_element(&el, 0, UnknownCategoryPolicy::Hospital).unwrap().unwrap();
    assert_eq!(record.name, "Dhaka Medical College Hospital");
    assert_eq!(record.address, "12 Secretariat Road, Dhaka");
    assert_eq!(record.lat, 23.780_612);
    assert_eq!(record.category, Category::Hospital);
}

#[test]
fn test_element_placeholders() {
    let el = element(&[("amenity", "clinic")]);
    let record = normalize_element(&el, 0, UnknownCategoryPolicy::Hospital).unwrap().unwrap();
    assert_eq!(record.name, PLACEHOLDER_NAME);
    assert_eq!(record.address, PLACEHOLDER_ADDRESS);
}

#[test]
fn test_element_keyword_gated_rejects_plain_hospital() {
    let el = element(&[("amenity", "hospital"), ("name", "Sadar Hospital")]);
    assert_eq!(normalize_element(&el, 0, UnknownCategoryPolicy::Reject).unwrap(), None);
}

#[test]
fn test_element_without_position_is_error() {
    let mut el = element(&[("amenity", "hospital")]);
    el.lat = None;
    el.kind = "way".into();
    let err = normalize_element(&el, 0, UnknownCategoryPolicy::Hospital).unwrap_err();
    assert_eq!(err.location(), "way/7");
}

#[test]
fn test_policy_from_str() {
    assert_eq!("Cyclic".parse::<UnknownCategoryPolicy>().unwrap(), UnknownCategoryPolicy::Cyclic);
    assert_eq!("drop".parse::<UnknownCategoryPolicy>().unwrap(), UnknownCategoryPolicy::Reject);
    assert!("random".parse::<UnknownCategoryPolicy>().is_err());
}
