use super::*;

#[test]
fn registry_has_27_countries() {
    assert_eq!(Country::all().len(), 27);
}

#[test]
fn lookup_by_key_code_and_name() {
    assert_eq!(Country::lookup("bangladesh").unwrap().code, "BD");
    assert_eq!(Country::lookup("bd").unwrap().key, "bangladesh");
    assert_eq!(Country::lookup("Sri Lanka").unwrap().code, "LK");
    assert_eq!(Country::lookup("papua-new-guinea").unwrap().code, "PG");
}

#[test]
fn lookup_unknown_is_err() {
    let err = Country::lookup("atlantis").unwrap_err();
    assert!(err.to_string().contains("atlantis"));
}

#[test]
fn keys_and_codes_are_unique() {
    let all = Country::all();
    for (i, a) in all.iter().enumerate() {
        for b in &all[i + 1..] {
            assert_ne!(a.key, b.key);
            assert_ne!(a.code, b.code);
        }
    }
}

#[test]
fn overpass_order_is_south_west_north_east() {
    let bd = Country::lookup("BD").unwrap();
    assert_eq!(bd.bbox.to_overpass(), "20,88,26.6,92.1");
}

#[test]
fn fiji_crosses_antimeridian() {
    assert!(Country::lookup("fiji").unwrap().bbox.crosses_antimeridian());
    assert!(!Country::lookup("kenya").unwrap().bbox.crosses_antimeridian());
}
