use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Name used when a source carries no usable name.
pub const PLACEHOLDER_NAME: &str = "Medical Facility";

/// Address used when a source carries no address parts.
pub const PLACEHOLDER_ADDRESS: &str = "Address not available";

/// Field names every stored facility document must carry.
pub const REQUIRED_FIELDS: [&str; 5] = ["name", "address", "lat", "lng", "type"];

/// One normalized health facility.
///
/// Field names match the stored document shape (`lat`, `lng`, `type`), so the
/// same struct reads and writes both CSV rows and store documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(rename = "type")]
    pub category: Category,
    /// Text the record was parsed from, when it came from a facility file.
    #[serde(skip)]
    pub source: Option<SourceText>,
}

/// Coordinate and type columns exactly as read from a facility file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceText {
    pub lat: String,
    pub lng: String,
    /// `None` when the type was not recognized and a fallback was applied.
    pub category: Option<String>,
}

impl FacilityRecord {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        lat: f64,
        lng: f64,
        category: Category,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            lat,
            lng,
            category,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceText) -> Self {
        self.source = Some(source);
        self
    }

    /// Column values in `name,address,lat,lng,type` order. Source text is
    /// written back unchanged; otherwise numbers use their shortest form and
    /// the type its label.
    pub fn csv_fields(&self) -> [String; 5] {
        let (lat, lng, kind) = match &self.source {
            Some(src) => (
                src.lat.clone(),
                src.lng.clone(),
                src.category
                    .clone()
                    .unwrap_or_else(|| self.category.label().to_string()),
            ),
            None => (
                self.lat.to_string(),
                self.lng.to_string(),
                self.category.label().to_string(),
            ),
        };
        [self.name.clone(), self.address.clone(), lat, lng, kind]
    }

    /// True when both coordinates are inside their valid ranges.
    pub fn has_valid_coordinates(&self) -> bool {
        is_valid_latitude(self.lat) && is_valid_longitude(self.lng)
    }
}

/// Latitude must lie in [-90, 90]. NaN is never valid.
pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

/// Longitude must lie in [-180, 180]. NaN is never valid.
pub fn is_valid_longitude(lng: f64) -> bool {
    (-180.0..=180.0).contains(&lng)
}

/// Round a coordinate to six decimal places (about 10 cm).
pub fn round_coordinate(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_bounds_are_inclusive() {
        assert!(is_valid_latitude(90.0));
        assert!(is_valid_latitude(-90.0));
        assert!(!is_valid_latitude(90.0001));
        assert!(is_valid_longitude(-180.0));
        assert!(!is_valid_longitude(180.5));
        assert!(!is_valid_latitude(f64::NAN));
    }

    #[test]
    fn record_serializes_with_storage_names() {
        let record = FacilityRecord::new("A Clinic", "Dhaka", 23.81, 90.41, Category::Aid);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "aid");
        assert_eq!(value["lat"], 23.81);
        assert_eq!(value["lng"], 90.41);
        for field in REQUIRED_FIELDS {
            assert!(value.get(field).is_some(), "missing {field}");
        }
    }

    #[test]
    fn csv_fields_prefer_source_text() {
        let plain = FacilityRecord::new("A", "B", 24.0, 90.41, Category::Vaccine);
        assert_eq!(plain.csv_fields(), ["A", "B", "24", "90.41", "vaccine"]);

        let parsed = plain.clone().with_source(SourceText {
            lat: "24.000".into(),
            lng: " 90.410".into(),
            category: Some("Vaccination".into()),
        });
        assert_eq!(parsed.csv_fields(), ["A", "B", "24.000", " 90.410", "Vaccination"]);

        let fallback = plain.with_source(SourceText {
            lat: "24".into(),
            lng: "90.41".into(),
            category: None,
        });
        assert_eq!(fallback.csv_fields()[4], "vaccine");
    }

    #[test]
    fn rounding_keeps_six_places() {
        assert_eq!(round_coordinate(23.780_612_345), 23.780_612);
        assert_eq!(round_coordinate(-0.000_000_4), -0.0);
    }
}
