//! Map raw rows and OSM elements onto [`FacilityRecord`].
//!
//! Category resolution is order-dependent: the first matching rule wins.
//! What happens to a record whose category cannot be resolved is decided by
//! an explicit [`UnknownCategoryPolicy`] chosen by the caller.

use bangdeng_core::{
    Category, FacilityRecord, PLACEHOLDER_ADDRESS, PLACEHOLDER_NAME, SourceText,
    is_valid_latitude, is_valid_longitude, round_coordinate,
};

use crate::error::NormalizeError;
use crate::overpass::OverpassElement;
use crate::rows::RawRow;

/// What to do with a record whose category is not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownCategoryPolicy {
    /// Label it `hospital`.
    #[default]
    Hospital,
    /// Assign `Category::CANONICAL[index % 5]`, using the record's position.
    Cyclic,
    /// Drop the record.
    Reject,
}

impl UnknownCategoryPolicy {
    pub fn resolve(&self, index: usize) -> Option<Category> {
        match self {
            Self::Hospital => Some(Category::Hospital),
            Self::Cyclic => Some(Category::cyclic(index)),
            Self::Reject => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Cyclic => "cyclic",
            Self::Reject => "reject",
        }
    }
}

impl std::fmt::Display for UnknownCategoryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnknownCategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hospital" => Ok(Self::Hospital),
            "cyclic" => Ok(Self::Cyclic),
            "reject" | "drop" => Ok(Self::Reject),
            other => Err(format!(
                "unknown fallback '{other}' (expected hospital, cyclic, or reject)"
            )),
        }
    }
}

const VACCINE_KEYWORDS: &[&str] = &["vaccin", "immuniz", "immunis", "epi centre", "epi center"];
const BLOOD_TEST_KEYWORDS: &[&str] = &["blood", "diagnostic", "laborator", "pathology", "rapid test"];
const AID_KEYWORDS: &[&str] = &["free", "charity"];
/// Matched as whole words only ("ngo" also occurs inside "Mongla").
const AID_WORDS: &[&str] = &["ngo"];
const DENGUE_KEYWORDS: &[&str] = &["dengue", "aedes", "mosquito", "fever clinic"];

/// Tags whose text is searched for keywords.
const TEXT_TAGS: &[&str] = &["name", "name:en", "description", "healthcare", "healthcare:speciality"];

/// Resolve a category from OSM tags, or `None` when no rule matches.
///
/// Rules, first match wins:
/// 1. pharmacy tags (`amenity`/`healthcare=pharmacy`, `shop=chemist`)
/// 2. vaccination keywords
/// 3. blood/diagnostic keywords, or `healthcare=laboratory`
/// 4. free/charity keywords
/// 5. dengue keywords
pub fn classify_tags<'a>(tag: impl Fn(&str) -> Option<&'a str>) -> Option<Category> {
    let is = |key: &str, value: &str| tag(key).is_some_and(|v| v.eq_ignore_ascii_case(value));

    if is("amenity", "pharmacy") || is("healthcare", "pharmacy") || is("shop", "chemist") {
        return Some(Category::Pharmacy);
    }

    let text = TEXT_TAGS
        .iter()
        .filter_map(|&k| tag(k))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| text.contains(w));
    let has_word = |words: &[&str]| {
        text.split(|c: char| !c.is_alphanumeric())
            .any(|token| words.contains(&token))
    };

    if mentions(VACCINE_KEYWORDS) {
        Some(Category::Vaccine)
    } else if mentions(BLOOD_TEST_KEYWORDS) || is("healthcare", "laboratory") {
        Some(Category::BloodTest)
    } else if mentions(AID_KEYWORDS) || has_word(AID_WORDS) {
        Some(Category::Aid)
    } else if mentions(DENGUE_KEYWORDS) {
        Some(Category::DengueCenter)
    } else {
        None
    }
}

/// Normalize one row of a facility file.
///
/// Returns `Ok(None)` when the policy rejects the row's category.
pub fn normalize_row(
    row: &RawRow,
    policy: UnknownCategoryPolicy,
) -> Result<Option<FacilityRecord>, NormalizeError> {
    let at = row.location();
    let lat = parse_coordinate(&at, "lat", row.get("lat"))?;
    let lng = parse_coordinate(&at, "lng", row.get("lng"))?;
    check_range(&at, lat, lng)?;

    let (category, kind_text) = match row.get("type").parse::<Category>() {
        Ok(c) => (c, Some(row.get("type").to_string())),
        Err(_) => match policy.resolve(row.index) {
            Some(c) => {
                log::debug!("{at}: unknown type '{}', using {c}", row.get("type"));
                (c, None)
            }
            None => {
                log::debug!("{at}: unknown type '{}', rejected", row.get("type"));
                return Ok(None);
            }
        },
    };

    let record = FacilityRecord::new(
        non_empty_or(row.get("name"), PLACEHOLDER_NAME),
        non_empty_or(row.get("address"), PLACEHOLDER_ADDRESS),
        lat,
        lng,
        category,
    );
    Ok(Some(record.with_source(SourceText {
        lat: row.get("lat").to_string(),
        lng: row.get("lng").to_string(),
        category: kind_text,
    })))
}

/// Normalize one Overpass element. `index` is its position in the response,
/// used by the cyclic policy.
pub fn normalize_element(
    element: &OverpassElement,
    index: usize,
    policy: UnknownCategoryPolicy,
) -> Result<Option<FacilityRecord>, NormalizeError> {
    let at = element.location();
    let (lat, lng) = element
        .position()
        .ok_or_else(|| NormalizeError::MissingCoordinate {
            at: at.clone(),
            field: "lat",
        })?;
    check_range(&at, lat, lng)?;

    let category = match classify_tags(|k| element.tag(k)).or_else(|| policy.resolve(index)) {
        Some(c) => c,
        None => return Ok(None),
    };

    let name = ["name", "name:en", "name:bn", "official_name"]
        .iter()
        .find_map(|k| element.tag(k))
        .unwrap_or(PLACEHOLDER_NAME)
        .to_string();

    Ok(Some(FacilityRecord::new(
        name,
        element_address(element),
        round_coordinate(lat),
        round_coordinate(lng),
        category,
    )))
}

/// Join the structured `addr:*` parts with `", "`.
fn element_address(element: &OverpassElement) -> String {
    let street = match (element.tag("addr:housenumber"), element.tag("addr:street")) {
        (Some(number), Some(street)) => Some(format!("{number} {street}")),
        (None, Some(street)) => Some(street.to_string()),
        _ => None,
    };

    let parts: Vec<String> = street
        .into_iter()
        .chain(
            ["addr:city", "addr:state", "addr:postcode"]
                .iter()
                .filter_map(|k| element.tag(k))
                .map(str::to_string),
        )
        .collect();

    if parts.is_empty() {
        PLACEHOLDER_ADDRESS.to_string()
    } else {
        parts.join(", ")
    }
}

fn parse_coordinate(at: &str, field: &'static str, raw: &str) -> Result<f64, NormalizeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(NormalizeError::MissingCoordinate {
            at: at.to_string(),
            field,
        });
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| NormalizeError::BadCoordinate {
            at: at.to_string(),
            field,
            value: raw.to_string(),
        })
}

fn check_range(at: &str, lat: f64, lng: f64) -> Result<(), NormalizeError> {
    if is_valid_latitude(lat) && is_valid_longitude(lng) {
        Ok(())
    } else {
        Err(NormalizeError::OutOfRange {
            at: at.to_string(),
            lat,
            lng,
        })
    }
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    if value.trim().is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
#[path = "tests/normalize_tests.rs"]
mod tests;
