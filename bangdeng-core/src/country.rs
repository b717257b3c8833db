use serde::Serialize;

use crate::error::CoreError;

/// Longitude/latitude box used to scope an Overpass query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Overpass filter order: `south,west,north,east`.
    pub fn to_overpass(&self) -> String {
        format!("{},{},{},{}", self.south, self.west, self.north, self.east)
    }

    /// True when the box crosses the antimeridian (east < west).
    pub fn crosses_antimeridian(&self) -> bool {
        self.east < self.west
    }
}

/// A country the collector knows how to query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Country {
    /// Lookup key, e.g. `bangladesh`
    pub key: &'static str,
    pub name: &'static str,
    /// ISO 3166-1 alpha-2 code
    pub code: &'static str,
    pub bbox: BoundingBox,
}

macro_rules! country {
    ($key:literal, $name:literal, $code:literal, [$w:expr, $s:expr, $e:expr, $n:expr]) => {
        Country {
            key: $key,
            name: $name,
            code: $code,
            bbox: BoundingBox::new($w, $s, $e, $n),
        }
    };
}

/// Dengue-affected countries, in collection order.
const COUNTRIES: &[Country] = &[
    country!("bangladesh", "Bangladesh", "BD", [88.0, 20.0, 92.1, 26.6]),
    country!("thailand", "Thailand", "TH", [97.3, 5.6, 105.6, 20.5]),
    country!("vietnam", "Vietnam", "VN", [102.14, 8.18, 109.46, 23.39]),
    country!("indonesia", "Indonesia", "ID", [95.0, -11.0, 141.0, 6.0]),
    country!("philippines", "Philippines", "PH", [116.0, 4.0, 126.0, 21.0]),
    country!("malaysia", "Malaysia", "MY", [100.0, 0.5, 120.0, 7.5]),
    country!("singapore", "Singapore", "SG", [103.6, 1.2, 104.1, 1.5]),
    country!("laos", "Laos", "LA", [100.1, 13.9, 107.7, 22.5]),
    country!("cambodia", "Cambodia", "KH", [102.3, 10.4, 107.6, 14.7]),
    country!("myanmar", "Myanmar", "MM", [92.2, 9.5, 101.2, 28.5]),
    country!("india", "India", "IN", [68.7, 6.7, 97.25, 35.5]),
    country!("sri_lanka", "Sri Lanka", "LK", [79.6, 5.9, 81.9, 9.8]),
    country!("pakistan", "Pakistan", "PK", [60.9, 23.6, 77.0, 37.0]),
    country!("brazil", "Brazil", "BR", [-74.0, -33.0, -34.0, 5.3]),
    country!("colombia", "Colombia", "CO", [-79.0, -4.2, -66.9, 13.4]),
    country!("venezuela", "Venezuela", "VE", [-73.4, 0.6, -59.8, 12.2]),
    country!("peru", "Peru", "PE", [-84.0, -18.3, -68.6, 0.2]),
    country!("ecuador", "Ecuador", "EC", [-92.0, -5.0, -75.2, 2.3]),
    country!("mexico", "Mexico", "MX", [-118.5, 14.5, -86.7, 32.7]),
    country!("argentina", "Argentina", "AR", [-73.6, -55.1, -53.6, -21.8]),
    country!("nigeria", "Nigeria", "NG", [2.7, 4.3, 14.7, 13.9]),
    country!("kenya", "Kenya", "KE", [33.8, -4.7, 41.9, 5.0]),
    country!("tanzania", "Tanzania", "TZ", [29.3, -11.7, 40.4, 0.9]),
    country!("uganda", "Uganda", "UG", [29.6, -1.5, 35.0, 4.2]),
    country!("australia", "Australia", "AU", [113.3, -43.7, 153.6, -10.7]),
    country!("fiji", "Fiji", "FJ", [177.9, -19.5, -178.4, -16.0]),
    country!("papua_new_guinea", "Papua New Guinea", "PG", [140.8, -11.6, 156.0, -1.0]),
];

impl Country {
    /// Every registered country.
    pub fn all() -> &'static [Country] {
        COUNTRIES
    }

    /// Look up a country by key, ISO code, or display name (case-insensitive).
    /// Spaces and hyphens in the key are treated as underscores.
    pub fn lookup(name: &str) -> Result<&'static Country, CoreError> {
        let wanted = name.trim().to_lowercase().replace([' ', '-'], "_");
        COUNTRIES
            .iter()
            .find(|c| {
                c.key == wanted
                    || c.code.eq_ignore_ascii_case(&wanted)
                    || c.name.to_lowercase().replace(' ', "_") == wanted
            })
            .ok_or_else(|| CoreError::unknown_country(name))
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

#[cfg(test)]
#[path = "tests/country_tests.rs"]
mod tests;
