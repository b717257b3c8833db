//! Overpass API client for OpenStreetMap health facilities.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use bangdeng_core::{BoundingBox, Country};

use crate::error::SourceError;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Client-side timeout for a single query.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Server-side timeout written into generated queries, in seconds.
const SERVER_TIMEOUT_SECS: u32 = 60;

const AMENITY_VALUES: &[&str] = &["hospital", "clinic", "pharmacy", "doctors"];
const HEALTHCARE_VALUES: &[&str] = &["hospital", "centre", "clinic", "laboratory", "pharmacy"];

/// Top-level Overpass JSON response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// A node, way, or relation returned by Overpass.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Present on ways and relations when the query asks for `out center`
    #[serde(default)]
    pub center: Option<Center>,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Own coordinates, falling back to the computed center.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => self.center.map(|c| (c.lat, c.lon)),
        }
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str).filter(|v| !v.trim().is_empty())
    }

    /// `node/123` style reference for log messages.
    pub fn location(&self) -> String {
        format!("{}/{}", self.kind, self.id)
    }
}

/// Overpass QL text ready to POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery(String);

impl OverpassQuery {
    /// Health facilities inside a country's bounding box.
    ///
    /// Boxes crossing the antimeridian are split in two so every filter has
    /// west < east.
    pub fn for_country(country: &Country) -> Self {
        Self::for_bbox(&country.bbox)
    }

    pub fn for_bbox(bbox: &BoundingBox) -> Self {
        let boxes = if bbox.crosses_antimeridian() {
            vec![
                BoundingBox::new(bbox.west, bbox.south, 180.0, bbox.north),
                BoundingBox::new(-180.0, bbox.south, bbox.east, bbox.north),
            ]
        } else {
            vec![*bbox]
        };

        let mut q = format!("[out:json][timeout:{SERVER_TIMEOUT_SECS}];\n(\n");
        for b in &boxes {
            let area = b.to_overpass();
            for value in AMENITY_VALUES {
                q.push_str(&format!("  nwr[\"amenity\"=\"{value}\"]({area});\n"));
            }
            for value in HEALTHCARE_VALUES {
                q.push_str(&format!("  nwr[\"healthcare\"=\"{value}\"]({area});\n"));
            }
        }
        q.push_str(");\nout center;\n");
        Self(q)
    }

    /// A hand-written query, sent as-is.
    pub fn raw(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Connection settings for the Overpass endpoint.
#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub url: String,
    pub timeout: Duration,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OVERPASS_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking Overpass client. One request per call, no retries.
pub struct OverpassClient {
    http: reqwest::blocking::Client,
    url: String,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, SourceError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("bangdeng/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// Run a query and parse the response.
    pub fn query(&self, query: &OverpassQuery) -> Result<OverpassResponse, SourceError> {
        log::debug!("POST {} ({} bytes of query)", self.url, query.as_str().len());

        let resp = self
            .http
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()?;

        let status = resp.status();
        let text = resp.text()?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                message: text.chars().take(200).collect(),
            });
        }

        parse_response(&text)
    }

    /// Run a query, logging any failure and returning no elements.
    ///
    /// An empty result cannot tell "nothing found" apart from "request
    /// failed"; use [`OverpassClient::query`] when the difference matters.
    pub fn fetch_elements(&self, query: &OverpassQuery) -> Vec<OverpassElement> {
        match self.query(query) {
            Ok(response) => response.elements,
            Err(e) => {
                log::warn!("Overpass query failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Parse an Overpass JSON body.
pub fn parse_response(body: &str) -> Result<OverpassResponse, SourceError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
#[path = "tests/overpass_tests.rs"]
mod tests;
