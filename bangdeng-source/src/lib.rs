//! Facility sources: delimited files and the Overpass API, plus the
//! normalizer that maps both onto [`bangdeng_core::FacilityRecord`].

pub mod error;
pub mod normalize;
pub mod overpass;
pub mod rows;

pub use error::{NormalizeError, SourceError};
pub use normalize::{UnknownCategoryPolicy, classify_tags, normalize_element, normalize_row};
pub use overpass::{
    Center, OverpassClient, OverpassConfig, OverpassElement, OverpassQuery, OverpassResponse,
    parse_response,
};
pub use rows::{FACILITY_HEADER, RawRow, RowReader, read_rows, write_records, write_records_to, write_rows};
