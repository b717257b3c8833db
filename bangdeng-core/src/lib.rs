//! Core domain types for the dengue facility map: the normalized facility
//! record, the closed category label set, and the country registry used to
//! scope collection.

pub mod category;
pub mod country;
pub mod error;
pub mod record;

pub use category::Category;
pub use country::{BoundingBox, Country};
pub use error::CoreError;
pub use record::{
    FacilityRecord, PLACEHOLDER_ADDRESS, PLACEHOLDER_NAME, REQUIRED_FIELDS, SourceText,
    is_valid_latitude, is_valid_longitude, round_coordinate,
};
