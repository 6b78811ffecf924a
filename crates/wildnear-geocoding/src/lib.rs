//! Geocoding for wildnear
//!
//! Two independent services behind one crate: reverse geocoding of a
//! coordinate to a human-readable label via Nominatim (keyless, cached,
//! rate-limited), and forward place search via the Mapbox geocoding API
//! (keyed). Reverse geocoding is strictly best-effort for callers that use
//! [`ReverseGeocoder::place_label_or_coords`]: any failure degrades to a
//! formatted coordinate string.

mod error;
mod places;
mod reverse;

pub use error::{GeocodingError, Result};
pub use places::{PlaceCandidate, PlaceSearch};
pub use reverse::{coordinate_label, ReverseGeocoder};
