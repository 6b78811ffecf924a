//! Shared domain model for wildnear
//!
//! Every biodiversity source (iNaturalist, eBird, GBIF) is normalized into the
//! [`Observation`] record defined here. The crate also carries the fixed
//! iconic-taxon display metadata, the client-side taxon filter, search query
//! types, time-window date math, and the geodesy helpers used to translate a
//! search radius into API parameters and map geometry.

pub mod filter;
pub mod geo;
pub mod observation;
pub mod query;
pub mod taxon;
pub mod time_window;

pub use filter::{filter_observations, TaxonFilter};
pub use geo::{bounding_box, circle_ring, haversine_km, BoundingBox, GeoPoint};
pub use observation::{Observation, ObservedTaxon, Observer, QualityGrade, Source};
pub use query::{
    SearchOutcome, SearchQuery, SpeciesSelection, TaxonSuggestion, LIMIT_OPTIONS,
    RADIUS_OPTIONS_KM,
};
pub use taxon::{IconicTaxon, TaxonMeta, DEFAULT_TAXON_META};
pub use time_window::TimeWindow;
