//! Source adapters and query orchestrator for wildnear
//!
//! Each external biodiversity API gets one adapter module that translates a
//! [`wildnear_core::SearchQuery`] into that API's request shape and
//! normalizes the response into the shared
//! [`wildnear_core::Observation`] record. [`SearchClient`] picks the active
//! adapter, guards against stale responses from superseded searches, and
//! fronts the geocoding services. Adding a source means adding one adapter
//! module; nothing else branches on the source tag.

pub mod client;
pub mod ebird;
pub mod error;
pub mod gbif;
pub mod generation;
pub mod inat;
pub mod types;

pub use client::{SearchClient, SearchConfig};
pub use ebird::EbirdSource;
pub use error::{Result, SearchError};
pub use gbif::GbifSource;
pub use generation::{RequestToken, RequestTracker};
pub use inat::InatSource;
pub use types::{
    CountryCount, EbirdRegionalStats, GbifGlobalStats, InatGlobalCounts, KingdomCount,
    RegionStatsRow, SpeciesTally,
};
