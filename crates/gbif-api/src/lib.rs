//! Rust client for the GBIF (Global Biodiversity Information Facility) API
//!
//! Covers the keyless v1 endpoints for occurrence search and the aggregate
//! counts behind the GBIF dashboard. GBIF has no native radius search, so
//! geographic queries take min/max latitude and longitude ranges; callers
//! convert a radius to a bounding box first.
//!
//! # Example
//!
//! ```no_run
//! use gbif_api::{GbifClient, OccurrenceSearchRequest};
//!
//! # async fn example() -> Result<(), gbif_api::GbifError> {
//! let client = GbifClient::new();
//! let req = OccurrenceSearchRequest::in_bounds(37.6, 37.9, -122.6, -122.3);
//! let page = client.occurrence_search(&req).await?;
//! println!("{} occurrences in the box", page.count);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - `GET /occurrence/search` - occurrence records with filters
//! - `GET /occurrence/count` - global occurrence total (bare integer body)
//! - `GET /occurrence/counts/countries` - per-country occurrence totals
//! - `GET /species/suggest` - autocomplete species search
//! - `GET /species/search` - used with `limit=0` for backbone species counts
//! - `GET /dataset/search` - used with `limit=0` for dataset counts

mod client;
mod error;
mod types;

pub use client::{GbifClient, HigherTaxonFilter, OccurrenceSearchRequest};
pub use error::{GbifError, Result};
pub use types::{GbifMedia, GbifSuggestion, Occurrence, OccurrenceSearchResponse};
