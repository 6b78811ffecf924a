//! Rust client for the eBird API v2
//!
//! All endpoints require an API key sent via the `x-ebirdapitoken` header.
//!
//! # API Coverage
//!
//! - `GET /ref/taxonomy/ebird` - the full eBird taxonomy
//! - `GET /data/obs/geo/recent[/{speciesCode}]` - recent observations near a
//!   point, optionally restricted to one species
//! - `GET /product/stats/{region}/{y}/{m}/{d}` - daily checklist/species/
//!   contributor counts for a region
//!
//! # Example
//!
//! ```no_run
//! use ebird_api::{EbirdClient, RecentObservationsRequest};
//!
//! # async fn example() -> Result<(), ebird_api::EbirdError> {
//! let client = EbirdClient::new("my-api-key");
//! let obs = client
//!     .recent_observations(&RecentObservationsRequest::near(42.36, -71.06))
//!     .await?;
//! println!("{} recent sightings", obs.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{EbirdClient, RecentObservationsRequest};
pub use error::{EbirdError, Result};
pub use types::{RecentObservation, RegionStats, TaxonomyEntry};
