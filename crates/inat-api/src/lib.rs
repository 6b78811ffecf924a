//! Rust client for the iNaturalist API v1
//!
//! Covers the keyless JSON endpoints the wildnear search layer needs:
//!
//! - `GET /observations` - geo-bounded observation search and count-only
//!   queries (`per_page=0`)
//! - `GET /observations/species_counts` - distinct-species counts, global or
//!   geo-bounded
//! - `GET /taxa/autocomplete` - species name autocomplete
//!
//! # Example
//!
//! ```no_run
//! use inat_api::{InatClient, ObservationsRequest};
//!
//! # async fn example() -> Result<(), inat_api::InatError> {
//! let client = InatClient::new();
//! let page = client
//!     .observations(&ObservationsRequest::near(37.77, -122.42, 10.0))
//!     .await?;
//! println!("{} observations nearby", page.total_results);
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{InatClient, ObservationCountRequest, ObservationsRequest, SpeciesCountsRequest};
pub use error::{InatError, Result};
pub use types::{
    GeoJsonPoint, InatObservation, InatPhoto, InatTaxon, InatUser, ObservationsResponse,
    SpeciesCount, SpeciesCountsResponse, TaxonPhoto,
};
