//! Client-side taxon filter
//!
//! Narrows an already-fetched observation set without touching the network.

use crate::observation::Observation;
use crate::taxon::IconicTaxon;

/// Filter state for the taxon chips above the result views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaxonFilter {
    /// Keep everything
    #[default]
    All,
    /// Keep only records whose iconic category matches exactly. Records with
    /// no category never match.
    Only(IconicTaxon),
}

/// Apply a taxon filter to a fetched result set. Pure; the input is not
/// mutated and order is preserved.
pub fn filter_observations(observations: &[Observation], filter: TaxonFilter) -> Vec<Observation> {
    match filter {
        TaxonFilter::All => observations.to_vec(),
        TaxonFilter::Only(wanted) => observations
            .iter()
            .filter(|obs| obs.taxon.iconic == Some(wanted))
            .cloned()
            .collect(),
    }
}
