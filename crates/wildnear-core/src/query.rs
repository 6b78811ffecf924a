//! Search query and result types

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::observation::Observation;
use crate::taxon::IconicTaxon;
use crate::time_window::TimeWindow;

/// Radius choices offered by the search controls, in kilometers. Adapters
/// clamp further where an API imposes its own ceiling.
pub const RADIUS_OPTIONS_KM: [u32; 6] = [1, 5, 10, 25, 50, 100];

/// Result-count caps offered by the search controls
pub const LIMIT_OPTIONS: [u32; 4] = [20, 50, 100, 200];

/// A species filter as produced by one source's autocomplete. The handle is
/// source-local; the orchestrator hands it back to the adapter it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpeciesSelection {
    /// iNaturalist numeric taxon id
    InatTaxon(u64),
    /// eBird species code, e.g. "amerob"
    EbirdSpecies(String),
    /// GBIF backbone taxon key
    GbifTaxon(u64),
}

/// One search action. Built per search, consumed once by the orchestrator,
/// then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub center: GeoPoint,
    pub radius_km: u32,
    pub time_window: TimeWindow,
    /// Maximum records to return in the page
    pub limit: u32,
    pub species: Option<SpeciesSelection>,
}

impl SearchQuery {
    pub fn new(center: GeoPoint, radius_km: u32, time_window: TimeWindow, limit: u32) -> Self {
        Self {
            center,
            radius_km,
            time_window,
            limit,
            species: None,
        }
    }

    pub fn with_species(mut self, species: SpeciesSelection) -> Self {
        self.species = Some(species);
        self
    }
}

/// What a search returns: the server-side total plus one page of normalized
/// records. A zero-count outcome is a valid state, distinct from an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOutcome {
    pub total_results: u64,
    pub observations: Vec<Observation>,
}

/// One row of species autocomplete, shared across sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonSuggestion {
    pub selection: SpeciesSelection,
    /// Preferred display name (common name when known)
    pub name: String,
    pub scientific_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iconic: Option<IconicTaxon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let center = GeoPoint { longitude: 4.9, latitude: 52.37 };
        let query = SearchQuery::new(center, 25, TimeWindow::Week, 50)
            .with_species(SpeciesSelection::EbirdSpecies("houspa".to_string()));
        assert_eq!(query.radius_km, 25);
        assert_eq!(
            query.species,
            Some(SpeciesSelection::EbirdSpecies("houspa".to_string()))
        );
    }

    #[test]
    fn test_species_selection_serialization() {
        let json = serde_json::to_string(&SpeciesSelection::InatTaxon(12727)).unwrap();
        assert_eq!(json, "{\"inatTaxon\":12727}");
    }
}
