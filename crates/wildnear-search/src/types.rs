//! Aggregate and dashboard types produced by the source adapters

use serde::Serialize;

use wildnear_core::TaxonSuggestion;

/// iNaturalist-wide headline counts
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InatGlobalCounts {
    pub total_observations: u64,
    pub total_species: u64,
    pub research_grade: u64,
}

/// One species with its observation count, for the most-observed ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesTally {
    pub count: u64,
    pub taxon: TaxonSuggestion,
}

/// One country row in a top-countries ranking
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryCount {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub count: u64,
}

/// One region row of the eBird daily stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStatsRow {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub checklists: u64,
    pub contributors: u64,
    pub species: u64,
}

/// eBird daily stats across the tracked regions. Totals cover only the
/// regions that were fetched successfully.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EbirdRegionalStats {
    pub regions: Vec<RegionStatsRow>,
    pub total_checklists: u64,
    pub total_contributors: u64,
    pub total_species: u64,
}

/// GBIF-wide headline counts
#[derive(Debug, Clone, Copy, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifGlobalStats {
    pub total_occurrences: u64,
    pub total_species: u64,
    pub total_datasets: u64,
}

/// Occurrence count for one kingdom of the GBIF backbone
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KingdomCount {
    pub taxon_key: u64,
    pub name: String,
    pub emoji: String,
    pub count: u64,
}
