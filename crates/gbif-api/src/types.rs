//! Data types mirroring GBIF API responses
//!
//! Occurrence records are sparse; nearly every field is optional on the wire.

use serde::Deserialize;

/// Page of occurrences from `GET /occurrence/search`
#[derive(Debug, Clone, Deserialize)]
pub struct OccurrenceSearchResponse {
    /// Total matching records server-side
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub results: Vec<Occurrence>,
}

/// One occurrence record
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub key: u64,
    /// Species-level scientific name, when resolved that far
    pub species: Option<String>,
    pub genus: Option<String>,
    pub family: Option<String>,
    pub vernacular_name: Option<String>,
    /// Backbone rank: "SPECIES", "GENUS", ...
    pub taxon_rank: Option<String>,
    pub taxon_key: Option<u64>,
    pub class: Option<String>,
    pub kingdom: Option<String>,
    pub decimal_latitude: Option<f64>,
    pub decimal_longitude: Option<f64>,
    /// ISO timestamp or date, e.g. "2024-05-01T08:15:00"
    pub event_date: Option<String>,
    pub has_geospatial_issues: Option<bool>,
    #[serde(default)]
    pub media: Vec<GbifMedia>,
    pub locality: Option<String>,
    pub state_province: Option<String>,
    pub country: Option<String>,
    pub recorded_by: Option<String>,
    pub institution_code: Option<String>,
    pub dataset_name: Option<String>,
}

/// Media item embedded in an occurrence
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifMedia {
    pub r#type: Option<String>,
    /// Media URL
    pub identifier: Option<String>,
}

/// Result from `GET /species/suggest`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifSuggestion {
    pub key: u64,
    pub scientific_name: Option<String>,
    pub canonical_name: Option<String>,
    pub vernacular_name: Option<String>,
    pub rank: Option<String>,
    pub class: Option<String>,
    pub kingdom: Option<String>,
}

/// Count-only envelope shared by `species/search` and `dataset/search` when
/// called with `limit=0`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CountOnlyResponse {
    #[serde(default)]
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_deserializes() {
        let json = r#"{
            "key": 4501234567,
            "species": "Vulpes vulpes",
            "vernacularName": "Red Fox",
            "taxonRank": "SPECIES",
            "taxonKey": 5219243,
            "class": "Mammalia",
            "kingdom": "Animalia",
            "decimalLatitude": 51.5,
            "decimalLongitude": -0.1,
            "eventDate": "2024-05-01T08:15:00",
            "hasGeospatialIssues": false,
            "media": [{"type": "StillImage", "identifier": "https://img.example/1.jpg"}],
            "locality": "Hampstead Heath",
            "stateProvince": "England",
            "country": "United Kingdom",
            "recordedBy": "A. Naturalist"
        }"#;
        let occ: Occurrence = serde_json::from_str(json).unwrap();
        assert_eq!(occ.key, 4501234567);
        assert_eq!(occ.taxon_rank.as_deref(), Some("SPECIES"));
        assert_eq!(occ.has_geospatial_issues, Some(false));
        assert_eq!(occ.media.len(), 1);
    }

    #[test]
    fn test_sparse_occurrence_deserializes() {
        let occ: Occurrence = serde_json::from_str(r#"{"key": 1}"#).unwrap();
        assert!(occ.species.is_none());
        assert!(occ.media.is_empty());
        assert!(occ.has_geospatial_issues.is_none());
    }

    #[test]
    fn test_search_response_defaults() {
        let page: OccurrenceSearchResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
    }
}
