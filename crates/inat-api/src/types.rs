//! Data types mirroring iNaturalist API v1 responses
//!
//! The API uses snake_case field names, which matches serde's default, so no
//! renaming is needed. Fields the search layer does not consume are omitted.

use serde::Deserialize;

/// Page of observations from `GET /observations`
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    pub total_results: u64,
    #[serde(default)]
    pub results: Vec<InatObservation>,
}

/// One observation as returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct InatObservation {
    pub id: u64,
    pub taxon: Option<InatTaxon>,
    #[serde(default)]
    pub photos: Vec<InatPhoto>,
    pub observed_on: Option<String>,
    pub quality_grade: Option<String>,
    pub place_guess: Option<String>,
    pub geojson: Option<GeoJsonPoint>,
    pub user: Option<InatUser>,
}

/// Taxon as embedded in observations, species counts, and autocomplete rows
#[derive(Debug, Clone, Deserialize)]
pub struct InatTaxon {
    pub id: u64,
    /// Scientific name
    pub name: Option<String>,
    pub preferred_common_name: Option<String>,
    pub iconic_taxon_name: Option<String>,
    pub rank: Option<String>,
    pub wikipedia_url: Option<String>,
    pub default_photo: Option<TaxonPhoto>,
}

/// Default photo attached to a taxon
#[derive(Debug, Clone, Deserialize)]
pub struct TaxonPhoto {
    pub square_url: Option<String>,
    pub medium_url: Option<String>,
}

/// Photo attached to an observation
#[derive(Debug, Clone, Deserialize)]
pub struct InatPhoto {
    pub url: Option<String>,
}

/// GeoJSON point: coordinates are `[longitude, latitude]`
#[derive(Debug, Clone, Deserialize)]
pub struct GeoJsonPoint {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl GeoJsonPoint {
    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.first().copied()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.get(1).copied()
    }
}

/// The observing user
#[derive(Debug, Clone, Deserialize)]
pub struct InatUser {
    pub login: Option<String>,
    /// Full display name, when the user has set one
    pub name: Option<String>,
    pub icon_url: Option<String>,
}

/// Response from `GET /observations/species_counts`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCountsResponse {
    pub total_results: u64,
    #[serde(default)]
    pub results: Vec<SpeciesCount>,
}

/// One species with its observation count
#[derive(Debug, Clone, Deserialize)]
pub struct SpeciesCount {
    pub count: u64,
    pub taxon: InatTaxon,
}

/// Response from `GET /taxa/autocomplete`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AutocompleteResponse {
    #[serde(default)]
    pub results: Vec<InatTaxon>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_deserializes() {
        let json = r#"{
            "id": 99,
            "taxon": {
                "id": 12727,
                "name": "Turdus migratorius",
                "preferred_common_name": "American Robin",
                "iconic_taxon_name": "Aves",
                "rank": "species",
                "wikipedia_url": "https://en.wikipedia.org/wiki/American_robin",
                "default_photo": {"square_url": "https://static.example/sq.jpg", "medium_url": null}
            },
            "photos": [{"url": "https://static.example/1.jpg"}],
            "observed_on": "2024-05-01",
            "quality_grade": "research",
            "place_guess": "Golden Gate Park",
            "geojson": {"type": "Point", "coordinates": [-122.48, 37.77]},
            "user": {"login": "birder", "name": null, "icon_url": null}
        }"#;
        let obs: InatObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.id, 99);
        assert_eq!(obs.geojson.as_ref().unwrap().longitude(), Some(-122.48));
        assert_eq!(obs.geojson.as_ref().unwrap().latitude(), Some(37.77));
        assert_eq!(obs.taxon.unwrap().preferred_common_name.as_deref(), Some("American Robin"));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"id": 1}"#;
        let obs: InatObservation = serde_json::from_str(json).unwrap();
        assert!(obs.taxon.is_none());
        assert!(obs.photos.is_empty());
        assert!(obs.geojson.is_none());
    }
}
