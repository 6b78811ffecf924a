//! Data types mirroring eBird API v2 responses

use serde::Deserialize;

/// One row of the eBird taxonomy (`GET /ref/taxonomy/ebird`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonomyEntry {
    pub species_code: String,
    /// Common name
    pub com_name: String,
    /// Scientific name
    pub sci_name: String,
    /// Taxonomic category: "species", "issf" (subspecies), "hybrid", ...
    pub category: Option<String>,
    pub family_com_name: Option<String>,
    pub order: Option<String>,
}

/// One recent observation (`GET /data/obs/geo/recent`)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentObservation {
    /// Checklist submission id; observations from the same checklist share it
    pub sub_id: Option<String>,
    pub species_code: Option<String>,
    pub com_name: Option<String>,
    pub sci_name: String,
    /// "YYYY-MM-DD HH:MM" local time
    pub obs_dt: Option<String>,
    pub how_many: Option<u32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub loc_name: Option<String>,
    /// Whether the record passed regional review; absent means not validated
    #[serde(default)]
    pub obs_valid: bool,
}

/// Daily region statistics (`GET /product/stats/{region}/{y}/{m}/{d}`)
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    pub num_checklists: u64,
    pub num_contributors: u64,
    pub num_species: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_observation_deserializes() {
        let json = r#"{
            "speciesCode": "amerob",
            "comName": "American Robin",
            "sciName": "Turdus migratorius",
            "locId": "L123",
            "locName": "Fenway Victory Gardens",
            "obsDt": "2024-05-01 08:15",
            "howMany": 3,
            "lat": 42.3429,
            "lng": -71.0995,
            "obsValid": true,
            "obsReviewed": false,
            "locationPrivate": false,
            "subId": "S1700000"
        }"#;
        let obs: RecentObservation = serde_json::from_str(json).unwrap();
        assert_eq!(obs.sub_id.as_deref(), Some("S1700000"));
        assert_eq!(obs.how_many, Some(3));
        assert!(obs.obs_valid);
    }

    #[test]
    fn test_obs_valid_defaults_to_false() {
        let json = r#"{"sciName": "Turdus migratorius"}"#;
        let obs: RecentObservation = serde_json::from_str(json).unwrap();
        assert!(!obs.obs_valid);
        assert!(obs.how_many.is_none());
    }

    #[test]
    fn test_region_stats_deserializes() {
        let json = r#"{"numChecklists": 120, "numContributors": 45, "numSpecies": 180}"#;
        let stats: RegionStats = serde_json::from_str(json).unwrap();
        assert_eq!(stats.num_checklists, 120);
        assert_eq!(stats.num_species, 180);
    }
}
