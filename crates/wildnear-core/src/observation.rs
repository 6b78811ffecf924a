//! The normalized observation record shared by every source adapter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::taxon::IconicTaxon;

/// Which external API a record came from. Together with
/// [`Observation::id`] this uniquely identifies a record within one result
/// set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "iNaturalist")]
    INaturalist,
    #[serde(rename = "eBird")]
    EBird,
    #[serde(rename = "GBIF")]
    Gbif,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::INaturalist => "iNaturalist",
            Self::EBird => "eBird",
            Self::Gbif => "GBIF",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-level trust indicator approximating how verified an observation is.
/// Each adapter documents its own derivation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Research,
    NeedsId,
    Casual,
}

impl QualityGrade {
    /// Parse the iNaturalist wire value; unknown strings are treated as casual
    pub fn from_wire(value: &str) -> Self {
        match value {
            "research" => Self::Research,
            "needs_id" => Self::NeedsId,
            _ => Self::Casual,
        }
    }
}

/// Taxon fields carried on a normalized observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservedTaxon {
    pub scientific_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iconic: Option<IconicTaxon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
    /// Source-local taxon identifier (iNaturalist taxon id, eBird species
    /// code, GBIF taxon key)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_taxon_id: Option<String>,
}

/// Who reported the observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observer {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// One wildlife observation, normalized from any source. Records are built
/// fresh per query and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,
    pub source: Source,
    pub taxon: ObservedTaxon,
    pub photos: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed_on: Option<NaiveDate>,
    pub quality_grade: QualityGrade,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_guess: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
    pub observer: Observer,
    /// How many individuals were reported (eBird checklists only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub individual_count: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_grade_from_wire() {
        assert_eq!(QualityGrade::from_wire("research"), QualityGrade::Research);
        assert_eq!(QualityGrade::from_wire("needs_id"), QualityGrade::NeedsId);
        assert_eq!(QualityGrade::from_wire("casual"), QualityGrade::Casual);
        assert_eq!(QualityGrade::from_wire("garbage"), QualityGrade::Casual);
    }

    #[test]
    fn test_source_display_names() {
        assert_eq!(Source::INaturalist.to_string(), "iNaturalist");
        assert_eq!(Source::EBird.to_string(), "eBird");
        assert_eq!(Source::Gbif.to_string(), "GBIF");
    }

    #[test]
    fn test_observation_serializes_camel_case() {
        let obs = Observation {
            id: "123".to_string(),
            source: Source::INaturalist,
            taxon: ObservedTaxon {
                scientific_name: "Turdus migratorius".to_string(),
                common_name: Some("American Robin".to_string()),
                iconic: Some(IconicTaxon::Aves),
                rank: Some("species".to_string()),
                wikipedia_url: None,
                source_taxon_id: Some("12727".to_string()),
            },
            photos: vec!["https://example.org/p.jpg".to_string()],
            observed_on: NaiveDate::from_ymd_opt(2024, 5, 1),
            quality_grade: QualityGrade::Research,
            place_guess: Some("Golden Gate Park".to_string()),
            location: Some(GeoPoint { longitude: -122.48, latitude: 37.77 }),
            observer: Observer {
                display_name: "someone".to_string(),
                avatar_url: None,
            },
            individual_count: None,
        };

        let json = serde_json::to_string(&obs).unwrap();
        assert!(json.contains("\"qualityGrade\":\"research\""));
        assert!(json.contains("\"scientificName\":\"Turdus migratorius\""));
        assert!(json.contains("\"source\":\"iNaturalist\""));
        assert!(!json.contains("wikipediaUrl"));
    }
}
