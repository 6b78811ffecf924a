//! GBIF source adapter
//!
//! GBIF has no radius search, no iconic-taxon concept, and no vetting grade,
//! so this adapter converts the radius to a bounding box, derives the iconic
//! category from the backbone class and kingdom, and approximates a quality
//! grade from the record's geospatial health and rank.

use std::collections::HashMap;

use futures::future::join_all;
use lazy_static::lazy_static;
use tracing::warn;

use chrono::Utc;
use gbif_api::{GbifClient, GbifSuggestion, HigherTaxonFilter, Occurrence, OccurrenceSearchRequest};
use wildnear_core::{
    bounding_box, GeoPoint, IconicTaxon, Observation, ObservedTaxon, Observer, QualityGrade,
    SearchOutcome, SearchQuery, SpeciesSelection, TaxonSuggestion,
};

use crate::error::Result;
use crate::types::{CountryCount, GbifGlobalStats, KingdomCount};

/// Shown when a record names no collector, institution, or dataset
const FALLBACK_OBSERVER: &str = "GBIF Contributor";

/// Photos carried per record, at most
const MAX_PHOTOS: usize = 3;

/// How many autocomplete rows to surface
const SUGGESTION_LIMIT: u32 = 8;

/// Kingdoms broken out on the dashboard, by backbone taxon key
const KINGDOMS: [(u64, &str, &str); 5] = [
    (1, "Animalia", "🐾"),
    (6, "Plantae", "🌿"),
    (3, "Bacteria", "🦠"),
    (5, "Fungi", "🍄"),
    (4, "Chromista", "🔬"),
];

lazy_static! {
    /// Display names for GBIF's upper-snake country enumeration
    static ref COUNTRY_NAMES: HashMap<&'static str, &'static str> = HashMap::from([
        ("UNITED_STATES", "United States"), ("AUSTRALIA", "Australia"),
        ("CANADA", "Canada"), ("FRANCE", "France"),
        ("UNITED_KINGDOM", "United Kingdom"), ("SWEDEN", "Sweden"),
        ("NETHERLANDS", "Netherlands"), ("SPAIN", "Spain"),
        ("NORWAY", "Norway"), ("GERMANY", "Germany"),
        ("DENMARK", "Denmark"), ("INDIA", "India"),
        ("FINLAND", "Finland"), ("SOUTH_AFRICA", "South Africa"),
        ("BELGIUM", "Belgium"), ("BRAZIL", "Brazil"),
        ("COLOMBIA", "Colombia"), ("MEXICO", "Mexico"),
        ("COSTA_RICA", "Costa Rica"), ("SWITZERLAND", "Switzerland"),
        ("TAIWAN", "Taiwan"), ("PORTUGAL", "Portugal"),
        ("CHILE", "Chile"), ("RUSSIAN_FEDERATION", "Russia"),
        ("NEW_ZEALAND", "New Zealand"), ("ARGENTINA", "Argentina"),
        ("POLAND", "Poland"), ("AUSTRIA", "Austria"),
        ("JAPAN", "Japan"), ("ITALY", "Italy"),
    ]);

    static ref COUNTRY_FLAGS: HashMap<&'static str, &'static str> = HashMap::from([
        ("UNITED_STATES", "🇺🇸"), ("AUSTRALIA", "🇦🇺"), ("CANADA", "🇨🇦"),
        ("FRANCE", "🇫🇷"), ("UNITED_KINGDOM", "🇬🇧"), ("SWEDEN", "🇸🇪"),
        ("NETHERLANDS", "🇳🇱"), ("SPAIN", "🇪🇸"), ("NORWAY", "🇳🇴"),
        ("GERMANY", "🇩🇪"), ("DENMARK", "🇩🇰"), ("INDIA", "🇮🇳"),
        ("FINLAND", "🇫🇮"), ("SOUTH_AFRICA", "🇿🇦"), ("BELGIUM", "🇧🇪"),
        ("BRAZIL", "🇧🇷"), ("COLOMBIA", "🇨🇴"), ("MEXICO", "🇲🇽"),
        ("COSTA_RICA", "🇨🇷"), ("SWITZERLAND", "🇨🇭"), ("TAIWAN", "🇹🇼"),
        ("PORTUGAL", "🇵🇹"), ("CHILE", "🇨🇱"), ("RUSSIAN_FEDERATION", "🇷🇺"),
        ("NEW_ZEALAND", "🇳🇿"), ("ARGENTINA", "🇦🇷"), ("POLAND", "🇵🇱"),
        ("AUSTRIA", "🇦🇹"), ("JAPAN", "🇯🇵"), ("ITALY", "🇮🇹"),
    ]);
}

/// Adapter for the GBIF occurrence API
pub struct GbifSource {
    api: GbifClient,
}

impl GbifSource {
    pub fn new(api: GbifClient) -> Self {
        Self { api }
    }

    /// Search occurrences around the query center
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        self.search_filtered(query, None).await
    }

    /// Search occurrences, optionally pre-filtered to one iconic category
    /// server-side (mapped onto GBIF's class/phylum/kingdom parameters)
    pub async fn search_filtered(
        &self,
        query: &SearchQuery,
        iconic: Option<IconicTaxon>,
    ) -> Result<SearchOutcome> {
        let now = Utc::now();
        let bbox = bounding_box(query.center, query.radius_km as f64);

        let mut req = OccurrenceSearchRequest::in_bounds(
            bbox.min_latitude,
            bbox.max_latitude,
            bbox.min_longitude,
            bbox.max_longitude,
        );
        req.limit = query.limit;
        if let (Some(start), Some(end)) = (
            query.time_window.start_date(now),
            query.time_window.end_date(now),
        ) {
            req.event_date = Some((start, end));
        }
        req.taxon_key = match &query.species {
            Some(SpeciesSelection::GbifTaxon(key)) => Some(*key),
            _ => None,
        };
        req.higher_taxon = iconic.map(higher_taxon_filter);

        let page = self.api.occurrence_search(&req).await?;
        Ok(SearchOutcome {
            total_results: page.count,
            observations: page.results.into_iter().map(normalize).collect(),
        })
    }

    /// Autocomplete species by name fragment, up to 8 candidates
    pub async fn suggest_species(&self, query: &str) -> Result<Vec<TaxonSuggestion>> {
        let suggestions = self.api.species_suggest(query, SUGGESTION_LIMIT).await?;
        Ok(suggestions.into_iter().map(suggestion_from).collect())
    }

    /// Headline totals for the dashboard. Best-effort: any failing count
    /// renders as zero rather than taking the widget down.
    pub async fn global_stats(&self) -> GbifGlobalStats {
        let (occurrences, species, datasets) = tokio::join!(
            self.api.occurrence_count(),
            self.api.species_search_count("SPECIES", "ACCEPTED"),
            self.api.dataset_search_count(),
        );

        GbifGlobalStats {
            total_occurrences: occurrences.unwrap_or_else(|e| {
                warn!(error = %e, "GBIF occurrence count failed");
                0
            }),
            total_species: species.unwrap_or_else(|e| {
                warn!(error = %e, "GBIF species count failed");
                0
            }),
            total_datasets: datasets.unwrap_or_else(|e| {
                warn!(error = %e, "GBIF dataset count failed");
                0
            }),
        }
    }

    /// Occurrence counts per kingdom, sorted descending. A kingdom whose
    /// fetch fails counts as zero.
    pub async fn kingdom_counts(&self) -> Vec<KingdomCount> {
        let fetches = KINGDOMS.iter().map(|&(taxon_key, name, emoji)| async move {
            let count = match self.api.occurrence_count_for_taxon(taxon_key).await {
                Ok(count) => count,
                Err(e) => {
                    warn!(kingdom = name, error = %e, "Kingdom count failed");
                    0
                }
            };
            KingdomCount {
                taxon_key,
                name: name.to_string(),
                emoji: emoji.to_string(),
                count,
            }
        });

        let mut rows: Vec<KingdomCount> = join_all(fetches).await;
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    /// Top countries by all-time occurrence count. Best-effort: a failed
    /// fetch yields an empty ranking.
    pub async fn top_countries(&self, limit: usize) -> Vec<CountryCount> {
        let counts = match self.api.occurrence_counts_by_country().await {
            Ok(counts) => counts,
            Err(e) => {
                warn!(error = %e, "GBIF country counts failed");
                return vec![];
            }
        };

        let mut rows: Vec<(String, u64)> = counts.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        rows.into_iter()
            .take(limit)
            .map(|(code, count)| CountryCount {
                name: COUNTRY_NAMES
                    .get(code.as_str())
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| title_case_country(&code)),
                flag: COUNTRY_FLAGS
                    .get(code.as_str())
                    .copied()
                    .unwrap_or("🌍")
                    .to_string(),
                code,
                count,
            })
            .collect()
    }
}

/// Map an iconic category onto the GBIF rank filter that selects it
fn higher_taxon_filter(iconic: IconicTaxon) -> HigherTaxonFilter {
    match iconic {
        IconicTaxon::Mollusca => HigherTaxonFilter::Phylum("Mollusca".to_string()),
        IconicTaxon::Plantae | IconicTaxon::Fungi | IconicTaxon::Chromista => {
            HigherTaxonFilter::Kingdom(iconic.name().to_string())
        }
        other => HigherTaxonFilter::Class(other.name().to_string()),
    }
}

/// Derive the iconic category from backbone classification: class first,
/// then kingdom. Animalia without a usable class stays uncategorized.
fn derive_iconic(class: Option<&str>, kingdom: Option<&str>) -> Option<IconicTaxon> {
    if let Some(class) = class {
        if let Some(iconic) = iconic_from_class(class) {
            return Some(iconic);
        }
    }
    kingdom.and_then(iconic_from_kingdom)
}

fn iconic_from_class(class: &str) -> Option<IconicTaxon> {
    match class.to_lowercase().as_str() {
        "aves" => Some(IconicTaxon::Aves),
        "mammalia" => Some(IconicTaxon::Mammalia),
        "reptilia" => Some(IconicTaxon::Reptilia),
        "amphibia" => Some(IconicTaxon::Amphibia),
        "insecta" => Some(IconicTaxon::Insecta),
        "arachnida" => Some(IconicTaxon::Arachnida),
        // GBIF uses both spellings for ray-finned fishes
        "actinopterygii" | "actinopteri" => Some(IconicTaxon::Actinopterygii),
        "mollusca" => Some(IconicTaxon::Mollusca),
        _ => None,
    }
}

fn iconic_from_kingdom(kingdom: &str) -> Option<IconicTaxon> {
    match kingdom.to_lowercase().as_str() {
        "plantae" => Some(IconicTaxon::Plantae),
        "fungi" => Some(IconicTaxon::Fungi),
        "chromista" => Some(IconicTaxon::Chromista),
        _ => None,
    }
}

/// "COSTA_RICA" -> "Costa Rica", for countries outside the fixed name table
fn title_case_country(code: &str) -> String {
    code.split('_')
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Map one occurrence to the shared record.
///
/// The research grade here is an approximation: GBIF has no equivalent of a
/// community-vetted grade, so a clean-coordinates, species-rank record is
/// treated as research and everything else as casual.
fn normalize(occ: Occurrence) -> Observation {
    let scientific_name = occ
        .species
        .or(occ.genus)
        .or(occ.family)
        .unwrap_or_else(|| "Unknown".to_string());

    let iconic = derive_iconic(occ.class.as_deref(), occ.kingdom.as_deref());

    let is_research = occ.has_geospatial_issues == Some(false)
        && occ.taxon_rank.as_deref() == Some("SPECIES");

    let photos: Vec<String> = occ
        .media
        .into_iter()
        .filter(|m| m.r#type.as_deref() == Some("StillImage"))
        .filter_map(|m| m.identifier)
        .take(MAX_PHOTOS)
        .collect();

    let place_parts: Vec<String> = [occ.locality, occ.state_province, occ.country]
        .into_iter()
        .flatten()
        .collect();
    let place_guess = if place_parts.is_empty() {
        None
    } else {
        Some(place_parts.join(", "))
    };

    let location = match (occ.decimal_longitude, occ.decimal_latitude) {
        (Some(longitude), Some(latitude)) => Some(GeoPoint { longitude, latitude }),
        _ => None,
    };

    let display_name = occ
        .recorded_by
        .or(occ.institution_code)
        .or(occ.dataset_name)
        .unwrap_or_else(|| FALLBACK_OBSERVER.to_string());

    Observation {
        id: occ.key.to_string(),
        source: wildnear_core::Source::Gbif,
        taxon: ObservedTaxon {
            scientific_name,
            common_name: occ.vernacular_name,
            iconic,
            rank: occ.taxon_rank.map(|r| r.to_lowercase()),
            wikipedia_url: None,
            source_taxon_id: occ.taxon_key.map(|k| k.to_string()),
        },
        photos,
        observed_on: occ
            .event_date
            .as_deref()
            .and_then(|d| d.split('T').next())
            .and_then(|d| chrono::NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        quality_grade: if is_research {
            QualityGrade::Research
        } else {
            QualityGrade::Casual
        },
        place_guess,
        location,
        observer: Observer {
            display_name,
            avatar_url: None,
        },
        individual_count: None,
    }
}

/// Map one suggestion to the shared autocomplete row
fn suggestion_from(s: GbifSuggestion) -> TaxonSuggestion {
    let scientific = s
        .canonical_name
        .clone()
        .or(s.scientific_name.clone())
        .unwrap_or_else(|| "Unknown".to_string());
    TaxonSuggestion {
        selection: SpeciesSelection::GbifTaxon(s.key),
        name: s
            .vernacular_name
            .or(s.canonical_name)
            .or(s.scientific_name)
            .unwrap_or_else(|| scientific.clone()),
        scientific_name: scientific,
        rank: s.rank.map(|r| r.to_lowercase()),
        iconic: derive_iconic(s.class.as_deref(), s.kingdom.as_deref()),
        photo_url: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire_occ(json: &str) -> Occurrence {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_quality_grade_research_requires_both_conditions() {
        let research = wire_occ(
            r#"{"key": 1, "hasGeospatialIssues": false, "taxonRank": "SPECIES"}"#,
        );
        assert_eq!(normalize(research).quality_grade, QualityGrade::Research);

        let with_issues = wire_occ(
            r#"{"key": 2, "hasGeospatialIssues": true, "taxonRank": "SPECIES"}"#,
        );
        assert_eq!(normalize(with_issues).quality_grade, QualityGrade::Casual);

        let genus_rank = wire_occ(
            r#"{"key": 3, "hasGeospatialIssues": false, "taxonRank": "GENUS"}"#,
        );
        assert_eq!(normalize(genus_rank).quality_grade, QualityGrade::Casual);

        let unknown = wire_occ(r#"{"key": 4}"#);
        assert_eq!(normalize(unknown).quality_grade, QualityGrade::Casual);
    }

    #[test]
    fn test_derive_iconic_class_beats_kingdom() {
        assert_eq!(
            derive_iconic(Some("Aves"), Some("Animalia")),
            Some(IconicTaxon::Aves)
        );
        assert_eq!(
            derive_iconic(Some("Actinopteri"), Some("Animalia")),
            Some(IconicTaxon::Actinopterygii)
        );
        // Animalia without a mapped class stays uncategorized
        assert_eq!(derive_iconic(Some("Clitellata"), Some("Animalia")), None);
        assert_eq!(derive_iconic(None, Some("Animalia")), None);
        // Non-animal kingdoms map directly
        assert_eq!(derive_iconic(None, Some("Plantae")), Some(IconicTaxon::Plantae));
        assert_eq!(derive_iconic(None, None), None);
    }

    #[test]
    fn test_higher_taxon_filter_mapping() {
        assert_eq!(
            higher_taxon_filter(IconicTaxon::Mollusca),
            HigherTaxonFilter::Phylum("Mollusca".to_string())
        );
        assert_eq!(
            higher_taxon_filter(IconicTaxon::Fungi),
            HigherTaxonFilter::Kingdom("Fungi".to_string())
        );
        assert_eq!(
            higher_taxon_filter(IconicTaxon::Aves),
            HigherTaxonFilter::Class("Aves".to_string())
        );
    }

    #[test]
    fn test_normalize_photo_filter_and_cap() {
        let occ = wire_occ(
            r#"{"key": 1, "media": [
                {"type": "StillImage", "identifier": "https://img/1.jpg"},
                {"type": "Sound", "identifier": "https://snd/1.mp3"},
                {"type": "StillImage"},
                {"type": "StillImage", "identifier": "https://img/2.jpg"},
                {"type": "StillImage", "identifier": "https://img/3.jpg"},
                {"type": "StillImage", "identifier": "https://img/4.jpg"}
            ]}"#,
        );
        assert_eq!(
            normalize(occ).photos,
            vec!["https://img/1.jpg", "https://img/2.jpg", "https://img/3.jpg"]
        );
    }

    #[test]
    fn test_normalize_observer_fallback_chain() {
        let recorded = wire_occ(r#"{"key": 1, "recordedBy": "A. Naturalist", "institutionCode": "NHM"}"#);
        assert_eq!(normalize(recorded).observer.display_name, "A. Naturalist");

        let institution = wire_occ(r#"{"key": 2, "institutionCode": "NHM", "datasetName": "Legacy"}"#);
        assert_eq!(normalize(institution).observer.display_name, "NHM");

        let dataset = wire_occ(r#"{"key": 3, "datasetName": "Legacy Collection"}"#);
        assert_eq!(normalize(dataset).observer.display_name, "Legacy Collection");

        let nothing = wire_occ(r#"{"key": 4}"#);
        assert_eq!(normalize(nothing).observer.display_name, FALLBACK_OBSERVER);
    }

    #[test]
    fn test_normalize_name_and_place_fallbacks() {
        let occ = wire_occ(
            r#"{"key": 1, "genus": "Quercus", "locality": "Hampstead Heath", "country": "United Kingdom"}"#,
        );
        let norm = normalize(occ);
        assert_eq!(norm.taxon.scientific_name, "Quercus");
        assert_eq!(
            norm.place_guess.as_deref(),
            Some("Hampstead Heath, United Kingdom")
        );

        let bare = normalize(wire_occ(r#"{"key": 2}"#));
        assert_eq!(bare.taxon.scientific_name, "Unknown");
        assert!(bare.place_guess.is_none());
    }

    #[test]
    fn test_normalize_event_date() {
        let occ = wire_occ(r#"{"key": 1, "eventDate": "2024-05-01T08:15:00"}"#);
        assert_eq!(
            normalize(occ).observed_on,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn test_title_case_country() {
        assert_eq!(title_case_country("COSTA_RICA"), "Costa Rica");
        assert_eq!(title_case_country("CHILE"), "Chile");
    }

    #[tokio::test]
    async fn test_dashboard_fetches_fail_independently() {
        // All three dashboard calls against a closed port: each one degrades
        // on its own (zeros / zero counts / empty ranking) and none of them
        // aborts the others.
        let source = GbifSource::new(GbifClient::with_base_url("http://127.0.0.1:1"));
        let (stats, kingdoms, countries) = tokio::join!(
            source.global_stats(),
            source.kingdom_counts(),
            source.top_countries(12),
        );
        assert_eq!(stats.total_occurrences, 0);
        assert_eq!(kingdoms.len(), KINGDOMS.len());
        assert!(kingdoms.iter().all(|k| k.count == 0));
        assert!(countries.is_empty());
    }
}
