//! eBird source adapter
//!
//! eBird's recent-observations feed is bird-only, day-granular, and carries
//! no photos and no observer identity, so this adapter does the most work of
//! the three: it resolves photos through a secondary species-level lookup
//! against iNaturalist, keeps the full species taxonomy cached for
//! autocomplete, and fills the gaps in the normalized record with fixed
//! placeholders.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::join_all;
use moka::future::Cache;
use tokio::sync::OnceCell;
use tracing::warn;

use ebird_api::{EbirdClient, RecentObservation, RecentObservationsRequest, TaxonomyEntry};
use inat_api::InatClient;
use wildnear_core::{
    GeoPoint, IconicTaxon, Observation, ObservedTaxon, Observer, QualityGrade, SearchOutcome,
    SearchQuery, SpeciesSelection, TaxonSuggestion,
};

use crate::error::Result;
use crate::types::{EbirdRegionalStats, RegionStatsRow};

/// eBird has no per-observation observer identity
const FALLBACK_OBSERVER: &str = "eBird Observer";

const FALLBACK_PLACE: &str = "Unknown location";

/// How many autocomplete rows to surface
const SUGGESTION_LIMIT: usize = 8;

/// Regions tracked on the daily stats dashboard
struct TrackedRegion {
    code: &'static str,
    name: &'static str,
    flag: &'static str,
}

const TRACKED_REGIONS: [TrackedRegion; 12] = [
    TrackedRegion { code: "US", name: "United States", flag: "🇺🇸" },
    TrackedRegion { code: "CA", name: "Canada", flag: "🇨🇦" },
    TrackedRegion { code: "GB", name: "United Kingdom", flag: "🇬🇧" },
    TrackedRegion { code: "AU", name: "Australia", flag: "🇦🇺" },
    TrackedRegion { code: "IN", name: "India", flag: "🇮🇳" },
    TrackedRegion { code: "BR", name: "Brazil", flag: "🇧🇷" },
    TrackedRegion { code: "MX", name: "Mexico", flag: "🇲🇽" },
    TrackedRegion { code: "CO", name: "Colombia", flag: "🇨🇴" },
    TrackedRegion { code: "CR", name: "Costa Rica", flag: "🇨🇷" },
    TrackedRegion { code: "ZA", name: "South Africa", flag: "🇿🇦" },
    TrackedRegion { code: "ES", name: "Spain", flag: "🇪🇸" },
    TrackedRegion { code: "DE", name: "Germany", flag: "🇩🇪" },
];

/// Adapter for the eBird recent-observations API
pub struct EbirdSource {
    api: EbirdClient,
    /// Photo lookups go through iNaturalist's taxa autocomplete
    inat: Arc<InatClient>,
    /// Species-level taxonomy, loaded once per client lifetime
    taxonomy: OnceCell<Vec<TaxonomyEntry>>,
    /// Scientific name -> photo URL. Misses are cached as `None` so a name
    /// that failed to resolve is never queried again.
    photo_cache: Cache<String, Option<String>>,
}

impl EbirdSource {
    pub fn new(api: EbirdClient, inat: Arc<InatClient>) -> Self {
        Self {
            api,
            inat,
            taxonomy: OnceCell::new(),
            photo_cache: Cache::new(10_000),
        }
    }

    /// Search recent observations around the query center.
    ///
    /// The radius is clamped to eBird's 50 km ceiling and the time window
    /// collapses to whole days; both happen in the outgoing request, not as
    /// errors. Photos are resolved per unique species before normalizing.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let mut req =
            RecentObservationsRequest::near(query.center.latitude, query.center.longitude);
        req.dist_km = query.radius_km;
        req.back_days = query.time_window.ebird_days_back();
        req.max_results = query.limit;
        req.species_code = match &query.species {
            Some(SpeciesSelection::EbirdSpecies(code)) => Some(code.clone()),
            _ => None,
        };

        let raw = self.api.recent_observations(&req).await?;

        // One photo lookup per unique species in the batch
        let mut names: Vec<String> = raw.iter().map(|obs| obs.sci_name.clone()).collect();
        names.sort();
        names.dedup();
        let photos: HashMap<String, Option<String>> = join_all(names.into_iter().map(|name| async move {
            let photo = self.photo_for(&name).await;
            (name, photo)
        }))
        .await
        .into_iter()
        .collect();

        let observations: Vec<Observation> = raw
            .into_iter()
            .map(|obs| {
                let photo = photos.get(&obs.sci_name).cloned().flatten();
                normalize(obs, photo)
            })
            .collect();

        Ok(SearchOutcome {
            total_results: observations.len() as u64,
            observations,
        })
    }

    /// Autocomplete species from the cached taxonomy: case-insensitive
    /// substring match over common name, scientific name, and species code.
    pub async fn suggest_species(&self, query: &str) -> Result<Vec<TaxonSuggestion>> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return Ok(vec![]);
        }
        let taxonomy = self.species_taxonomy().await?;
        Ok(search_taxonomy(taxonomy, &q))
    }

    /// Daily stats across the tracked regions, fetched in one parallel
    /// batch. A region whose fetch fails is silently excluded from both the
    /// ranking and the totals.
    pub async fn regional_stats(&self, date: NaiveDate) -> EbirdRegionalStats {
        let fetches = TRACKED_REGIONS.iter().map(|region| async move {
            match self.api.region_stats(region.code, date).await {
                Ok(Some(stats)) => Some(RegionStatsRow {
                    code: region.code.to_string(),
                    name: region.name.to_string(),
                    flag: region.flag.to_string(),
                    checklists: stats.num_checklists,
                    contributors: stats.num_contributors,
                    species: stats.num_species,
                }),
                Ok(None) => None,
                Err(e) => {
                    warn!(region = region.code, error = %e, "Region stats fetch failed");
                    None
                }
            }
        });

        let mut rows: Vec<RegionStatsRow> =
            join_all(fetches).await.into_iter().flatten().collect();
        rows.sort_by(|a, b| b.checklists.cmp(&a.checklists));

        EbirdRegionalStats {
            total_checklists: rows.iter().map(|r| r.checklists).sum(),
            total_contributors: rows.iter().map(|r| r.contributors).sum(),
            total_species: rows.iter().map(|r| r.species).sum(),
            regions: rows,
        }
    }

    /// The species-level taxonomy, loaded on first use and kept for the
    /// process lifetime (a few thousand entries)
    async fn species_taxonomy(&self) -> Result<&[TaxonomyEntry]> {
        let entries = self
            .taxonomy
            .get_or_try_init(|| async {
                let all = self.api.taxonomy().await?;
                Ok::<_, ebird_api::EbirdError>(species_only(all))
            })
            .await?;
        Ok(entries)
    }

    /// Resolve a photo for a species via iNaturalist, through the
    /// process-lifetime cache. Failures resolve to `None` and are cached too.
    async fn photo_for(&self, sci_name: &str) -> Option<String> {
        self.photo_cache
            .get_with(sci_name.to_string(), async {
                match self.inat.taxa_autocomplete(sci_name, 1).await {
                    Ok(taxa) => taxa
                        .into_iter()
                        .next()
                        .and_then(|t| t.default_photo)
                        .and_then(|p| p.square_url),
                    Err(e) => {
                        warn!(species = sci_name, error = %e, "Photo lookup failed");
                        None
                    }
                }
            })
            .await
    }
}

/// Keep only true species entries, excluding subspecies, hybrids, spuhs, etc.
fn species_only(entries: Vec<TaxonomyEntry>) -> Vec<TaxonomyEntry> {
    entries
        .into_iter()
        .filter(|t| t.category.as_deref() == Some("species"))
        .collect()
}

/// Substring search over an already-filtered taxonomy; `q` must be lowercase
fn search_taxonomy(taxonomy: &[TaxonomyEntry], q: &str) -> Vec<TaxonSuggestion> {
    taxonomy
        .iter()
        .filter(|t| {
            t.com_name.to_lowercase().contains(q)
                || t.sci_name.to_lowercase().contains(q)
                || t.species_code.to_lowercase().contains(q)
        })
        .take(SUGGESTION_LIMIT)
        .map(|t| TaxonSuggestion {
            selection: SpeciesSelection::EbirdSpecies(t.species_code.clone()),
            name: t.com_name.clone(),
            scientific_name: t.sci_name.clone(),
            rank: Some("species".to_string()),
            iconic: Some(IconicTaxon::Aves),
            photo_url: None,
        })
        .collect()
}

/// Map one wire observation to the shared record. The id combines the
/// checklist submission id with the species code, since every species on a
/// checklist shares the same submission id.
fn normalize(obs: RecentObservation, photo: Option<String>) -> Observation {
    let id = match (&obs.sub_id, &obs.species_code) {
        (Some(sub), Some(code)) => format!("{}:{}", sub, code),
        (Some(sub), None) => sub.clone(),
        (None, Some(code)) => code.clone(),
        (None, None) => obs.sci_name.clone(),
    };

    let location = match (obs.lat, obs.lng) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint { longitude, latitude }),
        _ => None,
    };

    Observation {
        id,
        source: wildnear_core::Source::EBird,
        taxon: ObservedTaxon {
            scientific_name: obs.sci_name,
            common_name: obs.com_name,
            iconic: Some(IconicTaxon::Aves),
            rank: Some("species".to_string()),
            wikipedia_url: None,
            source_taxon_id: obs.species_code,
        },
        photos: photo.into_iter().collect(),
        observed_on: obs
            .obs_dt
            .as_deref()
            .and_then(|dt| dt.split(' ').next())
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        quality_grade: if obs.obs_valid {
            QualityGrade::Research
        } else {
            QualityGrade::NeedsId
        },
        place_guess: Some(obs.loc_name.unwrap_or_else(|| FALLBACK_PLACE.to_string())),
        location,
        observer: Observer {
            display_name: FALLBACK_OBSERVER.to_string(),
            avatar_url: None,
        },
        individual_count: obs.how_many,
    }
}
