//! iNaturalist source adapter
//!
//! iNaturalist's observation shape is the closest of the three sources to the
//! normalized record, so the mapping is essentially 1:1.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use futures::future::join_all;
use tracing::warn;

use inat_api::{
    InatClient, InatObservation, InatTaxon, ObservationCountRequest, ObservationsRequest,
    SpeciesCountsRequest,
};
use wildnear_core::{
    GeoPoint, IconicTaxon, Observation, ObservedTaxon, Observer, QualityGrade, SearchOutcome,
    SearchQuery, SpeciesSelection, TaxonSuggestion,
};

use crate::error::Result;
use crate::types::{CountryCount, InatGlobalCounts, SpeciesTally};

/// Observer shown when the API returns no user on a record
const FALLBACK_OBSERVER: &str = "iNaturalist observer";

/// How many autocomplete rows to surface
const SUGGESTION_LIMIT: u32 = 8;

/// Countries ranked on the dashboard, with their iNaturalist place ids
struct CountryPlace {
    place_id: u64,
    code: &'static str,
    name: &'static str,
    flag: &'static str,
}

const COUNTRY_PLACES: [CountryPlace; 12] = [
    CountryPlace { place_id: 1, code: "US", name: "United States", flag: "🇺🇸" },
    CountryPlace { place_id: 6712, code: "CA", name: "Canada", flag: "🇨🇦" },
    CountryPlace { place_id: 6793, code: "MX", name: "Mexico", flag: "🇲🇽" },
    CountryPlace { place_id: 6744, code: "AU", name: "Australia", flag: "🇦🇺" },
    CountryPlace { place_id: 6803, code: "NZ", name: "New Zealand", flag: "🇳🇿" },
    CountryPlace { place_id: 6857, code: "GB", name: "United Kingdom", flag: "🇬🇧" },
    CountryPlace { place_id: 7207, code: "DE", name: "Germany", flag: "🇩🇪" },
    CountryPlace { place_id: 6753, code: "FR", name: "France", flag: "🇫🇷" },
    CountryPlace { place_id: 6774, code: "ES", name: "Spain", flag: "🇪🇸" },
    CountryPlace { place_id: 6828, code: "BR", name: "Brazil", flag: "🇧🇷" },
    CountryPlace { place_id: 6986, code: "ZA", name: "South Africa", flag: "🇿🇦" },
    CountryPlace { place_id: 6681, code: "IN", name: "India", flag: "🇮🇳" },
];

/// Adapter for the iNaturalist observations API
pub struct InatSource {
    api: Arc<InatClient>,
}

impl InatSource {
    pub fn new(api: Arc<InatClient>) -> Self {
        Self { api }
    }

    /// Search observations around the query center, newest first. The radius
    /// passes through unclamped; iNaturalist accepts everything the controls
    /// offer.
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let now = Utc::now();
        let mut req = ObservationsRequest::near(
            query.center.latitude,
            query.center.longitude,
            query.radius_km as f64,
        );
        req.per_page = query.limit;
        req.d1 = query.time_window.start_date(now);
        req.d2 = query.time_window.end_date(now);
        req.taxon_id = match &query.species {
            Some(SpeciesSelection::InatTaxon(id)) => Some(*id),
            _ => None,
        };

        let page = self.api.observations(&req).await?;
        Ok(SearchOutcome {
            total_results: page.total_results,
            observations: page.results.into_iter().map(normalize).collect(),
        })
    }

    /// Autocomplete species by name fragment, up to 8 candidates
    pub async fn suggest_species(&self, query: &str) -> Result<Vec<TaxonSuggestion>> {
        let taxa = self.api.taxa_autocomplete(query, SUGGESTION_LIMIT).await?;
        Ok(taxa.into_iter().map(suggestion_from).collect())
    }

    /// Headline totals for the dashboard. Best-effort: any failing count
    /// renders as zero rather than taking the widget down.
    pub async fn global_counts(&self) -> InatGlobalCounts {
        let research_req = ObservationCountRequest {
            quality_grade: Some("research".to_string()),
            ..Default::default()
        };
        let total_req = ObservationCountRequest::default();
        let species_req = SpeciesCountsRequest::global(0);
        let (total, species, research) = tokio::join!(
            self.api.observations_count(&total_req),
            self.api.species_counts(&species_req),
            self.api.observations_count(&research_req),
        );

        InatGlobalCounts {
            total_observations: total.unwrap_or_else(|e| {
                warn!(error = %e, "iNaturalist total count failed");
                0
            }),
            total_species: species.map(|r| r.total_results).unwrap_or_else(|e| {
                warn!(error = %e, "iNaturalist species count failed");
                0
            }),
            research_grade: research.unwrap_or_else(|e| {
                warn!(error = %e, "iNaturalist research-grade count failed");
                0
            }),
        }
    }

    /// Most-observed species, globally, optionally bounded to a date range
    pub async fn top_species(
        &self,
        limit: u32,
        d1: Option<NaiveDate>,
        d2: Option<NaiveDate>,
    ) -> Result<Vec<SpeciesTally>> {
        let req = SpeciesCountsRequest::global(limit).with_dates(d1, d2);
        let page = self.api.species_counts(&req).await?;
        Ok(page
            .results
            .into_iter()
            .map(|row| SpeciesTally {
                count: row.count,
                taxon: suggestion_from(row.taxon),
            })
            .collect())
    }

    /// Observation counts for the tracked countries, sorted descending.
    ///
    /// One count query per place, issued as a single parallel batch. A place
    /// whose fetch fails is dropped from the ranking; the rest still rank.
    pub async fn top_countries(
        &self,
        d1: Option<NaiveDate>,
        d2: Option<NaiveDate>,
    ) -> Vec<CountryCount> {
        let fetches = COUNTRY_PLACES.iter().map(|place| async move {
            let req = ObservationCountRequest {
                place_id: Some(place.place_id),
                d1,
                d2,
                ..Default::default()
            };
            match self.api.observations_count(&req).await {
                Ok(count) => Some(CountryCount {
                    code: place.code.to_string(),
                    name: place.name.to_string(),
                    flag: place.flag.to_string(),
                    count,
                }),
                Err(e) => {
                    warn!(place = place.code, error = %e, "Country count failed");
                    None
                }
            }
        });

        let mut rows: Vec<CountryCount> = join_all(fetches).await.into_iter().flatten().collect();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }
}

/// Map one wire observation to the shared record
fn normalize(obs: InatObservation) -> Observation {
    let taxon = match obs.taxon {
        Some(t) => ObservedTaxon {
            scientific_name: t.name.unwrap_or_else(|| "Unknown".to_string()),
            common_name: t.preferred_common_name,
            iconic: t.iconic_taxon_name.as_deref().and_then(IconicTaxon::from_name),
            rank: t.rank,
            wikipedia_url: t.wikipedia_url,
            source_taxon_id: Some(t.id.to_string()),
        },
        None => ObservedTaxon {
            scientific_name: "Unknown".to_string(),
            common_name: None,
            iconic: None,
            rank: None,
            wikipedia_url: None,
            source_taxon_id: None,
        },
    };

    let location = obs.geojson.as_ref().and_then(|point| {
        Some(GeoPoint {
            longitude: point.longitude()?,
            latitude: point.latitude()?,
        })
    });

    let observer = match obs.user {
        Some(user) => Observer {
            display_name: user
                .name
                .filter(|n| !n.is_empty())
                .or(user.login)
                .unwrap_or_else(|| FALLBACK_OBSERVER.to_string()),
            avatar_url: user.icon_url,
        },
        None => Observer {
            display_name: FALLBACK_OBSERVER.to_string(),
            avatar_url: None,
        },
    };

    Observation {
        id: obs.id.to_string(),
        source: wildnear_core::Source::INaturalist,
        taxon,
        photos: obs.photos.into_iter().filter_map(|p| p.url).collect(),
        observed_on: obs
            .observed_on
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        quality_grade: QualityGrade::from_wire(obs.quality_grade.as_deref().unwrap_or("")),
        place_guess: obs.place_guess,
        location,
        observer,
        individual_count: None,
    }
}

/// Map one wire taxon to the shared autocomplete row
fn suggestion_from(taxon: InatTaxon) -> TaxonSuggestion {
    let scientific = taxon.name.unwrap_or_else(|| "Unknown".to_string());
    TaxonSuggestion {
        selection: SpeciesSelection::InatTaxon(taxon.id),
        name: taxon
            .preferred_common_name
            .clone()
            .unwrap_or_else(|| scientific.clone()),
        scientific_name: scientific,
        rank: taxon.rank,
        iconic: taxon
            .iconic_taxon_name
            .as_deref()
            .and_then(IconicTaxon::from_name),
        photo_url: taxon.default_photo.and_then(|p| p.square_url),
    }
}
