//! The query orchestrator
//!
//! [`SearchClient`] owns one adapter per source, the geocoding services, and
//! the request-generation tracker. It is constructed once per session; every
//! cache in the system lives on it, so tests get a fresh, empty world from
//! `SearchClient::new`.

use std::sync::Arc;

use ebird_api::EbirdClient;
use gbif_api::GbifClient;
use inat_api::InatClient;
use wildnear_core::{SearchOutcome, SearchQuery, Source, TaxonSuggestion};
use wildnear_geocoding::{PlaceCandidate, PlaceSearch, ReverseGeocoder};

use crate::ebird::EbirdSource;
use crate::error::{Result, SearchError};
use crate::gbif::GbifSource;
use crate::generation::{RequestToken, RequestTracker};
use crate::inat::InatSource;

/// API credentials for the keyed services. iNaturalist, GBIF, and Nominatim
/// are keyless.
#[derive(Debug, Clone, Default)]
pub struct SearchConfig {
    /// eBird API key; without one the eBird source is unavailable
    pub ebird_api_key: Option<String>,
    /// Mapbox access token; without one place search returns no candidates
    pub mapbox_access_token: Option<String>,
}

impl SearchConfig {
    /// Read credentials from `EBIRD_API_TOKEN` and `MAPBOX_ACCESS_TOKEN`
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            ebird_api_key: read(EbirdClient::API_KEY_ENV),
            mapbox_access_token: read(PlaceSearch::TOKEN_ENV),
        }
    }
}

/// Session-scoped client across all sources
pub struct SearchClient {
    inat: InatSource,
    ebird: Option<EbirdSource>,
    gbif: GbifSource,
    geocoder: ReverseGeocoder,
    places: PlaceSearch,
    tracker: RequestTracker,
}

impl SearchClient {
    pub fn new(config: SearchConfig) -> Self {
        // The iNaturalist HTTP client is shared: the eBird adapter resolves
        // its photos through the same taxa endpoint the iNaturalist adapter
        // uses for autocomplete.
        let inat_api = Arc::new(InatClient::new());

        let ebird = config
            .ebird_api_key
            .map(|key| EbirdSource::new(EbirdClient::new(key), Arc::clone(&inat_api)));

        let places = match config.mapbox_access_token {
            Some(token) => PlaceSearch::new(token),
            None => PlaceSearch::disabled(),
        };

        Self {
            inat: InatSource::new(inat_api),
            ebird,
            gbif: GbifSource::new(GbifClient::new()),
            geocoder: ReverseGeocoder::new(),
            places,
            tracker: RequestTracker::new(),
        }
    }

    /// Run one search against the active source. Adapter failures propagate;
    /// the caller is expected to clear its result set and show the message.
    pub async fn search(&self, source: Source, query: &SearchQuery) -> Result<SearchOutcome> {
        match source {
            Source::INaturalist => self.inat.search(query).await,
            Source::EBird => self.ebird()?.search(query).await,
            Source::Gbif => self.gbif.search(query).await,
        }
    }

    /// Run one search stamped against the request tracker. Returns `Ok(None)`
    /// when a newer search began before this one resolved; the stale outcome
    /// is discarded so the visible result set always belongs to the latest
    /// query, regardless of network completion order.
    pub async fn search_latest(
        &self,
        source: Source,
        query: &SearchQuery,
    ) -> Result<Option<SearchOutcome>> {
        let token = self.tracker.begin();
        let outcome = self.search(source, query).await?;
        if token.is_current() {
            Ok(Some(outcome))
        } else {
            Ok(None)
        }
    }

    /// Species autocomplete against the active source
    pub async fn suggest_species(
        &self,
        source: Source,
        query: &str,
    ) -> Result<Vec<TaxonSuggestion>> {
        match source {
            Source::INaturalist => self.inat.suggest_species(query).await,
            Source::EBird => self.ebird()?.suggest_species(query).await,
            Source::Gbif => self.gbif.suggest_species(query).await,
        }
    }

    /// Human-readable label for a point. Never fails; an unresolvable point
    /// comes back as its coordinates at 4 decimal places.
    pub async fn place_label(&self, latitude: f64, longitude: f64) -> String {
        self.geocoder.place_label_or_coords(latitude, longitude).await
    }

    /// Candidate places for a location search box query
    pub async fn search_places(
        &self,
        query: &str,
    ) -> std::result::Result<Vec<PlaceCandidate>, wildnear_geocoding::GeocodingError> {
        self.places.search(query).await
    }

    /// Begin a request generation for a consumer-managed load (debounced
    /// species or location lookups guard themselves with this)
    pub fn begin_request(&self) -> RequestToken {
        self.tracker.begin()
    }

    /// The iNaturalist adapter, for its dashboard aggregates
    pub fn inat(&self) -> &InatSource {
        &self.inat
    }

    /// The eBird adapter, when an API key was configured
    pub fn ebird(&self) -> Result<&EbirdSource> {
        self.ebird
            .as_ref()
            .ok_or(SearchError::Ebird(ebird_api::EbirdError::MissingApiKey))
    }

    /// The GBIF adapter, for its dashboard aggregates
    pub fn gbif(&self) -> &GbifSource {
        &self.gbif
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wildnear_core::{GeoPoint, TimeWindow};

    fn query() -> SearchQuery {
        SearchQuery::new(
            GeoPoint { longitude: -71.06, latitude: 42.36 },
            10,
            TimeWindow::Day,
            50,
        )
    }

    #[test]
    fn test_config_default_has_no_keys() {
        let config = SearchConfig::default();
        assert!(config.ebird_api_key.is_none());
        assert!(config.mapbox_access_token.is_none());
    }

    #[tokio::test]
    async fn test_ebird_unavailable_without_key() {
        let client = SearchClient::new(SearchConfig::default());
        let err = client.search(Source::EBird, &query()).await.unwrap_err();
        assert!(matches!(
            err,
            SearchError::Ebird(ebird_api::EbirdError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_place_search_disabled_without_token() {
        let client = SearchClient::new(SearchConfig::default());
        let candidates = client.search_places("Amsterdam").await.unwrap();
        assert!(candidates.is_empty());
    }

    #[test]
    fn test_begin_request_supersedes_previous() {
        let client = SearchClient::new(SearchConfig::default());
        let first = client.begin_request();
        let second = client.begin_request();
        assert!(!first.is_current());
        assert!(second.is_current());
    }
}
