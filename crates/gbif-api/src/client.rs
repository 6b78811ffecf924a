//! GBIF API HTTP client

use std::collections::HashMap;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{GbifError, Result};
use crate::types::*;

/// A single higher-taxon filter pair for occurrence search. GBIF filters by
/// explicit rank parameters rather than one generic taxon name field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HigherTaxonFilter {
    Class(String),
    Phylum(String),
    Kingdom(String),
}

impl HigherTaxonFilter {
    fn param(&self) -> (&'static str, &str) {
        match self {
            Self::Class(v) => ("class", v),
            Self::Phylum(v) => ("phylum", v),
            Self::Kingdom(v) => ("kingdom", v),
        }
    }
}

/// Parameters for `GET /occurrence/search`
#[derive(Debug, Clone)]
pub struct OccurrenceSearchRequest {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
    /// Inclusive event-date range, sent as `eventDate=start,end`
    pub event_date: Option<(NaiveDate, NaiveDate)>,
    pub taxon_key: Option<u64>,
    pub higher_taxon: Option<HigherTaxonFilter>,
    /// Page size; the API caps this at 300
    pub limit: u32,
    pub offset: u32,
}

impl OccurrenceSearchRequest {
    pub fn in_bounds(
        min_latitude: f64,
        max_latitude: f64,
        min_longitude: f64,
        max_longitude: f64,
    ) -> Self {
        Self {
            min_latitude,
            max_latitude,
            min_longitude,
            max_longitude,
            event_date: None,
            taxon_key: None,
            higher_taxon: None,
            limit: 50,
            offset: 0,
        }
    }

    fn query_string(&self) -> String {
        let mut qs = format!(
            "hasCoordinate=true&occurrenceStatus=PRESENT&decimalLatitude={:.6},{:.6}&decimalLongitude={:.6},{:.6}&limit={}&offset={}",
            self.min_latitude,
            self.max_latitude,
            self.min_longitude,
            self.max_longitude,
            self.limit.min(GbifClient::MAX_LIMIT),
            self.offset,
        );
        if let Some((start, end)) = self.event_date {
            qs.push_str(&format!("&eventDate={},{}", start, end));
        }
        if let Some(taxon_key) = self.taxon_key {
            qs.push_str(&format!("&taxonKey={}", taxon_key));
        }
        if let Some(ref filter) = self.higher_taxon {
            let (key, value) = filter.param();
            qs.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        qs
    }
}

/// Client for the GBIF API v1. Keyless; read endpoints are public.
pub struct GbifClient {
    http: reqwest::Client,
    base_url: String,
}

impl GbifClient {
    /// Base URL for GBIF API v1
    pub const BASE_URL: &'static str = "https://api.gbif.org/v1";

    /// Occurrence page size ceiling enforced by the API
    pub const MAX_LIMIT: u32 = 300;

    /// Create a new client with default settings (30 second timeout)
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create a new client with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: Self::BASE_URL.to_string(),
        }
    }

    /// Create a client against a custom base URL (tests, proxies)
    pub fn with_base_url(base_url: &str) -> Self {
        let mut client = Self::new();
        client.base_url = base_url.trim_end_matches('/').to_string();
        client
    }

    /// Search occurrence records within a bounding box
    pub async fn occurrence_search(
        &self,
        req: &OccurrenceSearchRequest,
    ) -> Result<OccurrenceSearchResponse> {
        let url = format!("{}/occurrence/search?{}", self.base_url, req.query_string());

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Global occurrence total. The endpoint returns a bare integer body.
    pub async fn occurrence_count(&self) -> Result<u64> {
        let url = format!("{}/occurrence/count", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Count occurrences for a single backbone taxon
    pub async fn occurrence_count_for_taxon(&self, taxon_key: u64) -> Result<u64> {
        let url = format!(
            "{}/occurrence/search?limit=0&taxonKey={}",
            self.base_url, taxon_key
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        let page: OccurrenceSearchResponse = response.json().await?;
        Ok(page.count)
    }

    /// Per-country occurrence totals, keyed by GBIF's upper-snake country
    /// enumeration names ("UNITED_STATES", ...)
    pub async fn occurrence_counts_by_country(&self) -> Result<HashMap<String, u64>> {
        let url = format!("{}/occurrence/counts/countries", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Count backbone name usages matching a rank and status, without
    /// fetching any of them
    pub async fn species_search_count(&self, rank: &str, status: &str) -> Result<u64> {
        let url = format!(
            "{}/species/search?limit=0&rank={}&status={}",
            self.base_url,
            urlencoding::encode(rank),
            urlencoding::encode(status),
        );
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        let data: CountOnlyResponse = response.json().await?;
        Ok(data.count)
    }

    /// Count registered datasets
    pub async fn dataset_search_count(&self) -> Result<u64> {
        let url = format!("{}/dataset/search?limit=0", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(GbifError::Status(response.status()));
        }
        let data: CountOnlyResponse = response.json().await?;
        Ok(data.count)
    }

    /// Autocomplete species by name fragment.
    ///
    /// Best-effort: a non-success status yields an empty list.
    pub async fn species_suggest(&self, query: &str, limit: u32) -> Result<Vec<GbifSuggestion>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let url = format!(
            "{}/species/suggest?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query.trim()),
            limit
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(vec![]);
        }
        Ok(response.json().await?)
    }
}

impl Default for GbifClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_string_always_requires_coordinates() {
        let req = OccurrenceSearchRequest::in_bounds(37.6, 37.9, -122.6, -122.3);
        let qs = req.query_string();
        assert!(qs.contains("hasCoordinate=true"));
        assert!(qs.contains("occurrenceStatus=PRESENT"));
        assert!(qs.contains("decimalLatitude=37.600000,37.900000"));
        assert!(qs.contains("decimalLongitude=-122.600000,-122.300000"));
    }

    #[test]
    fn test_query_string_clamps_limit() {
        let mut req = OccurrenceSearchRequest::in_bounds(0.0, 1.0, 0.0, 1.0);
        req.limit = 500;
        assert!(req.query_string().contains("limit=300"));
    }

    #[test]
    fn test_query_string_event_date_range() {
        let mut req = OccurrenceSearchRequest::in_bounds(0.0, 1.0, 0.0, 1.0);
        req.event_date = Some((
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        ));
        assert!(req.query_string().contains("&eventDate=2024-04-01,2024-05-01"));
    }

    #[test]
    fn test_query_string_higher_taxon_filter() {
        let mut req = OccurrenceSearchRequest::in_bounds(0.0, 1.0, 0.0, 1.0);
        req.higher_taxon = Some(HigherTaxonFilter::Phylum("Mollusca".to_string()));
        assert!(req.query_string().contains("&phylum=Mollusca"));
    }
}
