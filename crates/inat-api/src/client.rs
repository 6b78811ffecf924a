//! iNaturalist API HTTP client

use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{InatError, Result};
use crate::types::*;

/// Parameters for a geo-bounded observation search
#[derive(Debug, Clone)]
pub struct ObservationsRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in kilometers, passed through to the API unclamped
    pub radius_km: f64,
    /// Start of the date range; when set, `d2` defaults to today server-side
    pub d1: Option<NaiveDate>,
    pub d2: Option<NaiveDate>,
    /// Page size; the API caps this at 200
    pub per_page: u32,
    pub taxon_id: Option<u64>,
    /// Quality grade filter; `any` requests both provisional and vetted
    /// records
    pub quality_grade: String,
}

impl ObservationsRequest {
    pub fn near(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self {
            latitude,
            longitude,
            radius_km,
            d1: None,
            d2: None,
            per_page: 50,
            taxon_id: None,
            quality_grade: "any".to_string(),
        }
    }
}

/// Parameters for a count-only observation query (`per_page=0`)
#[derive(Debug, Clone, Default)]
pub struct ObservationCountRequest {
    /// iNaturalist place id to scope the count to
    pub place_id: Option<u64>,
    pub quality_grade: Option<String>,
    pub d1: Option<NaiveDate>,
    pub d2: Option<NaiveDate>,
}

/// Parameters for `GET /observations/species_counts`
#[derive(Debug, Clone)]
pub struct SpeciesCountsRequest {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius_km: Option<f64>,
    pub d1: Option<NaiveDate>,
    pub d2: Option<NaiveDate>,
    pub per_page: u32,
}

impl SpeciesCountsRequest {
    /// Global species counts, no geographic bound
    pub fn global(per_page: u32) -> Self {
        Self {
            latitude: None,
            longitude: None,
            radius_km: None,
            d1: None,
            d2: None,
            per_page,
        }
    }

    pub fn near(latitude: f64, longitude: f64, radius_km: f64, per_page: u32) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            radius_km: Some(radius_km),
            d1: None,
            d2: None,
            per_page,
        }
    }

    pub fn with_dates(mut self, d1: Option<NaiveDate>, d2: Option<NaiveDate>) -> Self {
        self.d1 = d1;
        self.d2 = d2;
        self
    }
}

/// Client for the iNaturalist API v1. Keyless; all endpoints are public.
pub struct InatClient {
    http: reqwest::Client,
    base_url: String,
}

impl InatClient {
    /// Base URL for iNaturalist API v1
    pub const BASE_URL: &'static str = "https://api.inaturalist.org/v1";

    /// Observation page size ceiling enforced by the API
    pub const MAX_PER_PAGE: u32 = 200;

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

    /// Search observations around a point, newest first.
    ///
    /// Returns the server-side total plus one page of results. Non-success
    /// statuses are errors; a zero-result page is not.
    pub async fn observations(&self, req: &ObservationsRequest) -> Result<ObservationsResponse> {
        let mut url = format!(
            "{}/observations?lat={}&lng={}&radius={}&per_page={}&order=desc&order_by=created_at&quality_grade={}",
            self.base_url,
            req.latitude,
            req.longitude,
            req.radius_km,
            req.per_page.min(Self::MAX_PER_PAGE),
            urlencoding::encode(&req.quality_grade),
        );
        if let Some(taxon_id) = req.taxon_id {
            url.push_str(&format!("&taxon_id={}", taxon_id));
        }
        push_date_range(&mut url, req.d1, req.d2);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(InatError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Count observations matching a filter, without fetching any records
    pub async fn observations_count(&self, req: &ObservationCountRequest) -> Result<u64> {
        let mut url = format!("{}/observations?per_page=0", self.base_url);
        if let Some(place_id) = req.place_id {
            url.push_str(&format!("&place_id={}", place_id));
        }
        if let Some(ref grade) = req.quality_grade {
            url.push_str(&format!("&quality_grade={}", urlencoding::encode(grade)));
        }
        push_date_range(&mut url, req.d1, req.d2);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(InatError::Status(response.status()));
        }
        let page: ObservationsResponse = response.json().await?;
        Ok(page.total_results)
    }

    /// Distinct species observed, with per-species counts ordered descending
    pub async fn species_counts(&self, req: &SpeciesCountsRequest) -> Result<SpeciesCountsResponse> {
        let mut url = format!(
            "{}/observations/species_counts?per_page={}&quality_grade=any",
            self.base_url, req.per_page
        );
        if let (Some(lat), Some(lng), Some(radius)) = (req.latitude, req.longitude, req.radius_km) {
            url.push_str(&format!("&lat={}&lng={}&radius={}", lat, lng, radius));
        }
        push_date_range(&mut url, req.d1, req.d2);

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(InatError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Autocomplete taxa by name fragment.
    ///
    /// Best-effort: a non-success status yields an empty list rather than an
    /// error, since autocomplete callers have nothing useful to do with a
    /// failure.
    pub async fn taxa_autocomplete(&self, query: &str, per_page: u32) -> Result<Vec<InatTaxon>> {
        if query.trim().is_empty() {
            return Ok(vec![]);
        }
        let url = format!(
            "{}/taxa/autocomplete?q={}&per_page={}",
            self.base_url,
            urlencoding::encode(query.trim()),
            per_page
        );

        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Ok(vec![]);
        }
        let data: AutocompleteResponse = response.json().await?;
        Ok(data.results)
    }
}

impl Default for InatClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Append `d1`/`d2` query params. When only `d1` is known the end of the
/// range is left to the caller; the search layer always pairs them.
fn push_date_range(url: &mut String, d1: Option<NaiveDate>, d2: Option<NaiveDate>) {
    if let Some(d1) = d1 {
        url.push_str(&format!("&d1={}", d1));
        if let Some(d2) = d2 {
            url.push_str(&format!("&d2={}", d2));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observations_request_defaults() {
        let req = ObservationsRequest::near(52.37, 4.9, 5.0);
        assert_eq!(req.per_page, 50);
        assert_eq!(req.quality_grade, "any");
        assert!(req.taxon_id.is_none());
    }

    #[test]
    fn test_push_date_range_requires_start() {
        let mut url = String::from("x");
        push_date_range(&mut url, None, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(url, "x");

        push_date_range(
            &mut url,
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 2),
        );
        assert_eq!(url, "x&d1=2024-01-01&d2=2024-01-02");
    }
}
