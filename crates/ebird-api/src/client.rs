//! eBird API HTTP client

use std::time::Duration;

use chrono::{Datelike, NaiveDate};

use crate::error::{EbirdError, Result};
use crate::types::*;

/// Parameters for `GET /data/obs/geo/recent`
#[derive(Debug, Clone)]
pub struct RecentObservationsRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in kilometers; the API rejects anything above 50, so
    /// larger values are clamped, not refused
    pub dist_km: u32,
    /// How many days back to look (1..=30)
    pub back_days: u32,
    /// Result cap; the API allows at most 10,000
    pub max_results: u32,
    /// Restrict to one species by its eBird code
    pub species_code: Option<String>,
}

impl RecentObservationsRequest {
    pub fn near(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            dist_km: 25,
            back_days: 14,
            max_results: 200,
            species_code: None,
        }
    }

    /// Query string with the documented server-side limits applied
    fn query_string(&self) -> String {
        format!(
            "lat={:.4}&lng={:.4}&dist={}&back={}&maxResults={}&includeProvisional=true",
            self.latitude,
            self.longitude,
            self.dist_km.min(EbirdClient::MAX_DIST_KM),
            self.back_days,
            self.max_results.min(EbirdClient::MAX_RESULTS),
        )
    }
}

/// Client for the eBird API v2. Every request carries the API key in the
/// `x-ebirdapitoken` header.
pub struct EbirdClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl EbirdClient {
    /// Base URL for eBird API v2
    pub const BASE_URL: &'static str = "https://api.ebird.org/v2";

    /// Hard API ceiling on search radius
    pub const MAX_DIST_KM: u32 = 50;

    /// Hard API ceiling on result count
    pub const MAX_RESULTS: u32 = 10_000;

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &'static str = "EBIRD_API_TOKEN";

    /// Create a new client with default settings (30 second timeout)
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(30))
    }

    /// Create a new client with a custom timeout
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            base_url: Self::BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Read the API key from `EBIRD_API_TOKEN`
    pub fn from_env() -> Result<Self> {
        match std::env::var(Self::API_KEY_ENV) {
            Ok(key) if !key.is_empty() => Ok(Self::new(key)),
            _ => Err(EbirdError::MissingApiKey),
        }
    }

    /// Create a client against a custom base URL (tests, proxies)
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Self {
        let mut client = Self::new(api_key);
        client.base_url = base_url.trim_end_matches('/').to_string();
        client
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        Ok(self
            .http
            .get(url)
            .header("x-ebirdapitoken", &self.api_key)
            .send()
            .await?)
    }

    /// Fetch the complete eBird taxonomy, English locale.
    ///
    /// This is a few thousand entries; callers are expected to load it once
    /// and keep it for the process lifetime.
    pub async fn taxonomy(&self) -> Result<Vec<TaxonomyEntry>> {
        let url = format!("{}/ref/taxonomy/ebird?fmt=json&locale=en", self.base_url);
        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(EbirdError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Recent observations around a point, optionally for one species
    pub async fn recent_observations(
        &self,
        req: &RecentObservationsRequest,
    ) -> Result<Vec<RecentObservation>> {
        let path = match &req.species_code {
            Some(code) => format!("/data/obs/geo/recent/{}", urlencoding::encode(code)),
            None => "/data/obs/geo/recent".to_string(),
        };
        let url = format!("{}{}?{}", self.base_url, path, req.query_string());

        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Err(EbirdError::Status(response.status()));
        }
        Ok(response.json().await?)
    }

    /// Daily stats for a region on a given date.
    ///
    /// Best-effort: a non-success status yields `Ok(None)` so a batch over
    /// many regions can drop the failures without aborting.
    pub async fn region_stats(&self, region: &str, date: NaiveDate) -> Result<Option<RegionStats>> {
        let url = format!(
            "{}/product/stats/{}/{}/{}/{}",
            self.base_url,
            urlencoding::encode(region),
            date.year(),
            date.month(),
            date.day(),
        );

        let response = self.get(&url).await?;
        if !response.status().is_success() {
            return Ok(None);
        }
        Ok(Some(response.json().await?))
    }
}
