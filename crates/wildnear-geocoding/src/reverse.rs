//! Nominatim reverse geocoding with rate limiting and caching

use std::time::Duration;

use moka::future::Cache;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::error::{GeocodingError, Result};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";
const USER_AGENT: &str = "wildnear/0.1 (https://github.com/wildnear/wildnear)";
const CACHE_TTL_SECS: u64 = 86400; // 24 hours

#[derive(Debug, Deserialize)]
struct NominatimResponse {
    #[serde(default)]
    address: Option<NominatimAddress>,
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    county: Option<String>,
    state: Option<String>,
    country_code: Option<String>,
}

/// Format a coordinate pair the way the UI shows an unresolvable location
pub fn coordinate_label(latitude: f64, longitude: f64) -> String {
    format!("{:.4}, {:.4}", latitude, longitude)
}

/// Reverse geocoding service using Nominatim with rate limiting and caching
pub struct ReverseGeocoder {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<String, String>,
    /// Semaphore to enforce 1 request/second rate limit
    rate_limiter: Semaphore,
}

impl ReverseGeocoder {
    /// Create a new geocoder with default settings
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a new geocoder with a custom Nominatim URL
    pub fn with_base_url(base_url: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        let cache = Cache::builder()
            .max_capacity(10_000)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache,
            rate_limiter: Semaphore::new(1),
        }
    }

    /// Reverse geocode a point to a "place, region, COUNTRY" label
    pub async fn place_label(&self, latitude: f64, longitude: f64) -> Result<String> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeocodingError::InvalidCoordinates(latitude, longitude));
        }

        // Round to 6 decimal places for cache key (~0.1m precision)
        let cache_key = format!("{:.6},{:.6}", latitude, longitude);

        if let Some(cached) = self.cache.get(&cache_key).await {
            return Ok(cached);
        }

        // Rate limit: acquire permit, then wait 1 second after the request
        let _permit = self.rate_limiter.acquire().await.unwrap();

        let url = format!(
            "{}/reverse?lat={}&lon={}&format=json",
            self.base_url, latitude, longitude
        );

        let response = self
            .client
            .get(&url)
            .header("Accept-Language", "en")
            .send()
            .await
            .map_err(GeocodingError::Http)?;

        if !response.status().is_success() {
            return Err(GeocodingError::ApiError(format!(
                "Nominatim returned status {}",
                response.status()
            )));
        }

        let data: NominatimResponse = response.json().await.map_err(GeocodingError::Http)?;

        if let Some(ref err) = data.error {
            warn!(lat = latitude, lon = longitude, error = %err, "Nominatim returned error");
            tokio::time::sleep(Duration::from_millis(1100)).await;
            return Err(GeocodingError::ApiError(err.clone()));
        }

        let label = format_place_label(&data.address.unwrap_or_default());

        debug!(lat = latitude, lon = longitude, label = %label, "Geocoded coordinates");

        self.cache.insert(cache_key, label.clone()).await;

        // Delay to respect rate limit (1 req/sec)
        tokio::time::sleep(Duration::from_millis(1100)).await;

        Ok(label)
    }

    /// Reverse geocode with a coordinate-string fallback. Never fails: any
    /// geocoding problem, or an address with nothing nameable in it, yields
    /// the raw coordinates at 4 decimal places.
    pub async fn place_label_or_coords(&self, latitude: f64, longitude: f64) -> String {
        match self.place_label(latitude, longitude).await {
            Ok(label) if !label.is_empty() => label,
            Ok(_) => coordinate_label(latitude, longitude),
            Err(e) => {
                warn!(lat = latitude, lon = longitude, error = %e, "Reverse geocoding failed");
                coordinate_label(latitude, longitude)
            }
        }
    }
}

impl Default for ReverseGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the display label: locality, then region, then upper-cased country
/// code, joined with ", " and skipping whatever is missing
fn format_place_label(addr: &NominatimAddress) -> String {
    let place = addr
        .city
        .as_deref()
        .or(addr.town.as_deref())
        .or(addr.village.as_deref())
        .or(addr.county.as_deref())
        .unwrap_or("");
    let region = addr.state.as_deref().unwrap_or("");
    let country = addr
        .country_code
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_default();

    [place, region, &country]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_prefers_city() {
        let addr = NominatimAddress {
            city: Some("Amsterdam".to_string()),
            town: Some("ignored".to_string()),
            state: Some("North Holland".to_string()),
            country_code: Some("nl".to_string()),
            ..Default::default()
        };
        assert_eq!(format_place_label(&addr), "Amsterdam, North Holland, NL");
    }

    #[test]
    fn test_label_falls_back_through_locality_levels() {
        let addr = NominatimAddress {
            village: Some("Grindavik".to_string()),
            country_code: Some("is".to_string()),
            ..Default::default()
        };
        assert_eq!(format_place_label(&addr), "Grindavik, IS");
    }

    #[test]
    fn test_label_empty_when_nothing_known() {
        assert_eq!(format_place_label(&NominatimAddress::default()), "");
    }

    #[test]
    fn test_coordinate_label_four_decimals() {
        assert_eq!(coordinate_label(37.77493, -122.41942), "37.7749, -122.4194");
    }

    #[tokio::test]
    async fn test_invalid_coordinates_rejected() {
        let geocoder = ReverseGeocoder::new();
        let err = geocoder.place_label(91.0, 0.0).await.unwrap_err();
        assert!(matches!(err, GeocodingError::InvalidCoordinates(..)));
    }

    #[tokio::test]
    async fn test_fallback_label_for_invalid_coordinates() {
        let geocoder = ReverseGeocoder::new();
        let label = geocoder.place_label_or_coords(91.0, 0.0).await;
        assert_eq!(label, "91.0000, 0.0000");
    }
}
