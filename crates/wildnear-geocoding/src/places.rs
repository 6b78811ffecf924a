//! Forward place search via the Mapbox geocoding API

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;

const DEFAULT_BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// One place suggestion for the location search box
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    place_name: Option<String>,
    /// `[longitude, latitude]`
    #[serde(default)]
    center: Vec<f64>,
}

/// Forward place search. Requires a Mapbox access token; without one every
/// search resolves to no candidates, mirroring how the search box simply
/// stays quiet when the key is absent.
pub struct PlaceSearch {
    client: reqwest::Client,
    base_url: String,
    access_token: Option<String>,
}

impl PlaceSearch {
    /// Environment variable holding the access token
    pub const TOKEN_ENV: &'static str = "MAPBOX_ACCESS_TOKEN";

    /// Create a place search with the given access token
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::build(Some(access_token.into()))
    }

    /// Read the access token from `MAPBOX_ACCESS_TOKEN`; a missing token
    /// yields a disabled searcher rather than an error
    pub fn from_env() -> Self {
        Self::build(std::env::var(Self::TOKEN_ENV).ok().filter(|t| !t.is_empty()))
    }

    /// A searcher that always returns no candidates
    pub fn disabled() -> Self {
        Self::build(None)
    }

    fn build(access_token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token,
        }
    }

    /// Create a searcher against a custom base URL (tests, proxies)
    pub fn with_base_url(access_token: impl Into<String>, base_url: &str) -> Self {
        let mut search = Self::new(access_token);
        search.base_url = base_url.trim_end_matches('/').to_string();
        search
    }

    /// Search candidate places for a text query, up to 5.
    ///
    /// Best-effort: a blank query, missing token, or non-success status all
    /// yield an empty list.
    pub async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>> {
        let token = match &self.access_token {
            Some(t) => t,
            None => return Ok(vec![]),
        };
        if query.trim().is_empty() {
            return Ok(vec![]);
        }

        let url = format!(
            "{}/{}.json?access_token={}&autocomplete=true&limit=5&types=place,locality,neighborhood,address,poi",
            self.base_url,
            urlencoding::encode(query.trim()),
            urlencoding::encode(token),
        );

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            warn!(status = %response.status(), "Place search returned error status");
            return Ok(vec![]);
        }

        let data: GeocodeResponse = response.json().await?;
        Ok(to_candidates(data.features))
    }
}

/// Drop features missing a name or a usable center point
fn to_candidates(features: Vec<GeocodeFeature>) -> Vec<PlaceCandidate> {
    features
        .into_iter()
        .filter_map(|f| {
            let name = f.place_name?;
            let longitude = f.center.first().copied()?;
            let latitude = f.center.get(1).copied()?;
            Some(PlaceCandidate {
                name,
                latitude,
                longitude,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_search_returns_nothing() {
        let search = PlaceSearch::disabled();
        let results = search.search("Amsterdam").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_returns_nothing() {
        let search = PlaceSearch::new("token");
        let results = search.search("   ").await.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_feature_without_center_is_dropped() {
        let data: GeocodeResponse = serde_json::from_str(
            r#"{"features": [
                {"place_name": "Nowhere", "center": []},
                {"place_name": "Amsterdam, Netherlands", "center": [4.9041, 52.3676]}
            ]}"#,
        )
        .unwrap();
        let candidates = to_candidates(data.features);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].name, "Amsterdam, Netherlands");
    }
}
