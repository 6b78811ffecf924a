//! Error types for the iNaturalist API client

use std::fmt;

/// Errors that can occur when interacting with the iNaturalist API
#[derive(Debug)]
pub enum InatError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned a non-success status
    Status(reqwest::StatusCode),
    /// Failed to parse JSON response
    Json(serde_json::Error),
}

impl fmt::Display for InatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "iNaturalist HTTP error: {}", e),
            Self::Status(status) => write!(f, "iNaturalist API error: {}", status),
            Self::Json(e) => write!(f, "iNaturalist JSON parse error: {}", e),
        }
    }
}

impl std::error::Error for InatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Status(_) => None,
            Self::Json(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for InatError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for InatError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for iNaturalist API operations
pub type Result<T> = std::result::Result<T, InatError>;
