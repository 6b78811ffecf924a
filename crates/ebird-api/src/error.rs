//! Error types for the eBird API client

use std::fmt;

/// Errors that can occur when interacting with the eBird API
#[derive(Debug)]
pub enum EbirdError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned a non-success status
    Status(reqwest::StatusCode),
    /// Failed to parse JSON response
    Json(serde_json::Error),
    /// No API key available
    MissingApiKey,
}

impl fmt::Display for EbirdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "eBird HTTP error: {}", e),
            Self::Status(status) => write!(f, "eBird API error: {}", status),
            Self::Json(e) => write!(f, "eBird JSON parse error: {}", e),
            Self::MissingApiKey => write!(f, "eBird API key not configured"),
        }
    }
}

impl std::error::Error for EbirdError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for EbirdError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

impl From<serde_json::Error> for EbirdError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for eBird API operations
pub type Result<T> = std::result::Result<T, EbirdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        assert_eq!(
            format!("{}", EbirdError::MissingApiKey),
            "eBird API key not configured"
        );
    }
}
