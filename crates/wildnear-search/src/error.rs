//! Error types for the search layer

use std::fmt;

/// Errors from a search operation, wrapping whichever source API failed
#[derive(Debug)]
pub enum SearchError {
    /// iNaturalist API error
    Inat(inat_api::InatError),
    /// eBird API error
    Ebird(ebird_api::EbirdError),
    /// GBIF API error
    Gbif(gbif_api::GbifError),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inat(e) => write!(f, "{}", e),
            Self::Ebird(e) => write!(f, "{}", e),
            Self::Gbif(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Inat(e) => Some(e),
            Self::Ebird(e) => Some(e),
            Self::Gbif(e) => Some(e),
        }
    }
}

impl From<inat_api::InatError> for SearchError {
    fn from(e: inat_api::InatError) -> Self {
        Self::Inat(e)
    }
}

impl From<ebird_api::EbirdError> for SearchError {
    fn from(e: ebird_api::EbirdError) -> Self {
        Self::Ebird(e)
    }
}

impl From<gbif_api::GbifError> for SearchError {
    fn from(e: gbif_api::GbifError) -> Self {
        Self::Gbif(e)
    }
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
