//! Error types for the ecoroute library
//!
//! The estimation engine itself is total; everything that can fail lives at
//! the edges: resolving place names, talking to the geocoding service and
//! writing exported results.

use std::fmt;

/// Which end of a route could not be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Source,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source => write!(f, "source"),
            Endpoint::Destination => write!(f, "destination"),
        }
    }
}

/// Main error type for ecoroute operations
#[derive(Debug)]
pub enum Error {
    /// One of the endpoints could not be turned into a coordinate
    MissingCoordinates {
        endpoint: Endpoint,
        query: String,
        suggestion: Option<String>,
    },

    /// An endpoint could not be resolved because the geocoding service failed
    /// and the offline catalog had no match either
    ServiceUnavailable {
        endpoint: Endpoint,
        query: String,
        reason: String,
    },

    /// Invalid configuration or parameters
    InvalidInput(String),

    /// No access token configured for the geocoding service
    MissingToken,

    /// The geocoding service rejected the access token (HTTP 401)
    Unauthorized,

    /// The geocoding service denied access to the account (HTTP 403)
    AccessDenied,

    /// HTTP-specific error
    HttpError(String),

    /// Network connectivity issues
    NetworkError(String),

    /// The geocoding service answered with something we could not decode
    InvalidResponse(String),

    /// File I/O error
    IoError(std::io::Error),
}

impl Error {
    /// True when the failure came from the remote service rather than the input
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Error::ServiceUnavailable { .. }
                | Error::MissingToken
                | Error::Unauthorized
                | Error::AccessDenied
                | Error::HttpError(_)
                | Error::NetworkError(_)
                | Error::InvalidResponse(_)
        )
    }

    /// Short message suitable for a suggestion dropdown or status line
    pub fn user_message(&self) -> String {
        match self {
            Error::Unauthorized => "Invalid API key. Please check your Mapbox token.".to_string(),
            Error::AccessDenied => {
                "API access denied. Please check your Mapbox account.".to_string()
            }
            Error::MissingToken => {
                "No Mapbox token configured. Only saved locations are available.".to_string()
            }
            Error::HttpError(_) | Error::NetworkError(_) | Error::InvalidResponse(_) => {
                "Unable to search locations. Please check your connection.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingCoordinates {
                endpoint,
                query,
                suggestion,
            } => {
                write!(f, "Could not find coordinates for {endpoint} '{query}'")?;
                if let Some(suggestion) = suggestion {
                    write!(f, ". Did you mean '{suggestion}'?")?;
                }
                Ok(())
            }
            Error::ServiceUnavailable {
                endpoint,
                query,
                reason,
            } => {
                write!(f, "Could not resolve {endpoint} '{query}': {reason}")
            }
            Error::InvalidInput(msg) => {
                write!(f, "Invalid input: {msg}")
            }
            Error::MissingToken => {
                write!(f, "Geocoding access token is not configured")
            }
            Error::Unauthorized => {
                write!(f, "Geocoding service rejected the access token (401)")
            }
            Error::AccessDenied => {
                write!(f, "Geocoding service denied access (403)")
            }
            Error::HttpError(msg) => {
                write!(f, "HTTP error: {msg}")
            }
            Error::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Error::InvalidResponse(msg) => {
                write!(f, "Invalid geocoder response: {msg}")
            }
            Error::IoError(err) => {
                write!(f, "I/O error: {err}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::IoError(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Error::NetworkError(err.to_string())
        } else if err.is_decode() {
            Error::InvalidResponse(err.to_string())
        } else {
            Error::HttpError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidResponse(err.to_string())
    }
}

/// Convenience result type for ecoroute operations
pub type Result<T> = std::result::Result<T, Error>;
