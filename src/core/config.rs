//! Geocoding service configuration

use std::time::Duration;

/// Environment variable holding the geocoding access token
pub const TOKEN_ENV: &str = "MAPBOX_ACCESS_TOKEN";

/// Environment variable overriding the geocoding endpoint
pub const GEOCODER_URL_ENV: &str = "ECOROUTE_GEOCODER_URL";

/// Configuration for the geocoding collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    /// Base URL of a Mapbox Geocoding v5 compatible endpoint
    pub base_url: String,

    /// Access token; without one only the offline catalog is used
    pub access_token: Option<String>,

    /// ISO country code searched first (e.g. "IN"); `None` searches globally only
    pub country: Option<String>,

    /// Country name used to rank and shorten home-country labels
    pub home_country: String,

    /// Maximum suggestions requested per search
    pub limit: usize,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.mapbox.com/geocoding/v5/mapbox.places".to_string(),
            access_token: None,
            country: Some("IN".to_string()),
            home_country: "India".to_string(),
            limit: 5,
            timeout: Duration::from_secs(10),
        }
    }
}

impl GeocoderConfig {
    /// Defaults overridden by `MAPBOX_ACCESS_TOKEN` and `ECOROUTE_GEOCODER_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::default();
        config.access_token = non_empty(TOKEN_ENV);
        if let Some(url) = non_empty(GEOCODER_URL_ENV) {
            config.base_url = url;
        }
        config
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Bias searches toward `country`; an empty string disables the bias
    pub fn with_country(mut self, country: &str) -> Self {
        let country = country.trim();
        self.country = (!country.is_empty()).then(|| country.to_uppercase());
        self
    }

    pub fn has_token(&self) -> bool {
        self.access_token.is_some()
    }
}
