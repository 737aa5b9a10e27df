//! HTTP client for a Mapbox Geocoding v5 compatible service
//!
//! Provides autocomplete search, single-result forward geocoding and reverse
//! lookup. Searches are tried with the configured country bias first and
//! repeated globally when the biased request finds nothing.

use std::time::Duration;

use log::{debug, warn};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, StatusCode, Url};
use serde::Deserialize;

use crate::core::config::GeocoderConfig;
use crate::core::error::{Error, Result};
use crate::core::geo::Coordinate;
use crate::core::places::Place;

/// Queries shorter than this (after trimming) are not sent to the service
pub const MIN_QUERY_CHARS: usize = 2;

/// Shared HTTP client; per-request timeouts come from the config
static GLOBAL_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .pool_idle_timeout(Duration::from_secs(90))
        .connect_timeout(Duration::from_secs(5))
        .user_agent(format!("ecoroute/{}", env!("ECOROUTE_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
});

#[derive(Debug, Default, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Default, Deserialize)]
struct Feature {
    #[serde(default)]
    text: String,
    #[serde(default)]
    place_name: String,
    /// `[lng, lat]`
    center: Option<[f64; 2]>,
    #[serde(default)]
    place_type: Vec<String>,
    properties: Option<FeatureProperties>,
    bbox: Option<[f64; 4]>,
}

#[derive(Debug, Default, Deserialize)]
struct FeatureProperties {
    category: Option<String>,
}

/// Convert a service feature into a place suggestion
fn place_from_feature(feature: Feature, home_country: &str) -> Place {
    let label = feature.place_name;
    let label_lower = label.to_lowercase();
    let home = home_country.to_lowercase();

    let in_home_country = !home.is_empty()
        && (label_lower.contains(&format!(", {home}")) || label_lower.ends_with(&format!(" {home}")));

    let display = if in_home_country {
        let parts: Vec<&str> = label.split(", ").collect();
        if parts.len() >= 3 {
            format!("{}, {}, {home_country}", parts[0], parts[1])
        } else {
            label.clone()
        }
    } else {
        label.clone()
    };

    let name = if feature.text.trim().is_empty() {
        label.split(", ").next().unwrap_or_default().to_string()
    } else {
        feature.text
    };

    let kind = feature
        .properties
        .and_then(|p| p.category)
        .or_else(|| feature.place_type.into_iter().next())
        .unwrap_or_else(|| "place".to_string());

    Place {
        name,
        display,
        coordinate: feature.center.map(|[lng, lat]| Coordinate::new(lat, lng)),
        kind,
        in_home_country,
        bbox: feature.bbox,
    }
}

/// Client for the geocoding collaborator
#[derive(Debug, Clone)]
pub struct Geocoder {
    config: GeocoderConfig,
}

impl Geocoder {
    pub fn new(config: GeocoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeocoderConfig {
        &self.config
    }

    /// Autocomplete suggestions for free text, home-country results first
    pub async fn search(&self, query: &str) -> Result<Vec<Place>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let limit = self.config.limit.to_string();
        let features = self
            .lookup(query, &[("autocomplete", "true"), ("limit", limit.as_str())])
            .await?;

        let mut places: Vec<Place> = features
            .into_iter()
            .map(|f| place_from_feature(f, &self.config.home_country))
            .collect();
        places.sort_by_key(|place| !place.in_home_country);
        places.truncate(self.config.limit);
        Ok(places)
    }

    /// Best single match for free text
    pub async fn forward(&self, query: &str) -> Result<Option<Place>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(None);
        }

        let features = self.lookup(query, &[("limit", "1")]).await?;
        Ok(features
            .into_iter()
            .map(|f| place_from_feature(f, &self.config.home_country))
            .find(|place| place.coordinate.is_some()))
    }

    /// Place label for a coordinate
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<Option<String>> {
        let segment = format!("{},{}", coordinate.lng, coordinate.lat);
        let collection = self.fetch(&segment, &[("limit", "1")]).await?;
        Ok(collection
            .features
            .into_iter()
            .map(|f| f.place_name)
            .find(|name| !name.trim().is_empty()))
    }

    /// Place label for a coordinate, falling back to `"lat, lng"` on any failure
    pub async fn reverse_or_coordinates(&self, coordinate: Coordinate) -> String {
        match self.reverse(coordinate).await {
            Ok(Some(name)) => name,
            Ok(None) => coordinate.to_string(),
            Err(e) => {
                warn!("Reverse geocoding failed for {coordinate}: {e}");
                coordinate.to_string()
            }
        }
    }

    /// Country-biased lookup with a global retry when nothing is found
    async fn lookup(&self, query: &str, params: &[(&str, &str)]) -> Result<Vec<Feature>> {
        if let Some(country) = self.config.country.as_deref() {
            let mut biased = params.to_vec();
            biased.push(("country", country));

            let features = self.fetch(query, &biased).await?.features;
            if !features.is_empty() {
                return Ok(features);
            }
            debug!("No {country} results for '{query}', retrying globally");
        }

        Ok(self.fetch(query, params).await?.features)
    }

    async fn fetch(&self, segment: &str, params: &[(&str, &str)]) -> Result<FeatureCollection> {
        let token = self
            .config
            .access_token
            .as_deref()
            .ok_or(Error::MissingToken)?;
        let url = self.endpoint(segment)?;
        debug!("GET {url} {params:?}");

        let response = GLOBAL_CLIENT
            .get(url)
            .query(params)
            .query(&[("access_token", token)])
            .timeout(self.config.timeout)
            .send()
            .await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(Error::Unauthorized),
            StatusCode::FORBIDDEN => Err(Error::AccessDenied),
            status if !status.is_success() => Err(Error::HttpError(format!(
                "Geocoding request failed: {status}"
            ))),
            _ => Ok(response.json::<FeatureCollection>().await?),
        }
    }

    /// `{base_url}/{segment}.json`, with the segment percent-encoded
    fn endpoint(&self, segment: &str) -> Result<Url> {
        let base = &self.config.base_url;
        let mut url = Url::parse(base)
            .map_err(|e| Error::InvalidInput(format!("invalid geocoder URL '{base}': {e}")))?;

        url.path_segments_mut()
            .map_err(|_| Error::InvalidInput(format!("invalid geocoder URL '{base}'")))?
            .pop_if_empty()
            .push(&format!("{segment}.json"));

        Ok(url)
    }
}
