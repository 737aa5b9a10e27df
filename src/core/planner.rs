//! Endpoint resolution and route planning
//!
//! Sits between user input and the estimation engine: free text and
//! coordinate literals are resolved to coordinates (geocoder first, offline
//! catalog as fallback) and only fully resolved pairs reach the engine.

use log::{debug, warn};

use crate::core::config::GeocoderConfig;
use crate::core::error::{Endpoint, Error, Result};
use crate::core::estimate::RouteResult;
use crate::core::geo::Coordinate;
use crate::core::geocoder::{Geocoder, MIN_QUERY_CHARS};
use crate::core::places::{self, Place};

/// Outcome of a suggestion search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Suggestions to show, catalog entries first
    Found(Vec<Place>),
    /// Nothing matched anywhere
    Empty,
    /// The service failed; `fallback` holds whatever the offline catalog had
    ServiceError { reason: String, fallback: Vec<Place> },
}

/// Outcome of resolving one endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved { label: String, coordinate: Coordinate },
    Empty,
    ServiceError(String),
}

impl Resolution {
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Resolution::Resolved { coordinate, .. } => Some(*coordinate),
            _ => None,
        }
    }
}

/// Resolves endpoints and produces route estimates
#[derive(Debug, Clone)]
pub struct RoutePlanner {
    geocoder: Option<Geocoder>,
}

impl RoutePlanner {
    /// Planner backed by the geocoder; without a token it runs offline
    pub fn new(config: GeocoderConfig) -> Self {
        if !config.has_token() {
            debug!("No geocoding token configured, using the offline catalog only");
            return Self::offline();
        }
        Self {
            geocoder: Some(Geocoder::new(config)),
        }
    }

    /// Planner that only uses the offline catalog and coordinate literals
    pub fn offline() -> Self {
        Self { geocoder: None }
    }

    pub fn is_offline(&self) -> bool {
        self.geocoder.is_none()
    }

    /// Suggestions for a partially typed place name
    pub async fn suggest(&self, query: &str) -> SearchOutcome {
        if query.trim().chars().count() < MIN_QUERY_CHARS {
            return SearchOutcome::Empty;
        }

        let fallback = places::search_fallback(query);

        let Some(geocoder) = &self.geocoder else {
            return found_or_empty(fallback);
        };

        match geocoder.search(query).await {
            Ok(remote) if remote.is_empty() => found_or_empty(fallback),
            Ok(remote) => SearchOutcome::Found(places::merge_suggestions(fallback, remote)),
            Err(e) => {
                warn!("Place search for '{query}' failed: {e}");
                SearchOutcome::ServiceError {
                    reason: e.user_message(),
                    fallback,
                }
            }
        }
    }

    /// Resolve free text or a `lat, lng` literal to a coordinate
    pub async fn resolve(&self, query: &str) -> Resolution {
        let query = query.trim();
        if query.is_empty() {
            return Resolution::Empty;
        }

        if let Ok(coordinate) = query.parse::<Coordinate>() {
            let label = self.describe(coordinate).await;
            return Resolution::Resolved { label, coordinate };
        }

        let Some(geocoder) = &self.geocoder else {
            return from_catalog(query).unwrap_or(Resolution::Empty);
        };

        match geocoder.forward(query).await {
            Ok(Some(Place {
                coordinate: Some(coordinate),
                ..
            })) => {
                debug!("Resolved '{query}' to {coordinate} via geocoder");
                Resolution::Resolved {
                    label: query.to_string(),
                    coordinate,
                }
            }
            Ok(_) => from_catalog(query).unwrap_or(Resolution::Empty),
            Err(e) => {
                warn!("Geocoding '{query}' failed: {e}");
                from_catalog(query).unwrap_or_else(|| Resolution::ServiceError(e.user_message()))
            }
        }
    }

    /// Best-effort label for a coordinate
    pub async fn describe(&self, coordinate: Coordinate) -> String {
        match &self.geocoder {
            Some(geocoder) => geocoder.reverse_or_coordinates(coordinate).await,
            None => coordinate.to_string(),
        }
    }

    /// Resolve both endpoints and estimate every travel mode between them
    pub async fn plan(&self, source: &str, destination: &str) -> Result<RouteResult> {
        if source.trim().is_empty() || destination.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please enter both source and destination".to_string(),
            ));
        }

        let (source_label, from) = self.resolve_endpoint(Endpoint::Source, source).await?;
        let (destination_label, to) = self
            .resolve_endpoint(Endpoint::Destination, destination)
            .await?;

        Ok(RouteResult::between(source_label, from, destination_label, to))
    }

    async fn resolve_endpoint(&self, endpoint: Endpoint, query: &str) -> Result<(String, Coordinate)> {
        match self.resolve(query).await {
            Resolution::Resolved { label, coordinate } => Ok((label, coordinate)),
            Resolution::ServiceError(reason) => {
                warn!("Could not resolve {endpoint} '{query}': {reason}");
                Err(Error::ServiceUnavailable {
                    endpoint,
                    query: query.trim().to_string(),
                    reason,
                })
            }
            Resolution::Empty => Err(Error::MissingCoordinates {
                endpoint,
                query: query.trim().to_string(),
                suggestion: places::suggest_correction(query),
            }),
        }
    }
}

fn found_or_empty(places: Vec<Place>) -> SearchOutcome {
    if places.is_empty() {
        SearchOutcome::Empty
    } else {
        SearchOutcome::Found(places)
    }
}

fn from_catalog(query: &str) -> Option<Resolution> {
    let place = places::lookup(query)?;
    let coordinate = place.coordinate?;
    debug!("Resolved '{query}' to {} from the offline catalog", place.name);
    Some(Resolution::Resolved {
        label: query.to_string(),
        coordinate,
    })
}
