//! Bounded in-memory trip history
//!
//! Only the eco-friendly choice of each successful query is recorded. The
//! history is never written to disk and is lost when the process exits.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::estimate::{round_to, RouteResult};
use crate::core::mode::TravelMode;

/// Maximum number of trips kept
pub const MAX_TRIPS: usize = 5;

/// A trip about to be recorded, before it is stamped
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub source: String,
    pub destination: String,
    /// Display name of the chosen mode
    pub mode: String,
    pub distance_km: f64,
    pub emissions_kg: f64,
}

impl NewTrip {
    /// The eco-friendly entry of a route result
    pub fn from_result(result: &RouteResult) -> Option<Self> {
        let eco = result.eco_estimate()?;
        Some(Self {
            source: result.source.clone(),
            destination: result.destination.clone(),
            mode: eco.mode.display_name().to_string(),
            distance_km: eco.distance_km,
            emissions_kg: eco.emissions_kg,
        })
    }
}

/// A recorded trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    /// Creation time in milliseconds since the Unix epoch
    pub id: i64,
    pub source: String,
    pub destination: String,
    pub mode: String,
    pub distance_km: f64,
    pub emissions_kg: f64,
    /// Creation date as `YYYY-MM-DD`
    pub date: String,
}

/// Most-recent-first list of at most [`MAX_TRIPS`] trips
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripHistory {
    trips: VecDeque<TripRecord>,
}

impl TripHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `trip` with the current time and prepend it
    pub fn record(&mut self, trip: NewTrip) -> &TripRecord {
        self.record_at(trip, Utc::now())
    }

    /// Stamp `trip` with `at` and prepend it, dropping the oldest entries beyond the limit
    pub fn record_at(&mut self, trip: NewTrip, at: DateTime<Utc>) -> &TripRecord {
        let record = TripRecord {
            id: at.timestamp_millis(),
            source: trip.source,
            destination: trip.destination,
            mode: trip.mode,
            distance_km: trip.distance_km,
            emissions_kg: trip.emissions_kg,
            date: at.format("%Y-%m-%d").to_string(),
        };

        self.trips.push_front(record);
        self.trips.truncate(MAX_TRIPS);
        &self.trips[0]
    }

    pub fn trips(&self) -> impl Iterator<Item = &TripRecord> {
        self.trips.iter()
    }

    pub fn latest(&self) -> Option<&TripRecord> {
        self.trips.front()
    }

    pub fn total_trips(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// kg CO2 saved compared to driving every recorded distance by car
    pub fn co2_saved_kg(&self) -> f64 {
        let car_factor = TravelMode::Car.emission_factor();
        let (emitted, by_car) = self.trips.iter().fold((0.0, 0.0), |(emitted, by_car), trip| {
            (
                emitted + trip.emissions_kg,
                by_car + trip.distance_km * car_factor,
            )
        });
        round_to((by_car - emitted).max(0.0), 2)
    }
}
