//! Route estimation engine
//!
//! Turns a pair of coordinates into per-mode distance, duration and
//! emission estimates and picks the lowest-emission mode. Everything here is
//! a pure function of its inputs.

use serde::{Deserialize, Serialize};

use crate::core::geo::{distance_km, Coordinate};
use crate::core::mode::TravelMode;

/// Minutes of base travel time per straight-line kilometer
const MINUTES_PER_KM: f64 = 2.0;

/// Floor for the base travel time so near-identical endpoints never yield a zero-minute trip
const MIN_BASE_MINUTES: f64 = 5.0;

/// Estimate for a single travel mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeEstimate {
    pub mode: TravelMode,
    /// Kilometers, one decimal place
    pub distance_km: f64,
    /// Whole minutes
    pub duration_min: u32,
    /// kg CO2, two decimal places
    pub emissions_kg: f64,
}

/// Estimates for all modes between two labelled endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResult {
    pub source: String,
    pub destination: String,
    /// One entry per mode, in evaluation order
    pub modes: Vec<ModeEstimate>,
    pub eco_friendly: TravelMode,
}

impl RouteResult {
    /// Estimate every mode between `from` and `to`, keeping the given labels
    pub fn between(
        source: impl Into<String>,
        from: Coordinate,
        destination: impl Into<String>,
        to: Coordinate,
    ) -> Self {
        let modes = estimate_routes(from, to);
        let eco_friendly = lowest_emission(&modes[0], &modes[1..]);

        Self {
            source: source.into(),
            destination: destination.into(),
            modes: modes.to_vec(),
            eco_friendly,
        }
    }

    /// Estimate for a particular mode
    pub fn estimate(&self, mode: TravelMode) -> Option<&ModeEstimate> {
        self.modes.iter().find(|m| m.mode == mode)
    }

    /// Estimate for the eco-friendly mode
    pub fn eco_estimate(&self) -> Option<&ModeEstimate> {
        self.estimate(self.eco_friendly)
    }

    /// kg CO2 avoided by taking the eco-friendly mode instead of the car
    pub fn co2_saved_vs_car_kg(&self) -> f64 {
        match (self.estimate(TravelMode::Car), self.eco_estimate()) {
            (Some(car), Some(eco)) => round_to(car.emissions_kg - eco.emissions_kg, 2).max(0.0),
            _ => 0.0,
        }
    }
}

/// Base travel time in minutes for a straight-line distance
pub fn base_time_minutes(distance_km: f64) -> f64 {
    (distance_km * MINUTES_PER_KM).max(MIN_BASE_MINUTES)
}

/// Estimate a single mode from the straight-line distance and base time
pub fn estimate_mode(mode: TravelMode, distance_km: f64, base_minutes: f64) -> ModeEstimate {
    let mode_distance = round_to(distance_km * mode.distance_multiplier(), 1);
    let duration = (base_minutes * mode.time_multiplier()).round();

    ModeEstimate {
        mode,
        distance_km: mode_distance,
        duration_min: duration as u32,
        emissions_kg: round_to(mode_distance * mode.emission_factor(), 2),
    }
}

/// Estimate all four modes between two coordinates, in evaluation order
pub fn estimate_routes(from: Coordinate, to: Coordinate) -> [ModeEstimate; 4] {
    let d = distance_km(from, to);
    let t = base_time_minutes(d);
    TravelMode::ALL.map(|mode| estimate_mode(mode, d, t))
}

/// Mode with strictly the smallest emissions; ties go to the earliest entry
///
/// Rounded emissions are compared first and the mode's emission factor breaks
/// equal values, so a motorised mode whose emissions rounded to 0.00 never
/// beats bike or walk. With the usual car, bus, bike, walk order this reports
/// bike whenever bike and walk both sit at zero.
pub fn select_eco_friendly(modes: &[ModeEstimate]) -> Option<TravelMode> {
    let (first, rest) = modes.split_first()?;
    Some(lowest_emission(first, rest))
}

fn lowest_emission(first: &ModeEstimate, rest: &[ModeEstimate]) -> TravelMode {
    rest.iter()
        .fold(first, |best, current| {
            if emission_key(current) < emission_key(best) {
                current
            } else {
                best
            }
        })
        .mode
}

fn emission_key(estimate: &ModeEstimate) -> (f64, f64) {
    (estimate.emissions_kg, estimate.mode.emission_factor())
}

/// Render minutes as `"Xh Ym"`, or `"Ym"` under an hour
pub fn format_duration(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
