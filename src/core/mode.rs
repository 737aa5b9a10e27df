//! Travel modes and their fixed estimation factors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Transport mode compared by the estimator
///
/// Variant order is the evaluation order used everywhere (car, bus, bike,
/// walk); eco selection breaks ties by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bus,
    Bike,
    Walk,
}

impl TravelMode {
    /// All modes in evaluation order
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Bus,
        TravelMode::Bike,
        TravelMode::Walk,
    ];

    /// Stable lower-case identifier
    pub fn id(self) -> &'static str {
        match self {
            TravelMode::Car => "car",
            TravelMode::Bus => "bus",
            TravelMode::Bike => "bike",
            TravelMode::Walk => "walk",
        }
    }

    /// Human-readable name shown on cards and in the trip history
    pub fn display_name(self) -> &'static str {
        match self {
            TravelMode::Car => "Car",
            TravelMode::Bus => "Public Transport",
            TravelMode::Bike => "Bicycle",
            TravelMode::Walk => "Walking",
        }
    }

    /// Detour factor applied to the straight-line distance
    pub fn distance_multiplier(self) -> f64 {
        match self {
            TravelMode::Car => 1.0,
            TravelMode::Bus => 1.1,
            TravelMode::Bike => 1.05,
            TravelMode::Walk => 1.05,
        }
    }

    /// Factor applied to the base travel time
    pub fn time_multiplier(self) -> f64 {
        match self {
            TravelMode::Car => 0.8,
            TravelMode::Bus => 1.4,
            TravelMode::Bike => 3.5,
            TravelMode::Walk => 12.0,
        }
    }

    /// kg CO2 per km
    pub fn emission_factor(self) -> f64 {
        match self {
            TravelMode::Car => 0.12,
            TravelMode::Bus => 0.027,
            TravelMode::Bike | TravelMode::Walk => 0.0,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "car" => Ok(TravelMode::Car),
            "bus" | "public transport" => Ok(TravelMode::Bus),
            "bike" | "bicycle" => Ok(TravelMode::Bike),
            "walk" | "walking" => Ok(TravelMode::Walk),
            other => Err(Error::InvalidInput(format!("unknown travel mode '{other}'"))),
        }
    }
}
