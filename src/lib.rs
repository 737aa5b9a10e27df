//! # EcoRoute Library
//!
//! Compare travel modes between two places by distance, duration and CO2
//! emissions, and pick the most eco-friendly one.
//!
//! ## Features
//!
//! - **Pure estimation engine**: haversine distance plus fixed per-mode factors for car, bus, bike and walk
//! - **Eco choice**: lowest emissions wins, ties go to the earlier mode (bike before walk)
//! - **Place resolution**: Mapbox-compatible geocoding with an offline catalog of major Indian cities
//! - **Trip history**: bounded, in-memory, most recent first
//!
//! ## Basic Usage
//!
//! ```rust
//! use ecoroute::{Coordinate, RouteResult, TravelMode};
//!
//! let delhi = Coordinate::new(28.6139, 77.2090);
//! let mumbai = Coordinate::new(19.0760, 72.8777);
//!
//! let result = RouteResult::between("Delhi", delhi, "Mumbai", mumbai);
//! assert_eq!(result.eco_friendly, TravelMode::Bike);
//! assert_eq!(ecoroute::format_duration(125), "2h 5m");
//! ```
//!
//! ## Resolving place names
//!
//! ```rust,no_run
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Uses MAPBOX_ACCESS_TOKEN when set, the offline catalog otherwise
//!     let result = ecoroute::compare("Pune", "Mumbai").await?;
//!     for mode in &result.modes {
//!         println!("{}: {} kg CO2", mode.mode.display_name(), mode.emissions_kg);
//!     }
//!     Ok(())
//! }
//! ```

pub use crate::core::config::GeocoderConfig;
pub use crate::core::error::{Endpoint, Error, Result};
pub use crate::core::estimate::{
    estimate_routes, format_duration, select_eco_friendly, ModeEstimate, RouteResult,
};
pub use crate::core::geo::{distance_km, Coordinate, EARTH_RADIUS_KM};
pub use crate::core::geocoder::{Geocoder, MIN_QUERY_CHARS};
pub use crate::core::history::{NewTrip, TripHistory, TripRecord, MAX_TRIPS};
pub use crate::core::mode::TravelMode;
pub use crate::core::places::{merge_suggestions, search_fallback, suggest_correction, Place};
pub use crate::core::planner::{Resolution, RoutePlanner, SearchOutcome};

// Internal modules
mod core;

// C-compatible FFI bindings (optional)
#[cfg(feature = "c-bindings")]
pub mod ffi;

/// Resolve two place names (or `lat, lng` literals) and compare every travel mode
///
/// Configuration comes from the environment (see [`GeocoderConfig::from_env`]).
///
/// # Examples
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = ecoroute::compare("Delhi", "19.0760, 72.8777").await?;
/// println!("Greenest option: {}", result.eco_friendly.display_name());
/// # Ok(())
/// # }
/// ```
pub async fn compare(source: &str, destination: &str) -> Result<RouteResult> {
    RoutePlanner::new(GeocoderConfig::from_env())
        .plan(source, destination)
        .await
}

/// Place suggestions for a partially typed name
///
/// Offline catalog results come first; remote results are merged behind them
/// when a geocoding token is configured.
pub async fn suggest(query: &str) -> SearchOutcome {
    RoutePlanner::new(GeocoderConfig::from_env())
        .suggest(query)
        .await
}
