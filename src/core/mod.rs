//! Core library modules for ecoroute
//!
//! The estimation engine (`geo`, `mode`, `estimate`) is pure; `geocoder` and
//! `planner` wrap it with place resolution.

pub mod config;
pub mod error;
pub mod estimate;
pub mod geo;
pub mod geocoder;
pub mod history;
pub mod mode;
pub mod places;
pub mod planner;

// Re-export main types for internal use
pub use config::GeocoderConfig;
pub use planner::RoutePlanner;
