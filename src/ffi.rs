//! C-compatible Foreign Function Interface (FFI) for ecoroute
//!
//! This module provides C-compatible bindings that allow the route estimation
//! engine to be used from C, C++, Python (via ctypes), and other languages that
//! support calling C libraries.
//!
//! # Memory Management
//!
//! - All string parameters should be null-terminated UTF-8 C strings (char*)
//! - Returned strings are allocated by Rust and must be freed with `ecoroute_free_string()`
//! - Estimates are written into caller-owned `EcoRouteEstimates` structs
//!
//! # Error Handling
//!
//! Functions that can fail return an EcoRouteResult code:
//! - 0: Success
//! - 1: Invalid parameter
//! - 2: Unknown error

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use once_cell::sync::Lazy;
use tokio::runtime::Runtime;

use crate::{
    distance_km, estimate_routes, format_duration, select_eco_friendly, Coordinate,
    GeocoderConfig, ModeEstimate, RoutePlanner, TravelMode,
};

/// Global async runtime for C FFI calls that resolve place names
static RUNTIME: Lazy<Option<Runtime>> = Lazy::new(|| Runtime::new().ok());

/// Result codes for C FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcoRouteResult {
    Success = 0,
    InvalidParameter = 1,
    UnknownError = 2,
}

/// Estimate for one travel mode
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EcoRouteModeEstimate {
    pub distance_km: f64,
    pub duration_min: u32,
    pub emissions_kg: f64,
}

impl From<&ModeEstimate> for EcoRouteModeEstimate {
    fn from(estimate: &ModeEstimate) -> Self {
        Self {
            distance_km: estimate.distance_km,
            duration_min: estimate.duration_min,
            emissions_kg: estimate.emissions_kg,
        }
    }
}

/// Estimates for every mode in the order car, bus, bike, walk
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EcoRouteEstimates {
    pub modes: [EcoRouteModeEstimate; 4],
    /// Index into `modes` of the eco-friendly choice
    pub eco_mode: u32,
}

fn fill(out: *mut EcoRouteEstimates, estimates: &[ModeEstimate]) -> EcoRouteResult {
    let Some(eco) = select_eco_friendly(estimates) else {
        return EcoRouteResult::UnknownError;
    };
    let Some(eco_mode) = TravelMode::ALL.iter().position(|mode| *mode == eco) else {
        return EcoRouteResult::UnknownError;
    };

    let mut filled = EcoRouteEstimates {
        eco_mode: eco_mode as u32,
        ..Default::default()
    };
    for (slot, estimate) in filled.modes.iter_mut().zip(estimates) {
        *slot = estimate.into();
    }

    unsafe { *out = filled };
    EcoRouteResult::Success
}

/// Estimate every travel mode between two coordinates
///
/// # Parameters
/// - `src_lat`, `src_lng`: Source coordinate in degrees
/// - `dst_lat`, `dst_lng`: Destination coordinate in degrees
/// - `out`: Caller-owned struct receiving the estimates
///
/// # Returns
/// EcoRouteResult code; `out` is untouched unless the result is Success
#[no_mangle]
pub extern "C" fn ecoroute_estimate(
    src_lat: f64,
    src_lng: f64,
    dst_lat: f64,
    dst_lng: f64,
    out: *mut EcoRouteEstimates,
) -> EcoRouteResult {
    if out.is_null() {
        return EcoRouteResult::InvalidParameter;
    }

    let from = Coordinate::new(src_lat, src_lng);
    let to = Coordinate::new(dst_lat, dst_lng);
    if !from.is_finite() || !to.is_finite() {
        return EcoRouteResult::InvalidParameter;
    }

    fill(out, &estimate_routes(from, to))
}

/// Resolve two place names (or "lat, lng" literals) and estimate every mode
///
/// Uses the geocoding service when `MAPBOX_ACCESS_TOKEN` is set, otherwise
/// the built-in catalog.
///
/// # Returns
/// InvalidParameter for null/non-UTF-8 strings or places that cannot be resolved,
/// UnknownError when the geocoding service failed
#[no_mangle]
pub extern "C" fn ecoroute_compare(
    source: *const c_char,
    destination: *const c_char,
    out: *mut EcoRouteEstimates,
) -> EcoRouteResult {
    if source.is_null() || destination.is_null() || out.is_null() {
        return EcoRouteResult::InvalidParameter;
    }

    let (Ok(source), Ok(destination)) = (
        unsafe { CStr::from_ptr(source) }.to_str(),
        unsafe { CStr::from_ptr(destination) }.to_str(),
    ) else {
        return EcoRouteResult::InvalidParameter;
    };

    let planner = RoutePlanner::new(GeocoderConfig::from_env());
    plan_into(&planner, source, destination, out)
}

fn plan_into(
    planner: &RoutePlanner,
    source: &str,
    destination: &str,
    out: *mut EcoRouteEstimates,
) -> EcoRouteResult {
    let Some(runtime) = RUNTIME.as_ref() else {
        return EcoRouteResult::UnknownError;
    };

    match runtime.block_on(planner.plan(source, destination)) {
        Ok(result) => fill(out, &result.modes),
        Err(e) if e.is_service_failure() => EcoRouteResult::UnknownError,
        Err(_) => EcoRouteResult::InvalidParameter,
    }
}

/// Great-circle distance in kilometres between two coordinates
#[no_mangle]
pub extern "C" fn ecoroute_distance_km(
    src_lat: f64,
    src_lng: f64,
    dst_lat: f64,
    dst_lng: f64,
) -> f64 {
    distance_km(
        Coordinate::new(src_lat, src_lng),
        Coordinate::new(dst_lat, dst_lng),
    )
}

/// Format a duration in minutes as "Ym" or "Xh Ym"
///
/// # Returns
/// Allocated string that must be freed with `ecoroute_free_string()`, or NULL on error
#[no_mangle]
pub extern "C" fn ecoroute_format_duration(minutes: u32) -> *mut c_char {
    match CString::new(format_duration(minutes)) {
        Ok(c_string) => c_string.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Free a string allocated by the library
///
/// # Parameters
/// - `ptr`: String pointer returned by library functions
#[no_mangle]
pub extern "C" fn ecoroute_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            drop(CString::from_raw(ptr));
        }
    }
}

/// Get library version string
///
/// # Returns
/// Static string with version information (does not need to be freed)
#[no_mangle]
pub extern "C" fn ecoroute_version() -> *const c_char {
    static VERSION_STRING: Lazy<CString> = Lazy::new(|| {
        CString::new(format!("ecoroute {}", env!("ECOROUTE_VERSION"))).unwrap_or_default()
    });
    VERSION_STRING.as_ptr()
}
