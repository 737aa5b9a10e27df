//! CLI-specific utilities for ecoroute
//!
//! This module contains code specific to the command-line interface,
//! separate from the core library functionality.

pub mod export;
pub mod progress;
pub mod render;
pub mod session;

pub use export::OverwriteBehavior;
pub use progress::ProgressManager;
pub use session::Session;
