//! # Config Crate
//!
//! Centralized configuration constants for the yurt scene pipeline.
//! All magic numbers and tunable parameters are defined here to ensure
//! consistency across crates and easy configuration management.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_RADIAL_SEGMENTS, PART_NAMES};
//!
//! assert!(PART_NAMES.contains(&"poles"));
//!
//! // Use resolution defaults for tessellation
//! let requested: Option<u32> = None;
//! let segments = requested.unwrap_or(DEFAULT_RADIAL_SEGMENTS);
//! assert_eq!(segments, 32);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Browser-Safe**: No platform-specific values
//! - **three.js Compatible**: Camera, control and segment defaults match three.js

pub mod constants;

#[cfg(test)]
mod tests;
