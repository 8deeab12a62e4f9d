//! Shared utilities for the carousel engine.
//!
//! Frame timing and the small matrix helpers the scene layer builds
//! instance transforms from.

/// Frame clock with delta clamping and 60 fps time scaling.
pub mod frame_timing;
/// Matrix construction helpers.
pub mod transform;
