//! Camera for the carousel scene.
//!
//! A fixed-target perspective camera that only dollies along +Z; all
//! apparent rotation comes from spinning the sphere itself.

/// Core camera struct and projection framing.
pub mod core;

pub use core::MenuCamera;
