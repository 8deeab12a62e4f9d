//! Rendering subsystems for the carousel.
//!
//! Contains the instanced disc renderer that draws one textured tile per
//! sphere vertex.

pub mod disc;
