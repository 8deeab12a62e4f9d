//! Procedural meshes for the carousel: the subdivided icosahedron that
//! anchors one disc instance per vertex, and the fan-triangulated disc
//! stamped at each anchor.
//!
//! Meshes are built once at startup and immutable afterwards.

/// Indexed triangle mesh plus the icosahedron and disc constructors.
pub mod mesh;

pub use mesh::{Face, Mesh, Vertex};
