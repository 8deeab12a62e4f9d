// ---- Lints --------------------------------------------------------------
// Crate-wide lint policy; numeric thresholds live in clippy.toml.

// Lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Docs build clean or not at all
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// Library code propagates errors instead of panicking
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No leftover debugging
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Imports
#![deny(clippy::wildcard_imports)]
// Complexity ceilings
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Signatures
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clones
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Strings
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo metadata (warn only; transitive duplicates are not actionable)
#![warn(clippy::cargo)]
// Dead or ignored values
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Casts
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated spherical project carousel built on wgpu.
//!
//! Sphaira lays project tiles out on a rotatable 3D sphere: each vertex
//! of a subdivided icosahedron anchors one instanced disc showing a
//! thumbnail, with numeral labels blended over while the sphere spins.
//! Dragging rotates the sphere through a virtual-trackball control with
//! inertia; at rest it snaps the nearest disc toward the camera and
//! reports it as the active item.
//!
//! # Key entry points
//!
//! - [`engine::MenuEngine`] - the main engine driving input, simulation,
//!   and rendering
//! - [`items::MenuItem`] - what each tile shows and where it links
//! - [`options::MenuOptions`] - runtime configuration (camera, control
//!   feel, layout, atlas sizing)
//! - [`engine::MenuCallbacks`] - host notifications for movement and
//!   active-item changes
//!
//! # Architecture
//!
//! The engine runs a background [`atlas::loader::AtlasLoader`] thread
//! that fetches thumbnails and composes the texture atlases off the main
//! thread, delivering finished pixels via a lock-free triple buffer. The
//! main thread rebuilds per-disc instance matrices each frame and draws
//! every disc in a single instanced pass.

pub mod atlas;
pub mod camera;
pub mod control;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod input;
pub mod items;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
