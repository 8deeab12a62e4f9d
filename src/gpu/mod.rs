//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, atlas and depth textures,
//! and shader composition.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Atlas and depth texture abstractions.
pub mod texture;
