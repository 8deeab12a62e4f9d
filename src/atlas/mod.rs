//! Thumbnail and label atlas construction.
//!
//! Item images are fetched and composed into two square atlas textures
//! on a background thread: one holding cover-cropped, darkened
//! thumbnails and one holding the numeral labels blended over them at
//! draw time. The main thread polls for finished pixels and uploads
//! them.

/// CPU-side atlas painting.
pub mod compose;
/// Bitmap numerals and letters for label cells.
pub mod glyphs;
/// Grid placement math.
pub mod layout;
/// Background fetch/compose thread.
pub mod loader;

pub use layout::AtlasLayout;
pub use loader::{AtlasLoader, AtlasRequest, PreparedAtlas};
