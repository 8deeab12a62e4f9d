//! Menu item data: what each tile shows and where it links.

/// Item type and JSON list loading.
pub mod catalog;

pub use catalog::{ensure_non_empty, load_items, MenuItem};
