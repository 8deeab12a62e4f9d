use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Texture atlas sizing parameters.
pub struct AtlasOptions {
    /// Preferred cell edge in pixels.
    pub cell_size: u32,
    /// Upper bound on cells per atlas row/column.
    pub max_grid_edge: u32,
    /// Lower bound on the cell edge after clamping to device limits.
    pub min_cell_size: u32,
}

impl Default for AtlasOptions {
    fn default() -> Self {
        Self {
            cell_size: 512,
            max_grid_edge: 4,
            min_cell_size: 256,
        }
    }
}
