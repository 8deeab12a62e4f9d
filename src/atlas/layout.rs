use crate::options::AtlasOptions;

/// Conservative texture edge most devices handle without fallback
/// paths.
const MAX_SUPPORTED_SIZE: u32 = 2048;

/// Square grid placement for item cells inside one atlas texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtlasLayout {
    /// Cells per row and per column.
    pub grid_edge: u32,
    /// Cell edge in pixels.
    pub cell_size: u32,
}

impl AtlasLayout {
    /// Choose a grid for `item_count` items on a device whose textures
    /// may be at most `max_texture_dimension` wide.
    ///
    /// The grid edge grows with `ceil(sqrt(n))` up to the configured
    /// cap; when the resulting texture would exceed what the device
    /// supports, the cell shrinks instead, never below the configured
    /// minimum.
    #[must_use]
    pub fn for_items(
        item_count: usize,
        options: &AtlasOptions,
        max_texture_dimension: u32,
    ) -> Self {
        let count = item_count.max(1) as f64;
        let grid_edge =
            (count.sqrt().ceil() as u32).min(options.max_grid_edge).max(1);

        let supported = max_texture_dimension.min(MAX_SUPPORTED_SIZE);
        let mut cell_size = options.cell_size;
        if grid_edge * cell_size > supported {
            cell_size = (supported / grid_edge).max(options.min_cell_size);
        }

        Self {
            grid_edge,
            cell_size,
        }
    }

    /// Edge of the square atlas texture in pixels.
    #[must_use]
    pub fn texture_size(&self) -> u32 {
        self.grid_edge * self.cell_size
    }

    /// Number of cells the grid can hold.
    #[must_use]
    pub fn max_cells(&self) -> u32 {
        self.grid_edge * self.grid_edge
    }

    /// Pixel origin of the cell for `index`, row-major from the top
    /// left.
    #[must_use]
    pub fn cell_origin(&self, index: u32) -> (u32, u32) {
        (
            (index % self.grid_edge) * self.cell_size,
            (index / self.grid_edge) * self.cell_size,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout_for(n: usize) -> AtlasLayout {
        AtlasLayout::for_items(n, &AtlasOptions::default(), 4096)
    }

    #[test]
    fn grid_edge_tracks_sqrt_of_item_count() {
        assert_eq!(layout_for(1).grid_edge, 1);
        assert_eq!(layout_for(2).grid_edge, 2);
        assert_eq!(layout_for(4).grid_edge, 2);
        assert_eq!(layout_for(5).grid_edge, 3);
        assert_eq!(layout_for(9).grid_edge, 3);
        assert_eq!(layout_for(10).grid_edge, 4);
        assert_eq!(layout_for(16).grid_edge, 4);
    }

    #[test]
    fn grid_edge_is_capped() {
        assert_eq!(layout_for(17).grid_edge, 4);
        assert_eq!(layout_for(100).grid_edge, 4);
    }

    #[test]
    fn zero_items_still_get_a_cell() {
        let layout = layout_for(0);
        assert_eq!(layout.grid_edge, 1);
        assert_eq!(layout.max_cells(), 1);
    }

    #[test]
    fn small_device_limit_shrinks_cells() {
        let layout = AtlasLayout::for_items(16, &AtlasOptions::default(), 1024);
        assert_eq!(layout.grid_edge, 4);
        assert_eq!(layout.cell_size, 256);
        assert_eq!(layout.texture_size(), 1024);
    }

    #[test]
    fn cell_size_never_drops_below_minimum() {
        let layout = AtlasLayout::for_items(16, &AtlasOptions::default(), 512);
        assert_eq!(layout.cell_size, 256);
    }

    #[test]
    fn cell_origins_walk_row_major() {
        let layout = AtlasLayout {
            grid_edge: 4,
            cell_size: 512,
        };
        assert_eq!(layout.cell_origin(0), (0, 0));
        assert_eq!(layout.cell_origin(3), (1536, 0));
        assert_eq!(layout.cell_origin(4), (0, 512));
        assert_eq!(layout.cell_origin(15), (1536, 1536));
    }
}
