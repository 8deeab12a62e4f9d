use image::{Rgba, RgbaImage};

use super::glyphs;
use super::layout::AtlasLayout;

/// Black overlay strength applied to every thumbnail cell.
const OVERLAY_ALPHA: f32 = 0.4;
/// Background alpha of a label cell.
const LABEL_BACKGROUND_ALPHA: f32 = 0.7;
/// Alpha of the label numeral.
const LABEL_TEXT_ALPHA: f32 = 0.9;
/// Numeral height as a fraction of the cell edge (96 px at 512).
const LABEL_TEXT_HEIGHT: f32 = 96.0 / 512.0;

const PLACEHOLDER_SIZE: u32 = 512;
const PLACEHOLDER_TEXT_HEIGHT: f32 = 48.0;
const PLACEHOLDER_GRAY: u8 = 0x33;

/// The tile drawn for items whose image is missing or failed to load:
/// a dark gray square with the word IMAGE across the middle.
#[must_use]
pub fn placeholder_thumbnail() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(
        PLACEHOLDER_SIZE,
        PLACEHOLDER_SIZE,
        Rgba([PLACEHOLDER_GRAY, PLACEHOLDER_GRAY, PLACEHOLDER_GRAY, 255]),
    );
    let center = PLACEHOLDER_SIZE as f32 / 2.0;
    draw_text(
        &mut img,
        "IMAGE",
        center,
        center,
        PLACEHOLDER_TEXT_HEIGHT,
        [1.0, 1.0, 1.0, 1.0],
    );
    img
}

/// Pack item thumbnails into the atlas grid.
///
/// Each source is center-cropped to a square, resized to the cell
/// edge, then darkened by the overlay so labels stay readable. `None`
/// sources use the placeholder. Sources beyond the grid capacity are
/// dropped; the shader clamps their cell index to the last cell.
#[must_use]
pub fn compose_thumbnails(
    layout: &AtlasLayout,
    sources: &[Option<&RgbaImage>],
) -> RgbaImage {
    let size = layout.texture_size();
    let mut atlas = RgbaImage::new(size, size);
    let placeholder = placeholder_thumbnail();

    let count = (sources.len() as u32).min(layout.max_cells());
    for i in 0..count {
        let source = sources[i as usize].unwrap_or(&placeholder);
        let mut cell = cover_cell(source, layout.cell_size);
        for px in cell.pixels_mut() {
            blend_over(px, [0.0, 0.0, 0.0, OVERLAY_ALPHA]);
        }

        let (x0, y0) = layout.cell_origin(i);
        for (x, y, px) in cell.enumerate_pixels() {
            atlas.put_pixel(x0 + x, y0 + y, *px);
        }
    }
    atlas
}

/// Paint the numeral cells sampled by the label pass: a translucent
/// dark square per item with its 1-based index centered in white.
#[must_use]
pub fn compose_labels(layout: &AtlasLayout, item_count: usize) -> RgbaImage {
    let size = layout.texture_size();
    let mut atlas = RgbaImage::new(size, size);
    let cell = layout.cell_size;
    let background_alpha = (LABEL_BACKGROUND_ALPHA * 255.0).round() as u8;
    let text_height = cell as f32 * LABEL_TEXT_HEIGHT;

    let count = (item_count as u32).min(layout.max_cells());
    for i in 0..count {
        let (x0, y0) = layout.cell_origin(i);
        fill_rect(
            &mut atlas,
            x0,
            y0,
            cell,
            cell,
            Rgba([0, 0, 0, background_alpha]),
        );
        draw_text(
            &mut atlas,
            &(i + 1).to_string(),
            x0 as f32 + cell as f32 / 2.0,
            y0 as f32 + cell as f32 / 2.0,
            text_height,
            [1.0, 1.0, 1.0, LABEL_TEXT_ALPHA],
        );
    }
    atlas
}

/// Object-cover fit: central square crop, then resize to the cell.
fn cover_cell(source: &RgbaImage, cell_size: u32) -> RgbaImage {
    let (w, h) = source.dimensions();
    if w == 0 || h == 0 {
        return RgbaImage::new(cell_size, cell_size);
    }

    let side = w.min(h);
    let x0 = (w - side) / 2;
    let y0 = (h - side) / 2;
    let cropped = image::imageops::crop_imm(source, x0, y0, side, side);
    image::imageops::resize(
        &cropped.to_image(),
        cell_size,
        cell_size,
        image::imageops::FilterType::Triangle,
    )
}

fn fill_rect(
    img: &mut RgbaImage,
    x0: u32,
    y0: u32,
    w: u32,
    h: u32,
    color: Rgba<u8>,
) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, color);
        }
    }
}

fn draw_text(
    img: &mut RgbaImage,
    text: &str,
    center_x: f32,
    center_y: f32,
    height: f32,
    color: [f32; 4],
) {
    let (w, h) = img.dimensions();
    glyphs::raster_text(text, center_x, center_y, height, |x, y| {
        if x >= 0 && y >= 0 && (x as u32) < w && (y as u32) < h {
            blend_over(img.get_pixel_mut(x as u32, y as u32), color);
        }
    });
}

/// Non-premultiplied source-over blend of an f32 color onto a pixel.
fn blend_over(dst: &mut Rgba<u8>, src: [f32; 4]) {
    let sa = src[3];
    let da = f32::from(dst.0[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        dst.0 = [0, 0, 0, 0];
        return;
    }

    for c in 0..3 {
        let sc = src[c];
        let dc = f32::from(dst.0[c]) / 255.0;
        let oc = (sc * sa + dc * da * (1.0 - sa)) / out_a;
        dst.0[c] = (oc * 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> AtlasLayout {
        AtlasLayout {
            grid_edge: 2,
            cell_size: 64,
        }
    }

    #[test]
    fn placeholder_is_gray_with_white_text() {
        let img = placeholder_thumbnail();
        assert_eq!(img.dimensions(), (512, 512));
        assert_eq!(*img.get_pixel(0, 0), Rgba([0x33, 0x33, 0x33, 255]));
        // The center of IMAGE falls inside the crossbar of the A.
        assert_eq!(*img.get_pixel(256, 256), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn thumbnail_cells_are_darkened_by_the_overlay() {
        let layout = AtlasLayout {
            grid_edge: 1,
            cell_size: 64,
        };
        let source = RgbaImage::from_pixel(128, 128, Rgba([200, 100, 50, 255]));
        let atlas = compose_thumbnails(&layout, &[Some(&source)]);
        assert_eq!(atlas.dimensions(), (64, 64));
        assert_eq!(*atlas.get_pixel(10, 10), Rgba([120, 60, 30, 255]));
    }

    #[test]
    fn missing_source_uses_the_placeholder() {
        let layout = AtlasLayout {
            grid_edge: 1,
            cell_size: 64,
        };
        let atlas = compose_thumbnails(&layout, &[None]);
        // Placeholder gray through the 40% overlay.
        assert_eq!(*atlas.get_pixel(0, 0), Rgba([31, 31, 31, 255]));
    }

    #[test]
    fn wide_source_is_center_cropped() {
        let layout = AtlasLayout {
            grid_edge: 1,
            cell_size: 64,
        };
        let mut source = RgbaImage::new(128, 64);
        for (x, _, px) in source.enumerate_pixels_mut() {
            *px = if x < 64 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            };
        }
        let atlas = compose_thumbnails(&layout, &[Some(&source)]);
        // The crop keeps the central square, half red half blue.
        assert_eq!(*atlas.get_pixel(4, 32), Rgba([153, 0, 0, 255]));
        assert_eq!(*atlas.get_pixel(60, 32), Rgba([0, 0, 153, 255]));
    }

    #[test]
    fn labels_number_cells_and_leave_the_rest_transparent() {
        let atlas = compose_labels(&small_layout(), 3);
        assert_eq!(atlas.dimensions(), (128, 128));
        // Cell background.
        assert_eq!(*atlas.get_pixel(1, 1), Rgba([0, 0, 0, 178]));
        // Center of cell 0 sits on the stem of the numeral 1.
        assert_eq!(*atlas.get_pixel(32, 32), Rgba([237, 237, 237, 247]));
        // Fourth cell has no item and stays transparent.
        assert_eq!(*atlas.get_pixel(65, 65), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn overflow_sources_are_dropped() {
        let layout = AtlasLayout {
            grid_edge: 1,
            cell_size: 16,
        };
        let sources: Vec<Option<&RgbaImage>> = vec![None, None, None];
        let atlas = compose_thumbnails(&layout, &sources);
        assert_eq!(atlas.dimensions(), (16, 16));
    }
}
