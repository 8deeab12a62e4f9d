/// Glyph bitmap height in cells.
pub const ROWS: u32 = 7;
/// Glyph bitmap width in cells.
pub const COLS: u32 = 5;

/// Row-packed 5x7 bitmaps, most significant bit = top-left cell. The
/// digit groups read as glyph rows, top to bottom.
#[allow(clippy::unusual_byte_groupings)]
fn mask(c: char) -> u64 {
    match c {
        '0' => 0b01110_10001_10011_10101_11001_10001_01110,
        '1' => 0b00100_01100_00100_00100_00100_00100_01110,
        '2' => 0b01110_10001_00001_00010_00100_01000_11111,
        '3' => 0b11111_00010_00100_00010_00001_10001_01110,
        '4' => 0b00010_00110_01010_10010_11111_00010_00010,
        '5' => 0b11111_10000_11110_00001_00001_10001_01110,
        '6' => 0b00110_01000_10000_11110_10001_10001_01110,
        '7' => 0b11111_00001_00010_00100_01000_01000_01000,
        '8' => 0b01110_10001_10001_01110_10001_10001_01110,
        '9' => 0b01110_10001_10001_01111_00001_00010_01100,
        'I' => 0b01110_00100_00100_00100_00100_00100_01110,
        'M' => 0b10001_11011_10101_10101_10001_10001_10001,
        'A' => 0b01110_10001_10001_11111_10001_10001_10001,
        'G' => 0b01110_10001_10000_10111_10001_10001_01111,
        'E' => 0b11111_10000_10000_11110_10000_10000_11111,
        _ => 0,
    }
}

fn bit(mask: u64, col: u32, row: u32) -> bool {
    (mask >> (34 - (row * COLS + col))) & 1 == 1
}

/// Width in pixels of `text` rendered `height` pixels tall, including
/// one cell of spacing between characters.
#[must_use]
pub fn text_width(text: &str, height: f32) -> f32 {
    let scale = height / ROWS as f32;
    let n = text.chars().count() as f32;
    if n == 0.0 {
        0.0
    } else {
        (n * (COLS + 1) as f32 - 1.0) * scale
    }
}

/// Rasterize `text` centered on `(center_x, center_y)` at `height`
/// pixels tall, calling `put` for every covered pixel. Pixels are
/// sampled at their centers, so coverage is binary. Bounds checking is
/// the caller's job; coordinates may be negative near canvas edges.
pub fn raster_text(
    text: &str,
    center_x: f32,
    center_y: f32,
    height: f32,
    mut put: impl FnMut(i32, i32),
) {
    let scale = height / ROWS as f32;
    let width = text_width(text, height);
    if width <= 0.0 || scale <= 0.0 {
        return;
    }
    let glyphs: Vec<u64> = text.chars().map(mask).collect();
    let advance = (COLS + 1) as f32;

    let left = center_x - width / 2.0;
    let top = center_y - height / 2.0;
    let x0 = left.floor() as i32;
    let x1 = (left + width).ceil() as i32;
    let y0 = top.floor() as i32;
    let y1 = (top + height).ceil() as i32;

    for py in y0..y1 {
        let v = (py as f32 + 0.5 - top) / scale;
        if v < 0.0 || v >= ROWS as f32 {
            continue;
        }
        let row = v as u32;

        for px in x0..x1 {
            let u = (px as f32 + 0.5 - left) / scale;
            if u < 0.0 {
                continue;
            }
            let idx = (u / advance) as usize;
            if idx >= glyphs.len() {
                continue;
            }
            let within = u - idx as f32 * advance;
            if within >= COLS as f32 {
                continue;
            }
            if bit(glyphs[idx], within as u32, row) {
                put(px, py);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str, cx: f32, cy: f32, height: f32) -> Vec<(i32, i32)> {
        let mut pixels = Vec::new();
        raster_text(text, cx, cy, height, |x, y| pixels.push((x, y)));
        pixels
    }

    #[test]
    fn digit_one_matches_its_bitmap_at_unit_scale() {
        // Centered so the glyph box starts exactly at the origin.
        let pixels = collect("1", 2.5, 3.5, 7.0);
        assert_eq!(pixels.len(), 10);
        assert!(pixels.contains(&(2, 0)));
        assert!(pixels.contains(&(1, 1)));
        assert!(pixels.contains(&(2, 3)));
        assert!(pixels.contains(&(1, 6)));
        assert!(pixels.contains(&(3, 6)));
        assert!(!pixels.contains(&(0, 6)));
    }

    #[test]
    fn characters_are_separated_by_a_blank_column() {
        // "11" spans 11 cells; column 5 is the spacing column.
        let pixels = collect("11", 5.5, 3.5, 7.0);
        assert!(pixels.iter().all(|&(x, _)| x != 5));
        assert!(pixels.iter().any(|&(x, _)| x < 5));
        assert!(pixels.iter().any(|&(x, _)| x > 5));
    }

    #[test]
    fn width_accounts_for_spacing() {
        let scale = 96.0 / 7.0;
        assert!((text_width("123", 96.0) - 17.0 * scale).abs() < 1e-4);
        assert_eq!(text_width("", 96.0), 0.0);
    }

    #[test]
    fn unsupported_characters_render_blank() {
        assert!(collect("?", 2.5, 3.5, 7.0).is_empty());
    }

    #[test]
    fn scaling_multiplies_coverage() {
        // At 2x scale every glyph cell becomes a 2x2 pixel block.
        let pixels = collect("1", 5.0, 7.0, 14.0);
        assert_eq!(pixels.len(), 40);
    }
}
