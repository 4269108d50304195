//! HUD captions drawn with the `font8x8` bitmap glyphs.
//!
//! ASCII comes from the basic set and the degree sign from the Latin-1 set;
//! anything else renders as `?`.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgb, RgbImage};
use imageproc::{drawing::draw_filled_rect_mut, rect::Rect};

/// Glyph cell edge in unscaled pixels; also the horizontal advance.
const CELL: u32 = 8;

fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width in pixels of `text` rendered at `scale`.
pub fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * CELL * scale.max(1)
}

/// Height in pixels of a line rendered at `scale`.
pub fn text_height(scale: u32) -> u32 {
    CELL * scale.max(1)
}

/// Draws `text` with its baseline at `y`. Pixels falling outside the image
/// are clipped.
pub fn draw_text(image: &mut RgbImage, x: i32, y: i32, text: &str, scale: u32, color: Rgb<u8>) {
    let scale = scale.max(1);
    let top = y - text_height(scale) as i32;

    for (index, c) in text.chars().enumerate() {
        let origin_x = x + (index as u32 * CELL * scale) as i32;
        for (row, bits) in glyph(c).iter().enumerate() {
            // Bit 0 is the leftmost column.
            for col in 0..CELL {
                if (bits >> col) & 1 == 0 {
                    continue;
                }
                let px = origin_x + (col * scale) as i32;
                let py = top + (row as u32 * scale) as i32;
                draw_filled_rect_mut(image, Rect::at(px, py).of_size(scale, scale), color);
            }
        }
    }
}

/// Draws `text` horizontally centred on `center_x`.
pub fn draw_text_centered(
    image: &mut RgbImage,
    center_x: i32,
    y: i32,
    text: &str,
    scale: u32,
    color: Rgb<u8>,
) {
    let x = center_x - (text_width(text, scale) / 2) as i32;
    draw_text(image, x, y, text, scale, color);
}
