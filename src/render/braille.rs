//! Monochrome dot-matrix rendering with braille characters.
//!
//! Each braille codepoint carries a 2x4 dot block, so a character cell
//! shows 8 binary pixels. The raster is first reduced to a two-color
//! palette with dithering, then packed block by block.

use crate::raster::Raster;

use super::quantize;

/// Empty braille pattern (U+2800).
pub const BRAILLE_BASE: char = '\u{2800}';

/// By default dots mark the darker of the two quantized colors, so light
/// backgrounds come out as sparse dots. Flipping this inks the lighter
/// color instead, which can read better on dark terminals.
pub const DEFAULT_DARK_DOTS: bool = true;

/// Pack a 2x4 dot block into one braille character.
///
/// Bits are assigned in column-major order: the left column top to
/// bottom takes bits 0..3, the right column takes bits 4..7. The
/// codepoint is `0x2800 + value`, so an all-ink block is U+28FF and an
/// empty block is U+2800.
pub fn pack_block(block: [[bool; 4]; 2]) -> char {
    let mut value = 0u32;
    for (column, dots) in block.iter().enumerate() {
        for (row, &dot) in dots.iter().enumerate() {
            if dot {
                value |= 1 << (column * 4 + row);
            }
        }
    }
    char::from_u32(BRAILLE_BASE as u32 + value).unwrap_or(BRAILLE_BASE)
}

/// Render a raster as lines of braille characters.
///
/// `dots` should be twice the character grid width and four times its
/// height; trailing pixels that do not fill a whole 2x4 block are
/// dropped. `dark_dots` selects which quantized color gets inked.
pub(crate) fn render(dots: &Raster, dark_dots: bool) -> Vec<String> {
    let columns = dots.width() / 2;
    let rows = dots.height() / 4;
    if columns == 0 || rows == 0 {
        return Vec::new();
    }

    let palette = quantize::two_color_palette(dots);
    let is_dark = quantize::dither(dots, &palette);
    let width = dots.width() as usize;

    let mut lines = Vec::with_capacity(rows as usize);
    for cy in 0..rows {
        let mut line = String::with_capacity(columns as usize * 3);
        for cx in 0..columns {
            let mut block = [[false; 4]; 2];
            for (column, dots_out) in block.iter_mut().enumerate() {
                for (row, dot) in dots_out.iter_mut().enumerate() {
                    let px = cx as usize * 2 + column;
                    let py = cy as usize * 4 + row;
                    let ink = is_dark[py * width + px];
                    *dot = if dark_dots { ink } else { !ink };
                }
            }
            line.push(pack_block(block));
        }
        lines.push(line);
    }
    lines
}
