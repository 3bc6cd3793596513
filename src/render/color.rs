//! Half-block color cell rendering with ANSI truecolor escapes.
//!
//! Every character cell shows two colors. Two candidate glyphs compete:
//! the lower half block `▄` splits the cell horizontally (top/bottom
//! colors from a coarse sampling grid), the right half block `▐` splits
//! it vertically (left/right colors from a grid with double horizontal
//! and half vertical resolution). A perceptual distance heuristic picks
//! the candidate per cell.

use crate::raster::{Raster, Rgb};

/// Lower half block: foreground paints the bottom of the cell.
pub const LOWER_HALF_BLOCK: char = '\u{2584}';

/// Right half block: foreground paints the right of the cell.
pub const RIGHT_HALF_BLOCK: char = '\u{2590}';

/// Resets foreground and background to terminal defaults.
pub const RESET_COLORS: &str = "\x1b[39m\x1b[49m";

/// Perceptual channel weights for squared color distance.
pub const LUMA_WEIGHTS: [f32; 3] = [0.30, 0.59, 0.11];

/// How much larger the top/bottom color distance must be than the
/// left/right distance before the vertical-split glyph is preferred.
/// The horizontal glyph usually reads smoother even though it carries
/// less horizontal color resolution, hence the strong bias toward it.
pub const DEFAULT_VERTICAL_BIAS: f32 = 4.0;

/// One rendered color cell: a half-block glyph plus its two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorCell {
    pub glyph: char,
    pub background: Rgb,
    pub foreground: Rgb,
}

impl ColorCell {
    /// The ANSI truecolor prefix emitted before the glyph:
    /// `ESC[48;2;r;g;bm` (background) then `ESC[38;2;r;g;bm` (foreground).
    pub fn escape_prefix(&self) -> String {
        format!(
            "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m",
            self.background.r,
            self.background.g,
            self.background.b,
            self.foreground.r,
            self.foreground.g,
            self.foreground.b,
        )
    }
}

/// Tracks the last emitted escape prefix within one output row so that
/// runs of identically colored cells emit their escape bytes only once.
#[derive(Debug, Default)]
struct RenderState {
    last: Option<String>,
}

impl RenderState {
    /// Append `cell` to `line`, suppressing the escape prefix when it
    /// matches the previous cell's exactly.
    fn emit(&mut self, line: &mut String, cell: &ColorCell) {
        let prefix = cell.escape_prefix();
        if self.last.as_deref() != Some(prefix.as_str()) {
            line.push_str(&prefix);
            self.last = Some(prefix);
        }
        line.push(cell.glyph);
    }
}

/// Weighted squared distance between two colors.
pub fn color_distance(a: Rgb, b: Rgb) -> f32 {
    let dr = a.r as f32 - b.r as f32;
    let dg = a.g as f32 - b.g as f32;
    let db = a.b as f32 - b.b as f32;
    dr * dr * LUMA_WEIGHTS[0] + dg * dg * LUMA_WEIGHTS[1] + db * db * LUMA_WEIGHTS[2]
}

/// Pick the better glyph for one cell.
///
/// The vertical-split glyph wins only when the top/bottom distance
/// exceeds `bias` times the left/right distance; ties keep the
/// horizontal glyph.
pub fn choose_cell(top: Rgb, bottom: Rgb, left: Rgb, right: Rgb, bias: f32) -> ColorCell {
    let hdist = color_distance(top, bottom);
    let vdist = color_distance(left, right);
    if hdist <= vdist * bias {
        ColorCell {
            glyph: LOWER_HALF_BLOCK,
            background: top,
            foreground: bottom,
        }
    } else {
        ColorCell {
            glyph: RIGHT_HALF_BLOCK,
            background: left,
            foreground: right,
        }
    }
}

/// Render the color glyph grid.
///
/// `coarse` must be `columns` x `rows * 2` pixels (one vertical 2-pixel
/// strip per cell); `fine` must be `columns * 2` x `rows` pixels (one
/// horizontal 2-pixel strip per cell). Produces one string per output
/// row; every row ends with [`RESET_COLORS`] so color never bleeds into
/// following terminal content.
pub(crate) fn render(coarse: &Raster, fine: &Raster, bias: f32) -> Vec<String> {
    let columns = coarse.width();
    let rows = coarse.height() / 2;
    debug_assert!(fine.width() >= columns * 2 && fine.height() >= rows);

    let mut lines = Vec::with_capacity(rows as usize);
    for cy in 0..rows {
        let mut line = String::new();
        let mut state = RenderState::default();
        for cx in 0..columns {
            let top = coarse.pixel(cx, cy * 2);
            let bottom = coarse.pixel(cx, cy * 2 + 1);
            let left = fine.pixel(cx * 2, cy);
            let right = fine.pixel(cx * 2 + 1, cy);
            let cell = choose_cell(top, bottom, left, right, bias);
            state.emit(&mut line, &cell);
        }
        line.push_str(RESET_COLORS);
        lines.push(line);
    }
    lines
}
