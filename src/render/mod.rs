//! Raster-to-glyph rendering pipeline.
//!
//! Converts a decoded RGB thumbnail into printable terminal lines:
//!
//! 1. **Geometry** - derive the character grid from the raster size
//! 2. **Contrast** - autocontrast stretch blended by a strength factor
//! 3. **Cells** - half-block color cells with ANSI truecolor escapes, or
//!    dithered braille dot blocks in monochrome mode
//!
//! The pipeline is pure computation over an in-memory raster: nothing
//! blocks, nothing is cached, and concurrent renders over separate
//! rasters need no coordination.

pub mod braille;
pub mod color;
pub mod contrast;
pub mod geometry;
pub mod quantize;

use crate::raster::Raster;

/// Knobs for one render call.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit ANSI truecolor half blocks; braille dots when false.
    pub color: bool,
    /// Autocontrast blend strength in [0, 1]; out-of-range is clamped.
    pub contrast: f32,
    /// Terminal cell aspect correction factor.
    pub aspect: f32,
    /// Bias multiplier in the half-block glyph decision.
    pub vertical_bias: f32,
    /// Braille polarity: ink the darker quantized color.
    pub dark_dots: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color: true,
            contrast: 0.25,
            aspect: geometry::DEFAULT_ASPECT,
            vertical_bias: color::DEFAULT_VERTICAL_BIAS,
            dark_dots: braille::DEFAULT_DARK_DOTS,
        }
    }
}

/// Render a thumbnail raster to terminal lines.
///
/// Returns one printable string per output row. In color mode lines
/// contain ANSI escape sequences and every line leaves the terminal
/// colors reset; in monochrome mode lines are plain braille characters.
/// A raster too small for even one character cell yields no lines.
///
/// Stripped of escapes, every line holds exactly as many glyphs as the
/// grid has columns, and the number of lines equals the grid rows.
pub fn render(raster: &Raster, options: &RenderOptions) -> Vec<String> {
    let (columns, rows) =
        geometry::grid_for_thumbnail(raster.width(), raster.height(), options.aspect);
    if columns == 0 || rows == 0 {
        return Vec::new();
    }

    let adjusted = contrast::apply(raster, options.contrast);

    if options.color {
        let coarse = adjusted.resize(columns, rows * 2);
        let fine = adjusted.resize(columns * 2, rows);
        color::render(&coarse, &fine, options.vertical_bias)
    } else {
        let dots = adjusted.resize(
            columns * geometry::CELL_DOT_WIDTH,
            rows * geometry::CELL_DOT_HEIGHT,
        );
        braille::render(&dots, options.dark_dots)
    }
}
