//! Output grid planning: terminal size, thumbnail request size, and the
//! character grid that maps onto a returned thumbnail.

/// Terminal size assumed when the real size cannot be queried.
pub const DEFAULT_TERM_COLS: u16 = 80;
pub const DEFAULT_TERM_ROWS: u16 = 25;

/// Rows kept free below the image for the prompt and the source name.
pub const TERM_ROW_MARGIN: u16 = 2;

/// Corrected terminal cell aspect. Cells are about twice as tall as wide
/// and the renderer samples twice as many dots vertically as horizontally,
/// which cancels out to 1.0.
pub const DEFAULT_ASPECT: f32 = 1.0;

/// Pixels sampled per character cell, horizontally and vertically.
/// Matches the braille dot matrix; color mode derives its two coarser
/// sampling grids from the same footprint.
pub const CELL_DOT_WIDTH: u32 = 2;
pub const CELL_DOT_HEIGHT: u32 = 4;

/// Determine the character grid available for output.
///
/// Explicit overrides win; otherwise the current terminal size is used,
/// with [`TERM_ROW_MARGIN`] rows reserved. Falls back to
/// [`DEFAULT_TERM_COLS`] x [`DEFAULT_TERM_ROWS`] when no terminal is
/// attached. The result is clamped to at least 1x1.
pub fn terminal_grid(width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let (term_cols, term_rows) = crossterm::terminal::size()
        .unwrap_or((DEFAULT_TERM_COLS, DEFAULT_TERM_ROWS));
    let term_rows = term_rows.saturating_sub(TERM_ROW_MARGIN);

    let columns = width.unwrap_or(term_cols as u32).max(1);
    let rows = height.unwrap_or(term_rows as u32).max(1);
    (columns, rows)
}

/// Pixel size to request from the thumbnail provider for a character grid.
///
/// The base request is one dot per sampled pixel; the aspect constant
/// widens or heightens the request so that the pixel aspect ratio matches
/// the assumed 2:1 terminal glyph aspect.
pub fn plan_thumbnail(columns: u32, rows: u32, aspect: f32) -> (u32, u32) {
    let width = columns * CELL_DOT_WIDTH;
    let height = rows * CELL_DOT_HEIGHT;
    if aspect < 1.0 {
        (width, (height as f32 / aspect) as u32)
    } else {
        ((width as f32 * aspect) as u32, height)
    }
}

/// Character grid implied by an actual thumbnail size.
///
/// Providers may return a thumbnail smaller than requested, so the grid is
/// re-derived from what came back. Trailing pixels that do not fill a whole
/// cell are dropped by the integer division.
pub fn grid_for_thumbnail(thumb_width: u32, thumb_height: u32, aspect: f32) -> (u32, u32) {
    if aspect < 1.0 {
        (
            thumb_width / CELL_DOT_WIDTH,
            ((thumb_height as f32 * aspect) as u32) / CELL_DOT_HEIGHT,
        )
    } else {
        (
            ((thumb_width as f32 / aspect) as u32) / CELL_DOT_WIDTH,
            thumb_height / CELL_DOT_HEIGHT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_grid_overrides() {
        assert_eq!(terminal_grid(Some(40), Some(12)), (40, 12));
        let (_, rows) = terminal_grid(Some(40), Some(0));
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_plan_thumbnail_unit_aspect() {
        assert_eq!(plan_thumbnail(80, 23, 1.0), (160, 92));
    }

    #[test]
    fn test_plan_thumbnail_wide_aspect() {
        // aspect > 1 widens the request, height unchanged
        assert_eq!(plan_thumbnail(10, 10, 2.0), (40, 40));
    }

    #[test]
    fn test_plan_thumbnail_tall_aspect() {
        // aspect < 1 heightens the request, width unchanged
        assert_eq!(plan_thumbnail(10, 10, 0.5), (20, 80));
    }

    #[test]
    fn test_grid_for_thumbnail() {
        assert_eq!(grid_for_thumbnail(160, 92, 1.0), (80, 23));
        // a smaller-than-requested thumbnail shrinks the grid
        assert_eq!(grid_for_thumbnail(100, 92, 1.0), (50, 23));
        // partial cells are dropped
        assert_eq!(grid_for_thumbnail(5, 9, 1.0), (2, 2));
    }

    #[test]
    fn test_grid_round_trips_plan() {
        for (cols, rows) in [(1, 1), (80, 23), (7, 3)] {
            let (tw, th) = plan_thumbnail(cols, rows, DEFAULT_ASPECT);
            assert_eq!(grid_for_thumbnail(tw, th, DEFAULT_ASPECT), (cols, rows));
        }
    }
}
