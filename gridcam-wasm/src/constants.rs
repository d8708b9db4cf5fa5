/// Application-wide constants for the browser shell. Pixel values refer
/// to canvas backing-store pixels.

/// Cells per side of the puzzle grid.
pub const GRID_SIZE: u32 = 4;

/// Border around tiles resting in the grid.
pub const GRID_STROKE: &str = "#fff";
pub const GRID_STROKE_WIDTH: f64 = 2.0;

/// Accent border for recently moved tiles, drawn inset so the thick
/// stroke stays inside the cell.
pub const HIGHLIGHT_STROKE: &str = "yellow";
pub const HIGHLIGHT_STROKE_WIDTH: f64 = 6.0;
pub const HIGHLIGHT_INSET: f64 = 2.0;

/// The tile carried under the pointer.
pub const DRAG_ALPHA: f64 = 0.8;
pub const DRAG_STROKE: &str = "#ff0";

pub const SOLVED_MESSAGE: &str = "Congratulations! Puzzle solved!";
