use serde::{Deserialize, Serialize};

/// Basic two dimensional point used for pointer positions and pixel math.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl From<(f64, f64)> for Point {
    fn from(v: (f64, f64)) -> Self {
        Point { x: v.0, y: v.1 }
    }
}

/// Grid cell coordinate. Signed so a pointer dragged off the canvas still
/// maps to a well defined (out-of-range) cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

/// Axis aligned pixel rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// Strictly-open containment: a point exactly on an edge is outside.
    pub fn contains(&self, p: Point) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }
}

/// Fixed grid dimensions for one puzzle session. Cell size is the canvas
/// size divided by the grid size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub grid_size: u32,
    pub cell_w: f64,
    pub cell_h: f64,
}

impl Geometry {
    pub fn new(grid_size: u32, canvas_w: f64, canvas_h: f64) -> Self {
        let n = grid_size.max(1) as f64;
        Geometry {
            grid_size,
            cell_w: canvas_w / n,
            cell_h: canvas_h / n,
        }
    }

    /// Cell under a pixel position. No clamping: the result may lie
    /// outside `[0, grid_size)` and callers decide whether to accept it.
    pub fn cell_of_point(&self, p: Point) -> Cell {
        Cell {
            x: (p.x / self.cell_w).floor() as i32,
            y: (p.y / self.cell_h).floor() as i32,
        }
    }

    /// Top-left pixel of a cell.
    pub fn point_of_cell(&self, c: Cell) -> Point {
        Point {
            x: c.x as f64 * self.cell_w,
            y: c.y as f64 * self.cell_h,
        }
    }

    /// Pixel rectangle covered by a cell.
    pub fn cell_rect(&self, c: Cell) -> Rect {
        let p = self.point_of_cell(c);
        Rect {
            x: p.x,
            y: p.y,
            w: self.cell_w,
            h: self.cell_h,
        }
    }

    pub fn in_bounds(&self, c: Cell) -> bool {
        let n = self.grid_size as i32;
        c.x >= 0 && c.x < n && c.y >= 0 && c.y < n
    }

    /// Nearest in-range cell.
    pub fn clamp(&self, c: Cell) -> Cell {
        let n = self.grid_size as i32;
        Cell {
            x: c.x.clamp(0, n - 1),
            y: c.y.clamp(0, n - 1),
        }
    }
}
