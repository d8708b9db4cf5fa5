use crate::geometry::{Geometry, Rect};
use crate::puzzle::Puzzle;

/// One tile of the grid pass: blit `src` from the current video frame
/// into `dst` at 1:1 cell scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileSprite {
    pub index: usize,
    pub src: Rect,
    pub dst: Rect,
    pub highlighted: bool,
}

/// Top-layer sprite for the tile being carried: same source region,
/// destination centered under the floating pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSprite {
    pub index: usize,
    pub src: Rect,
    pub dst: Rect,
}

/// Everything a blitting backend needs for one frame. `tiles` holds every
/// tile except the dragged one; `dragged` is painted last, on top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FramePlan {
    pub tiles: Vec<TileSprite>,
    pub dragged: Option<DragSprite>,
}

/// Describe one frame of the puzzle. Pure: reads state, mutates nothing.
/// Handles the no-drag and empty-highlight cases by simply omitting the
/// overlay and highlight flags.
pub fn frame_plan(puzzle: &Puzzle, geometry: &Geometry) -> FramePlan {
    let drag = puzzle.drag();
    let mut tiles = Vec::with_capacity(puzzle.tiles().len());
    for (i, tile) in puzzle.tiles().iter().enumerate() {
        if drag.is_some_and(|d| d.index == i) {
            continue;
        }
        tiles.push(TileSprite {
            index: i,
            src: geometry.cell_rect(tile.src),
            dst: geometry.cell_rect(tile.dest),
            highlighted: puzzle.is_highlighted(i),
        });
    }
    let dragged = drag.map(|d| {
        let tile = puzzle.tile(d.index);
        DragSprite {
            index: d.index,
            src: geometry.cell_rect(tile.src),
            dst: Rect {
                x: d.at.x - geometry.cell_w / 2.0,
                y: d.at.y - geometry.cell_h / 2.0,
                w: geometry.cell_w,
                h: geometry.cell_h,
            },
        }
    });
    FramePlan { tiles, dragged }
}
