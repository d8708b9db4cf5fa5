use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Point};
use crate::shuffle::shuffle;

/// One unit of the puzzle. `src` is the video cell this tile always
/// samples from and never changes after creation; `dest` is the grid cell
/// where the tile currently sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub src: Cell,
    pub dest: Cell,
}

/// Active drag: the index of the tile being carried and the floating
/// pointer position it is rendered under.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Drag {
    pub index: usize,
    pub at: Point,
}

/// The authoritative puzzle state: an ordered tile list (never reordered,
/// tiles are identified by index), the transient highlight set and the
/// drag in progress, if any.
///
/// Invariant: outside of an active drag and `move_dest` abuse, the
/// destination cells of all tiles form exactly the full grid, each cell
/// claimed once.
#[derive(Clone, Debug)]
pub struct Puzzle {
    grid_size: u32,
    tiles: Vec<Tile>,
    highlight: Vec<usize>,
    highlight_epoch: u64,
    drag: Option<Drag>,
}

impl Puzzle {
    /// Build a shuffled puzzle: source cells in row-major order, each
    /// paired with a cell from a shuffled permutation of destination
    /// indices. The pairing is a bijection; a tile may still land on its
    /// own cell by chance.
    pub fn new<R: Rng>(grid_size: u32, rng: &mut R) -> Self {
        let n = grid_size as usize;
        let mut dests: Vec<usize> = (0..n * n).collect();
        shuffle(&mut dests, rng);
        let tiles = dests
            .iter()
            .enumerate()
            .map(|(i, &k)| Tile {
                src: Self::cell_of_index(grid_size, i),
                dest: Self::cell_of_index(grid_size, k),
            })
            .collect();
        Puzzle {
            grid_size,
            tiles,
            highlight: Vec::new(),
            highlight_epoch: 0,
            drag: None,
        }
    }

    /// Build a puzzle from an explicit tile layout.
    pub fn from_tiles(grid_size: u32, tiles: Vec<Tile>) -> Self {
        Puzzle {
            grid_size,
            tiles,
            highlight: Vec::new(),
            highlight_epoch: 0,
            drag: None,
        }
    }

    fn cell_of_index(grid_size: u32, k: usize) -> Cell {
        let n = grid_size as usize;
        Cell {
            x: (k % n) as i32,
            y: (k / n) as i32,
        }
    }

    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, i: usize) -> Tile {
        self.tiles[i]
    }

    /// True iff every tile sits on its own source cell.
    pub fn is_solved(&self) -> bool {
        self.tiles.iter().all(|t| t.src == t.dest)
    }

    /// Index of the tile currently occupying `cell`, if any. While the
    /// destination bijection holds this returns `None` only for cells
    /// outside the grid.
    pub fn tile_at_dest(&self, cell: Cell) -> Option<usize> {
        self.tiles.iter().position(|t| t.dest == cell)
    }

    /// Exchange destinations between two distinct tiles. Preserves the
    /// destination bijection.
    pub fn swap_dest(&mut self, i: usize, j: usize) {
        debug_assert!(i != j, "swap_dest needs two distinct tiles");
        let tmp = self.tiles[i].dest;
        self.tiles[i].dest = self.tiles[j].dest;
        self.tiles[j].dest = tmp;
    }

    /// Unconditionally reassign a tile's destination. This can break the
    /// destination bijection when `cell` is out of range or already
    /// occupied; whether that is permitted is the caller's drop policy.
    pub fn move_dest(&mut self, i: usize, cell: Cell) {
        self.tiles[i].dest = cell;
    }

    pub fn start_drag(&mut self, index: usize, at: Point) {
        self.drag = Some(Drag { index, at });
    }

    /// Update the floating position. No-op when nothing is dragged; never
    /// mutates a tile.
    pub fn drag_to(&mut self, at: Point) {
        if let Some(d) = self.drag.as_mut() {
            d.at = at;
        }
    }

    pub fn take_drag(&mut self) -> Option<Drag> {
        self.drag.take()
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn dragged(&self) -> Option<usize> {
        self.drag.map(|d| d.index)
    }

    /// Replace the highlight set and return the token the matching expiry
    /// must present to `clear_highlight`. Bumping the epoch invalidates
    /// older tokens, so a stale timer can never wipe a newer highlight.
    pub fn set_highlight(&mut self, indices: &[usize]) -> u64 {
        self.highlight.clear();
        self.highlight.extend_from_slice(indices);
        self.highlight_epoch += 1;
        self.highlight_epoch
    }

    /// Clear the highlight set, but only if `token` is the one returned
    /// by the latest `set_highlight`.
    pub fn clear_highlight(&mut self, token: u64) {
        if token == self.highlight_epoch {
            self.highlight.clear();
        }
    }

    pub fn is_highlighted(&self, i: usize) -> bool {
        self.highlight.contains(&i)
    }

    pub fn highlighted(&self) -> &[usize] {
        &self.highlight
    }
}
