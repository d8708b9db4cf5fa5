//! Pure logic for the webcam tile puzzle: grid geometry, shuffling,
//! puzzle state, the pointer-driven interaction controller and the
//! per-frame render plan. Nothing in this crate touches the browser;
//! the `gridcam-wasm` crate supplies the canvas, video and input glue.

pub mod controller;
pub mod geometry;
pub mod puzzle;
pub mod render;
pub mod shuffle;

pub use controller::{Controller, DropKind, DropOutcome, DropPolicy, HIGHLIGHT_MS};
pub use geometry::{Cell, Geometry, Point, Rect};
pub use puzzle::{Drag, Puzzle, Tile};
pub use render::{DragSprite, FramePlan, TileSprite, frame_plan};
pub use shuffle::shuffle;
