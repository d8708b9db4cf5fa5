use crate::geometry::{Cell, Geometry, Point};
use crate::puzzle::Puzzle;

/// How long a freshly moved tile keeps its accent border, in
/// milliseconds. The shell schedules the expiry; the value is part of
/// the interaction contract, not a presentation knob.
pub const HIGHLIGHT_MS: u32 = 400;

/// What to do with a drop whose grid cell lies outside the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DropPolicy {
    /// Clamp the drop cell into `[0, grid_size)` before the occupant
    /// lookup, so the destination bijection can never break through the
    /// input surface.
    #[default]
    Clamp,
    /// No clamping: an off-grid drop reassigns the tile to the off-grid
    /// cell and strands it there, leaving its old cell unclaimed.
    Faithful,
}

/// How a completed drop resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropKind {
    /// The drop cell was held by another tile; the two exchanged places.
    Swapped { with: usize },
    /// The drop cell was free (or the tile's own); the tile moved there.
    Moved { to: Cell },
}

/// Result of a completed drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropOutcome {
    /// The tile that was dragged.
    pub index: usize,
    pub kind: DropKind,
    /// Token the `HIGHLIGHT_MS` expiry must present to
    /// `Puzzle::clear_highlight`.
    pub highlight_token: u64,
    /// True only on the drop that newly solves the puzzle.
    pub solved: bool,
}

/// Translates pointer input into puzzle mutations. A single instance
/// serves both mouse and touch; the adapters differ only in how they
/// extract coordinates from their events.
///
/// State machine: idle (no drag recorded in the puzzle) until `press`
/// hits a tile, dragging until `release`, then idle again. Everything
/// else is a silent no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Controller {
    policy: DropPolicy,
    announced: bool,
}

impl Controller {
    pub fn new(policy: DropPolicy) -> Self {
        Controller {
            policy,
            announced: false,
        }
    }

    pub fn policy(&self) -> DropPolicy {
        self.policy
    }

    /// Pointer down: hit-test tiles in index order against their current
    /// destination rectangles and pick up the first match. Returns
    /// whether a drag started. A press while already dragging is
    /// ignored, as is a press that hits no tile.
    pub fn press(&mut self, puzzle: &mut Puzzle, geometry: &Geometry, at: Point) -> bool {
        if puzzle.dragged().is_some() {
            return false;
        }
        for (i, tile) in puzzle.tiles().iter().enumerate() {
            if geometry.cell_rect(tile.dest).contains(at) {
                puzzle.start_drag(i, at);
                return true;
            }
        }
        false
    }

    /// Pointer move: only the floating position changes, never a tile.
    pub fn drag_move(&mut self, puzzle: &mut Puzzle, at: Point) {
        puzzle.drag_to(at);
    }

    /// Pointer up. Mouse adapters pass the release position; touch-end
    /// events carry no coordinates, so `None` falls back to the last
    /// floating position. Resolves the drop, highlights the affected
    /// tiles and re-checks the solved state.
    pub fn release(
        &mut self,
        puzzle: &mut Puzzle,
        geometry: &Geometry,
        at: Option<Point>,
    ) -> Option<DropOutcome> {
        let drag = puzzle.take_drag()?;
        let pos = at.unwrap_or(drag.at);
        let mut cell = geometry.cell_of_point(pos);
        if self.policy == DropPolicy::Clamp {
            cell = geometry.clamp(cell);
        }
        let kind = match puzzle.tile_at_dest(cell) {
            Some(target) if target != drag.index => {
                puzzle.swap_dest(drag.index, target);
                DropKind::Swapped { with: target }
            }
            _ => {
                puzzle.move_dest(drag.index, cell);
                DropKind::Moved { to: cell }
            }
        };
        let highlight_token = match kind {
            DropKind::Swapped { with } => puzzle.set_highlight(&[drag.index, with]),
            DropKind::Moved { .. } => puzzle.set_highlight(&[drag.index]),
        };
        let solved = self.check_solved(puzzle);
        Some(DropOutcome {
            index: drag.index,
            kind,
            highlight_token,
            solved,
        })
    }

    /// One announcement per solve. Disturbing a solved puzzle re-arms
    /// the flag, so a later re-solve announces again.
    fn check_solved(&mut self, puzzle: &Puzzle) -> bool {
        let solved = puzzle.is_solved();
        if solved && !self.announced {
            self.announced = true;
            return true;
        }
        if !solved {
            self.announced = false;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Tile;
    use std::collections::HashSet;

    fn geom_2x2() -> Geometry {
        // 100x100 canvas, 50px cells
        Geometry::new(2, 100.0, 100.0)
    }

    /// 2x2 layout with the top row swapped: tile 0 (src (0,0)) sits at
    /// (1,0) and tile 1 (src (1,0)) sits at (0,0). One swap solves it.
    fn one_swap_away() -> Puzzle {
        let tiles = vec![
            Tile {
                src: Cell::new(0, 0),
                dest: Cell::new(1, 0),
            },
            Tile {
                src: Cell::new(1, 0),
                dest: Cell::new(0, 0),
            },
            Tile {
                src: Cell::new(0, 1),
                dest: Cell::new(0, 1),
            },
            Tile {
                src: Cell::new(1, 1),
                dest: Cell::new(1, 1),
            },
        ];
        Puzzle::from_tiles(2, tiles)
    }

    fn p(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    fn dest_set(puzzle: &Puzzle) -> HashSet<(i32, i32)> {
        puzzle
            .tiles()
            .iter()
            .map(|t| (t.dest.x, t.dest.y))
            .collect()
    }

    #[test]
    fn press_miss_stays_idle() {
        let mut c = Controller::default();
        let mut puzzle = one_swap_away();
        // (50,50) lies on every surrounding cell edge; open-edge
        // semantics make it a miss.
        assert!(!c.press(&mut puzzle, &geom_2x2(), p(50.0, 50.0)));
        assert!(puzzle.dragged().is_none());
    }

    #[test]
    fn move_while_idle_is_a_noop() {
        let mut c = Controller::default();
        let mut puzzle = one_swap_away();
        c.drag_move(&mut puzzle, p(10.0, 10.0));
        assert!(puzzle.dragged().is_none());
        assert!(c.release(&mut puzzle, &geom_2x2(), None).is_none());
    }

    #[test]
    fn redundant_press_is_ignored() {
        let mut c = Controller::default();
        let mut puzzle = one_swap_away();
        assert!(c.press(&mut puzzle, &geom_2x2(), p(10.0, 10.0)));
        let held = puzzle.dragged();
        assert!(!c.press(&mut puzzle, &geom_2x2(), p(60.0, 10.0)));
        assert_eq!(puzzle.dragged(), held);
    }

    #[test]
    fn drop_on_occupied_cell_swaps_and_highlights_both() {
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();
        // pick up tile 1 at (0,0), drop onto tile 0's cell (1,0)
        assert!(c.press(&mut puzzle, &geometry, p(10.0, 10.0)));
        assert_eq!(puzzle.dragged(), Some(1));
        c.drag_move(&mut puzzle, p(70.0, 10.0));
        let outcome = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 10.0)))
            .unwrap();
        assert_eq!(outcome.kind, DropKind::Swapped { with: 0 });
        assert_eq!(puzzle.tile(1).dest, Cell::new(1, 0));
        assert_eq!(puzzle.tile(0).dest, Cell::new(0, 0));
        assert!(puzzle.is_highlighted(0) && puzzle.is_highlighted(1));
        puzzle.clear_highlight(outcome.highlight_token);
        assert!(puzzle.highlighted().is_empty());
    }

    #[test]
    fn release_without_point_uses_floating_position() {
        // Touch-end path: the drop cell comes from the last move.
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();
        assert!(c.press(&mut puzzle, &geometry, p(10.0, 10.0)));
        c.drag_move(&mut puzzle, p(70.0, 10.0));
        let outcome = c.release(&mut puzzle, &geometry, None).unwrap();
        assert_eq!(outcome.kind, DropKind::Swapped { with: 0 });
        assert!(outcome.solved);
    }

    #[test]
    fn faithful_drop_off_grid_breaks_the_bijection() {
        // Documented original behavior, deliberately not "fixed" under
        // the Faithful policy.
        let mut c = Controller::new(DropPolicy::Faithful);
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();
        assert!(c.press(&mut puzzle, &geometry, p(10.0, 10.0)));
        c.drag_move(&mut puzzle, p(-20.0, -20.0));
        let outcome = c.release(&mut puzzle, &geometry, None).unwrap();
        assert_eq!(
            outcome.kind,
            DropKind::Moved {
                to: Cell::new(-1, -1)
            }
        );
        assert_eq!(puzzle.tile(1).dest, Cell::new(-1, -1));
        // the bijection is broken: an off-grid cell is claimed while
        // in-grid cell (0,0) goes unclaimed
        assert_eq!(puzzle.tile_at_dest(Cell::new(0, 0)), None);
        assert!(
            puzzle
                .tiles()
                .iter()
                .any(|t| !geometry.in_bounds(t.dest))
        );
    }

    #[test]
    fn clamped_drop_off_grid_keeps_the_bijection() {
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();
        assert!(c.press(&mut puzzle, &geometry, p(60.0, 10.0)));
        assert_eq!(puzzle.dragged(), Some(0));
        c.drag_move(&mut puzzle, p(-20.0, 10.0));
        let outcome = c.release(&mut puzzle, &geometry, None).unwrap();
        // (-1,0) clamps to (0,0), occupied by tile 1: swap
        assert_eq!(outcome.kind, DropKind::Swapped { with: 1 });
        assert_eq!(dest_set(&puzzle).len(), 4);
        assert!(outcome.solved);
    }

    #[test]
    fn drop_on_own_cell_moves_in_place() {
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();
        assert!(c.press(&mut puzzle, &geometry, p(10.0, 60.0)));
        assert_eq!(puzzle.dragged(), Some(2));
        let outcome = c
            .release(&mut puzzle, &geometry, Some(p(20.0, 70.0)))
            .unwrap();
        assert_eq!(
            outcome.kind,
            DropKind::Moved {
                to: Cell::new(0, 1)
            }
        );
        assert_eq!(puzzle.tile(2).dest, Cell::new(0, 1));
        assert!(puzzle.is_highlighted(2));
        assert!(!puzzle.is_highlighted(0));
    }

    #[test]
    fn highlight_timer_replacement_tokens() {
        // Two drops in quick succession: only the second drop's token may
        // clear, mirroring the timer-cancel behavior in the shell.
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();

        c.press(&mut puzzle, &geometry, p(10.0, 10.0));
        let first = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 10.0)))
            .unwrap();
        c.press(&mut puzzle, &geometry, p(10.0, 60.0));
        let second = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 60.0)))
            .unwrap();

        puzzle.clear_highlight(first.highlight_token);
        assert!(
            !puzzle.highlighted().is_empty(),
            "the first drop's expiry is stale and must not clear"
        );
        puzzle.clear_highlight(second.highlight_token);
        assert!(puzzle.highlighted().is_empty());
    }

    #[test]
    fn solved_announcement_rearms_after_disturbance() {
        let mut c = Controller::default();
        let geometry = geom_2x2();
        let mut puzzle = one_swap_away();

        // solve: announce once
        c.press(&mut puzzle, &geometry, p(10.0, 10.0));
        let outcome = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 10.0)))
            .unwrap();
        assert!(outcome.solved);

        // disturb: no announcement, flag re-arms
        c.press(&mut puzzle, &geometry, p(10.0, 10.0));
        let outcome = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 10.0)))
            .unwrap();
        assert!(!outcome.solved);

        // solve again: announces again
        c.press(&mut puzzle, &geometry, p(10.0, 10.0));
        let outcome = c
            .release(&mut puzzle, &geometry, Some(p(70.0, 10.0)))
            .unwrap();
        assert!(outcome.solved);
    }
}
