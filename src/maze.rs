//! Maze generation (randomized recursive backtracker) and an animated
//! depth-first search over the result.
//!
//! Carving produces corridors on even-offset cells with walls between them,
//! then deliberately loosens the outer edge at random. That loosening can
//! occasionally disconnect regions, so the search returns
//! [`Error::GoalUnreachable`] instead of assuming a connected maze.

use crate::display::{BLACK, DisplaySink, blit};
use crate::layout::Serpentine;
use crate::{Board, Error, Result};
use itertools::iproduct;
use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use smart_leds::{RGB8, colors};
use std::thread;
use std::time::Duration;

/// Probability that an outer-edge cell is left open by the post-carve
/// perturbation.
pub const EDGE_OPEN_PROBABILITY: f64 = 0.7;

/// Color of the search head (the cell just arrived at).
pub const HEAD_COLOR: RGB8 = colors::RED;
/// Color of the trail left behind the search head.
pub const TRAIL_COLOR: RGB8 = RGB8::new(255, 155, 0);
/// Color of the goal marker.
pub const GOAL_COLOR: RGB8 = colors::LIME;

/// One cell of the maze board. Cells start as walls; carving opens them.
///
/// A wall's stored color is shown lit (walls render white); open corridor
/// cells render black until the search visits them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeCell {
    /// `false` = wall, `true` = passable.
    pub open: bool,
    /// Whether the search has touched this cell.
    pub visited: bool,
    /// Whether this cell is the search goal.
    pub is_goal: bool,
    /// Display color.
    pub color: RGB8,
}

impl Default for MazeCell {
    fn default() -> Self {
        Self {
            open: false,
            visited: false,
            is_goal: false,
            color: colors::WHITE,
        }
    }
}

/// The maze engine: carving, edge perturbation, reachability patches, and
/// the animated depth-first search.
#[derive(Clone, Debug, Default)]
pub struct MazeBoard<const W: usize, const H: usize> {
    board: Board<MazeCell, W, H>,
}

impl<const W: usize, const H: usize> MazeBoard<W, H> {
    /// Create a board of all walls.
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
        }
    }

    /// The underlying board.
    #[must_use]
    pub fn board(&self) -> &Board<MazeCell, W, H> {
        &self.board
    }

    /// Mutable access to the underlying board, for constructing test mazes.
    pub fn board_mut(&mut self) -> &mut Board<MazeCell, W, H> {
        &mut self.board
    }

    /// Recursive-backtracker carve starting at `(x, y)`.
    ///
    /// Opens the cell, then visits the four two-step directions in random
    /// order; each in-bounds destination that is still a wall gets its
    /// midpoint opened before recursing. Every opened cell is reachable from
    /// the starting cell through four-directional open moves.
    ///
    /// Recursion depth is bounded by the corridor count (`W*H/4`); fine at
    /// panel sizes.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if the starting coordinate is off-board.
    pub fn carve(&mut self, x: usize, y: usize, rng: &mut impl Rng) -> Result<()> {
        self.board.cell_mut(x, y)?.open = true;

        let mut directions: [(isize, isize); 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];
        directions.shuffle(rng);

        for (dx, dy) in directions {
            let Some(nx) = x.checked_add_signed(dx) else {
                continue;
            };
            let Some(ny) = y.checked_add_signed(dy) else {
                continue;
            };
            if !self.board.in_bounds(nx, ny) || self.board.cell(nx, ny)?.open {
                continue;
            }
            // Open the wall midway between here and the destination.
            let (mx, my) = ((x + nx) / 2, (y + ny) / 2);
            self.board.cell_mut(mx, my)?.open = true;
            self.carve(nx, ny, rng)?;
        }
        Ok(())
    }

    /// Carve a full maze from `(0, 0)`, then apply the perturbation and
    /// reachability patches:
    ///
    /// 1. every cell of the last row and last column independently becomes
    ///    open with probability [`EDGE_OPEN_PROBABILITY`];
    /// 2. the bottom-right corner and the cell beside it are forced open so
    ///    the conventional goal corner is enterable;
    /// 3. any cell with zero four-directional open-or-goal neighbors is
    ///    forced closed, removing single-cell pockets the perturbation can
    ///    leave behind.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] only if the board is degenerate (smaller
    /// than 2×1).
    pub fn generate(&mut self, rng: &mut impl Rng) -> Result<()> {
        self.carve(0, 0, rng)?;

        // Randomized loosening of the outer boundary. Not part of the
        // canonical backtracker; can disconnect regions.
        for x in 0..W {
            self.board.cell_mut(x, H - 1)?.open = rng.gen_bool(EDGE_OPEN_PROBABILITY);
        }
        for y in 0..H {
            self.board.cell_mut(W - 1, y)?.open = rng.gen_bool(EDGE_OPEN_PROBABILITY);
        }

        self.board.cell_mut(W - 1, H - 1)?.open = true;
        self.board.cell_mut(W - 2, H - 1)?.open = true;

        // Single in-place pass; earlier closures feed later counts.
        for (x, y) in iproduct!(0..W, 0..H) {
            if self.neighbors_for_search(x, y).is_empty() {
                self.board.cell_mut(x, y)?.open = false;
            }
        }

        let open_cells = self.open_cells().len();
        debug!("maze generated: {open_cells} of {} cells open", W * H);
        Ok(())
    }

    /// In-bounds four-directional neighbors the search may move to: open
    /// cells it has not visited yet, plus the goal.
    ///
    /// The goal may be a wall for carving purposes yet must stay traversable
    /// by the search; that asymmetry is deliberate. Visiting a cell removes
    /// it from every later neighbor list, so the only way back onto a
    /// visited cell is a stale stack entry pushed before the visit.
    #[must_use]
    pub fn neighbors_for_search(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let offsets: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        offsets
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                let cell = self.board.cell(nx, ny).ok()?;
                ((cell.open && !cell.visited) || cell.is_goal).then_some((nx, ny))
            })
            .collect()
    }

    /// Coordinates of every open cell.
    #[must_use]
    pub fn open_cells(&self) -> Vec<(usize, usize)> {
        self.board
            .iter()
            .filter(|(_, _, cell)| cell.open)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    /// Mark the endpoints before a search: the goal is painted green and
    /// flagged, the start is forced open, pre-marked visited, and painted as
    /// the search head.
    ///
    /// # Errors
    ///
    /// [`Error::CoordOutOfBounds`] if either endpoint is off-board.
    pub fn mark_endpoints(&mut self, start: (usize, usize), goal: (usize, usize)) -> Result<()> {
        {
            let cell = self.board.cell_mut(goal.0, goal.1)?;
            cell.is_goal = true;
            cell.color = GOAL_COLOR;
        }
        {
            let cell = self.board.cell_mut(start.0, start.1)?;
            cell.open = true;
            cell.visited = true;
            cell.color = HEAD_COLOR;
        }
        Ok(())
    }

    /// Stack-based depth-first search from `start` to `goal`, animating every
    /// step through `sink`.
    ///
    /// The stack discipline is deliberately not a textbook DFS: every
    /// passable neighbor of the current cell is pushed each step without
    /// de-duplicating against the stack, so a cell can sit on the stack
    /// several times and the popped top may be a stale entry pushed long
    /// before. Visited cells drop out of the neighbor lists, which is what
    /// makes the head jump across the board when it walks into a dead end:
    /// nothing new to push, so the next pop is the most recent stale entry.
    /// That discipline determines the visual trace exactly. After each
    /// single step the departed cell is painted as trail, the arrived cell
    /// as head, and the sink is flushed, followed by `step_delay`.
    ///
    /// Returns the number of steps taken once the popped cell is the goal.
    ///
    /// # Errors
    ///
    /// [`Error::GoalUnreachable`] when the stack empties before the goal is
    /// popped, which happens when [`Self::generate`]'s perturbation
    /// disconnects the goal from the start.
    pub fn depth_first_search<S: DisplaySink>(
        &mut self,
        start: (usize, usize),
        goal: (usize, usize),
        sink: &mut S,
        step_delay: Duration,
    ) -> Result<usize> {
        self.mark_endpoints(start, goal)?;
        blit(&self.board, cell_color, sink)?;

        let mut current = start;
        let mut stack: Vec<(usize, usize)> = Vec::new();
        let mut steps = 0_usize;

        while current != goal {
            stack.extend(self.neighbors_for_search(current.0, current.1));
            let Some(next) = stack.pop() else {
                return Err(Error::GoalUnreachable);
            };

            {
                let cell = self.board.cell_mut(next.0, next.1)?;
                cell.visited = true;
                cell.color = HEAD_COLOR;
            }
            {
                let cell = self.board.cell_mut(current.0, current.1)?;
                cell.visited = true;
                cell.color = TRAIL_COLOR;
            }

            sink.set_pixel(
                Serpentine::<W, H>::xy_to_index(current.0, current.1)?,
                TRAIL_COLOR,
            )?;
            sink.set_pixel(Serpentine::<W, H>::xy_to_index(next.0, next.1)?, HEAD_COLOR)?;
            sink.show();
            if !step_delay.is_zero() {
                thread::sleep(step_delay);
            }

            current = next;
            steps += 1;
        }

        debug!("goal reached in {steps} steps");
        Ok(steps)
    }
}

/// Paint rule for rendering: walls, visited cells, and the goal light their
/// stored color; open unvisited corridor cells are black.
#[must_use]
pub fn cell_color(cell: &MazeCell) -> RGB8 {
    if !cell.open || cell.visited || cell.is_goal {
        cell.color
    } else {
        BLACK
    }
}
