//! Maze generation algorithms.
//!
//! Every generator writes through an explicit `&mut Grid` and takes the
//! cells to keep open as a parameter. The grid's own start and end cells
//! are always kept open as well.

use gridnav_core::{Grid, Node};
use log::debug;
use rand::{Rng, RngExt};

/// Obstacle probability used when none is given.
pub const DEFAULT_DENSITY: f64 = 0.3;

/// Direction of a dividing wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The wall runs along a row.
    Horizontal,
    /// The wall runs along a column.
    Vertical,
}

impl Orientation {
    fn flip(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Half-open rectangle `[top, bottom) × [left, right)` being divided.
#[derive(Debug, Clone, Copy)]
struct Region {
    top: i32,
    left: i32,
    bottom: i32,
    right: i32,
}

impl Region {
    fn height(self) -> i32 {
        self.bottom - self.top
    }

    fn width(self) -> i32 {
        self.right - self.left
    }
}

/// Maze generator owning its random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new generator drawing from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Scatter obstacles at random.
    ///
    /// Existing obstacles are cleared first. Each cell that is neither an
    /// endpoint nor in `keep_clear` becomes an obstacle with probability
    /// `density` (clamped to 0.0–1.0), independently of the others.
    ///
    /// Returns the number of obstacles placed.
    pub fn random(&mut self, grid: &mut Grid, density: f64, keep_clear: &[Node]) -> usize {
        grid.clear_obstacles();
        let density = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for n in grid.bounds() {
            let r: f64 = self.rng.random();
            if r < density && wall(grid, n, keep_clear) {
                placed += 1;
            }
        }
        debug!(
            "random maze: {placed} obstacles on {} grid (density {density})",
            grid.bounds()
        );
        placed
    }

    /// Build a maze by recursive division.
    ///
    /// The grid is cleared to a single open room, which is then split by a
    /// wall with exactly one gap. Both halves are divided again with the
    /// orthogonal orientation until a region is less than two cells wide or
    /// tall. The first orientation is chosen at random.
    ///
    /// Walls always lie on odd rows/columns and gaps on even ones, so a
    /// later wall can never close an earlier gap. Endpoints and
    /// `keep_clear` cells stay open even when a wall crosses them, and any
    /// that end up boxed in at a wall crossing are reconnected.
    ///
    /// Returns the number of obstacles placed.
    pub fn recursive_division(&mut self, grid: &mut Grid, keep_clear: &[Node]) -> usize {
        grid.clear_obstacles();
        let orientation = if self.rng.random_range(0..2u32) == 0 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let region = Region {
            top: 0,
            left: 0,
            bottom: grid.rows(),
            right: grid.cols(),
        };
        self.divide(grid, region, orientation, keep_clear);

        let endpoints = [grid.start(), grid.end()];
        for n in keep_clear.iter().copied().chain(endpoints.into_iter().flatten()) {
            link_to_maze(grid, n);
        }

        let placed = grid.obstacle_count();
        debug!(
            "recursive division maze: {placed} obstacles on {} grid, first wall {orientation:?}",
            grid.bounds()
        );
        placed
    }

    fn divide(
        &mut self,
        grid: &mut Grid,
        region: Region,
        orientation: Orientation,
        keep_clear: &[Node],
    ) {
        let (height, width) = (region.height(), region.width());
        if height < 2 || width < 2 {
            return;
        }

        match orientation {
            Orientation::Horizontal => {
                // Odd offsets below `top` for the wall, even offsets for the gap.
                let row = region.top + 1 + 2 * self.rng.random_range(0..height / 2);
                let gap = region.left + 2 * self.rng.random_range(0..(width + 1) / 2);
                for col in region.left..region.right {
                    if col != gap {
                        wall(grid, Node::new(row, col), keep_clear);
                    }
                }
                let upper = Region { bottom: row, ..region };
                let lower = Region { top: row + 1, ..region };
                self.divide(grid, upper, orientation.flip(), keep_clear);
                self.divide(grid, lower, orientation.flip(), keep_clear);
            }
            Orientation::Vertical => {
                let col = region.left + 1 + 2 * self.rng.random_range(0..width / 2);
                let gap = region.top + 2 * self.rng.random_range(0..(height + 1) / 2);
                for row in region.top..region.bottom {
                    if row != gap {
                        wall(grid, Node::new(row, col), keep_clear);
                    }
                }
                let left = Region { right: col, ..region };
                let right = Region { left: col + 1, ..region };
                self.divide(grid, left, orientation.flip(), keep_clear);
                self.divide(grid, right, orientation.flip(), keep_clear);
            }
        }
    }
}

/// Block `n` unless it must stay open. Returns whether an obstacle was placed.
fn wall(grid: &mut Grid, n: Node, keep_clear: &[Node]) -> bool {
    if keep_clear.contains(&n) {
        return false;
    }
    // The grid refuses obstacles on its start and end cells.
    grid.set_obstacle(n, true).is_ok()
}

/// Reconnect a kept-open cell sitting where a horizontal and a vertical
/// wall cross.
///
/// Cells with an even row and column are never walled and are all connected.
/// A kept cell with one even coordinate already touches such a cell; one at
/// odd/odd gets the cell above it opened, which touches one on its left.
fn link_to_maze(grid: &mut Grid, n: Node) {
    if n.row % 2 == 1 && n.col % 2 == 1 {
        grid.clear_obstacle(n.offset(-1, 0));
    }
}

/// Scatter obstacles with the thread-local RNG. See [`MazeGen::random`].
pub fn generate_random_maze(grid: &mut Grid, density: f64, keep_clear: &[Node]) -> usize {
    MazeGen::new(rand::rng()).random(grid, density, keep_clear)
}

/// Recursive-division maze with the thread-local RNG. See
/// [`MazeGen::recursive_division`].
pub fn generate_recursive_maze(grid: &mut Grid, keep_clear: &[Node]) -> usize {
    MazeGen::new(rand::rng()).recursive_division(grid, keep_clear)
}
