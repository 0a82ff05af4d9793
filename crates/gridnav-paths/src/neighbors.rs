use std::f64::consts::SQRT_2;

use gridnav_core::{Bounds, Grid, Node};

use crate::traits::Pather;

/// One legal move: the target node and the cost of reaching it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub node: Node,
    pub cost: f64,
}

/// Cardinal directions first, then diagonals.
const DIRS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

/// Append the legal 8-directional moves out of `n` into `buf`.
///
/// A move is rejected if its target is outside the grid or blocked. A
/// diagonal move is also rejected unless both orthogonal cells beside it
/// (the one sharing the row and the one sharing the column) are open, so
/// paths never squeeze between two blocked corners.
pub fn expand(grid: &Grid, n: Node, buf: &mut Vec<Step>) {
    for (dr, dc) in DIRS {
        let target = n.offset(dr, dc);
        if grid.is_obstacle(target) {
            continue;
        }
        let cost = if dr != 0 && dc != 0 {
            if grid.is_obstacle(n.offset(dr, 0)) || grid.is_obstacle(n.offset(0, dc)) {
                continue;
            }
            SQRT_2
        } else {
            1.0
        };
        buf.push(Step { node: target, cost });
    }
}

impl Pather for Grid {
    #[inline]
    fn bounds(&self) -> Bounds {
        Grid::bounds(self)
    }

    #[inline]
    fn is_passable(&self, n: Node) -> bool {
        Grid::is_passable(self, n)
    }

    #[inline]
    fn neighbors(&self, n: Node, buf: &mut Vec<Step>) {
        expand(self, n, buf);
    }
}

/// Cached neighbor computation helper.
///
/// Holds a scratch buffer so repeated queries do not allocate.
pub struct Neighbors {
    buf: Vec<Step>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(8),
        }
    }

    /// Return the legal moves out of `n` according to `pather`.
    pub fn of<P: Pather + ?Sized>(&mut self, pather: &P, n: Node) -> &[Step] {
        self.buf.clear();
        pather.neighbors(n, &mut self.buf);
        &self.buf
    }
}
