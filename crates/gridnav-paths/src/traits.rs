use gridnav_core::{Bounds, Node};

use crate::distance::octile;
use crate::neighbors::Step;

/// Graph interface consumed by [`Search`](crate::Search).
pub trait Pather {
    /// The rectangle every node of the graph lives in.
    fn bounds(&self) -> Bounds;

    /// Whether a walk may start, end or pass through `n`.
    fn is_passable(&self, n: Node) -> bool;

    /// Append the legal moves out of `n` into `buf`. The caller clears
    /// `buf` before calling.
    fn neighbors(&self, n: Node, buf: &mut Vec<Step>);

    /// Estimate of the remaining cost from `from` to `to`.
    /// Must never overestimate the true cost (admissible).
    fn estimate(&self, from: Node, to: Node) -> f64 {
        octile(from, to)
    }
}
