use gridnav_core::{Bounds, Node};

use crate::neighbors::Neighbors;
use crate::traits::Pather;

const NONE: usize = usize::MAX;

/// Predecessor links of a search, stored as a flat index array.
#[derive(Debug, Clone)]
pub struct Predecessors {
    bounds: Bounds,
    prev: Vec<usize>,
}

impl Predecessors {
    /// Create an empty map covering `bounds`.
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            prev: vec![NONE; bounds.len()],
        }
    }

    /// Record that `node` was reached from `from`. Ignored if either node is
    /// outside the bounds.
    pub fn set(&mut self, node: Node, from: Node) {
        if let (Some(i), Some(j)) = (self.bounds.index(node), self.bounds.index(from)) {
            self.prev[i] = j;
        }
    }

    #[inline]
    pub(crate) fn set_index(&mut self, idx: usize, from: usize) {
        self.prev[idx] = from;
    }

    /// The predecessor of `node`, if one was recorded.
    pub fn get(&self, node: Node) -> Option<Node> {
        let i = self.bounds.index(node)?;
        match self.prev[i] {
            NONE => None,
            j => Some(self.bounds.node(j)),
        }
    }
}

/// Walk the predecessor links back from `end` until a node without a
/// predecessor (the start) and return the nodes in start → end order.
///
/// The walk is capped at one visit per cell, so a malformed map yields a
/// truncated path instead of looping.
pub fn reconstruct(preds: &Predecessors, end: Node) -> Path {
    let mut nodes = vec![end];
    let mut cur = end;
    for _ in 0..preds.prev.len() {
        let Some(prev) = preds.get(cur) else {
            break;
        };
        nodes.push(prev);
        cur = prev;
    }
    nodes.reverse();
    Path(nodes)
}

/// A path returned by a successful search: first node is the start, last
/// is the end, and consecutive nodes are legal neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Path(Vec<Node>);

impl Path {
    /// The nodes in start → end order.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    /// Number of nodes (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for paths produced by a search.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First node.
    pub fn start(&self) -> Option<Node> {
        self.0.first().copied()
    }

    /// Last node.
    pub fn end(&self) -> Option<Node> {
        self.0.last().copied()
    }

    /// Iterate over the nodes.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.0.iter()
    }

    /// Whether every consecutive pair is a legal move under `pather`.
    pub fn is_contiguous<P: Pather + ?Sized>(&self, pather: &P) -> bool {
        let mut nb = Neighbors::new();
        self.0.windows(2).all(|w| {
            w[0].is_adjacent(w[1]) && nb.of(pather, w[0]).iter().any(|s| s.node == w[1])
        })
    }

    /// Consume the path and return its nodes.
    pub fn into_vec(self) -> Vec<Node> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
