//! Geometry primitives: [`Node`] and [`Bounds`].
//!
//! Nodes use a `(row, col)` convention everywhere: `row` grows down,
//! `col` grows right. [`Bounds`] maps nodes to flat indices
//! (`row * cols + col`) so per-search state can live in plain vectors.

use std::fmt;
use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A grid cell identified by its row and column.
///
/// Coordinates are signed so that neighbor offsets can step outside the
/// grid; [`Bounds::contains`] decides whether a node is actually valid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub row: i32,
    pub col: i32,
}

impl Node {
    /// Create a new node.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a node shifted by (drow, dcol).
    #[inline]
    pub const fn offset(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Whether `other` differs by at most one step on each axis (and is not
    /// `self`).
    #[inline]
    pub fn is_adjacent(self, other: Node) -> bool {
        let d = other - self;
        self != other && d.row.abs() <= 1 && d.col.abs() <= 1
    }

    /// Whether the step from `self` to `other` changes both row and column.
    #[inline]
    pub fn is_diagonal_to(self, other: Node) -> bool {
        self.row != other.row && self.col != other.col
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl Add for Node {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl Sub for Node {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.row - rhs.row, self.col - rhs.col)
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The `rows × cols` rectangle anchored at the origin.
///
/// Besides containment checks, `Bounds` packs nodes into the flat index
/// used as arena key by every search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: i32,
    pub cols: i32,
}

impl Bounds {
    /// Create new bounds. Negative dimensions are clamped to zero.
    #[inline]
    pub fn new(rows: i32, cols: i32) -> Self {
        Self {
            rows: rows.max(0),
            cols: cols.max(0),
        }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    /// Whether the rectangle has no cells.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `n` lies inside the rectangle.
    #[inline]
    pub fn contains(self, n: Node) -> bool {
        n.row >= 0 && n.row < self.rows && n.col >= 0 && n.col < self.cols
    }

    /// Convert a node to its flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn index(self, n: Node) -> Option<usize> {
        if !self.contains(n) {
            return None;
        }
        Some(n.row as usize * self.cols as usize + n.col as usize)
    }

    /// Convert a flat index back to a node.
    #[inline]
    pub fn node(self, idx: usize) -> Node {
        let cols = self.cols.max(1) as usize;
        Node::new((idx / cols) as i32, (idx % cols) as i32)
    }

    /// Row-major iterator over every node.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Node;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the nodes in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Node;

    #[inline]
    fn next(&mut self) -> Option<Node> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let n = self.bounds.node(self.next);
        self.next += 1;
        Some(n)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bounds.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundsIter {}
