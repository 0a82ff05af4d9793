use thiserror::Error;

use crate::geom::{Bounds, Node};

/// Precondition violations raised by the grid model and search setup.
///
/// "No path exists" and "region too small to divide" are ordinary results
/// and never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The node lies outside the grid.
    #[error("node {node} is outside the {bounds} grid")]
    OutOfBounds { node: Node, bounds: Bounds },

    /// The node is the start or end cell and cannot take this change.
    #[error("node {0} is reserved for the start or end cell")]
    Reserved(Node),

    /// The node is an obstacle where an open cell is required.
    #[error("node {0} is blocked")]
    Blocked(Node),

    /// A serialized grid carries the wrong number of obstacle flags.
    #[error("grid of {bounds} needs {expected} cells, found {found}")]
    CellCount {
        bounds: Bounds,
        expected: usize,
        found: usize,
    },

    /// A search was requested on a grid with no start cell.
    #[error("grid has no start cell")]
    MissingStart,

    /// A search was requested on a grid with no end cell.
    #[error("grid has no end cell")]
    MissingEnd,

    /// The textual map could not be parsed.
    #[error("map line {line}, column {col}: {reason}")]
    Parse {
        line: usize,
        col: usize,
        reason: String,
    },
}
