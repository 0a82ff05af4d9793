//! The [`Grid`] model: a rectangular obstacle field with optional start
//! and end cells.
//!
//! The grid is pure data: obstacle bits in a flat row-major buffer plus the
//! two distinguished coordinates. It never holds presentation state.
//! Start and end are always passable and never coincide; every mutator
//! keeps that invariant.

use crate::error::GridError;
use crate::geom::{Bounds, Node};

/// A rows × cols field of obstacle bits with optional start and end cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridRepr"))]
pub struct Grid {
    bounds: Bounds,
    obstacles: Vec<bool>,
    start: Option<Node>,
    end: Option<Node>,
}

impl Grid {
    /// Create an open grid with no start or end.
    pub fn new(rows: i32, cols: i32) -> Self {
        let bounds = Bounds::new(rows, cols);
        Self {
            bounds,
            obstacles: vec![false; bounds.len()],
            start: None,
            end: None,
        }
    }

    /// The rectangle covered by this grid.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Whether `n` is inside the grid.
    #[inline]
    pub fn contains(&self, n: Node) -> bool {
        self.bounds.contains(n)
    }

    fn index(&self, n: Node) -> Result<usize, GridError> {
        self.bounds.index(n).ok_or(GridError::OutOfBounds {
            node: n,
            bounds: self.bounds,
        })
    }

    // -----------------------------------------------------------------------
    // Obstacles
    // -----------------------------------------------------------------------

    /// Whether `n` is blocked. Nodes outside the grid read as blocked.
    #[inline]
    pub fn is_obstacle(&self, n: Node) -> bool {
        match self.bounds.index(n) {
            Some(i) => self.obstacles[i],
            None => true,
        }
    }

    /// Whether `n` is inside the grid and not an obstacle.
    #[inline]
    pub fn is_passable(&self, n: Node) -> bool {
        !self.is_obstacle(n)
    }

    /// Set or clear the obstacle flag at `n`.
    ///
    /// Placing an obstacle on the start or end cell is rejected with
    /// [`GridError::Reserved`] and leaves the grid unchanged.
    pub fn set_obstacle(&mut self, n: Node, blocked: bool) -> Result<(), GridError> {
        let i = self.index(n)?;
        if blocked && self.is_endpoint(n) {
            return Err(GridError::Reserved(n));
        }
        self.obstacles[i] = blocked;
        Ok(())
    }

    /// Flip the obstacle flag at `n` and return the new state.
    ///
    /// Start and end cells are left alone and report `false`.
    pub fn toggle_obstacle(&mut self, n: Node) -> Result<bool, GridError> {
        let i = self.index(n)?;
        if self.is_endpoint(n) {
            return Ok(false);
        }
        self.obstacles[i] = !self.obstacles[i];
        Ok(self.obstacles[i])
    }

    /// Open the cell at `n`. Nodes outside the grid are ignored.
    pub fn clear_obstacle(&mut self, n: Node) {
        if let Some(i) = self.bounds.index(n) {
            self.obstacles[i] = false;
        }
    }

    /// Remove every obstacle. Start and end are kept.
    pub fn clear_obstacles(&mut self) {
        self.obstacles.fill(false);
    }

    /// Number of blocked cells.
    pub fn obstacle_count(&self) -> usize {
        self.obstacles.iter().filter(|&&b| b).count()
    }

    /// Remove every obstacle together with the start and end cells.
    pub fn reset(&mut self) {
        self.clear_obstacles();
        self.start = None;
        self.end = None;
    }

    // -----------------------------------------------------------------------
    // Start / end
    // -----------------------------------------------------------------------

    /// The start cell, if placed.
    #[inline]
    pub fn start(&self) -> Option<Node> {
        self.start
    }

    /// The end cell, if placed.
    #[inline]
    pub fn end(&self) -> Option<Node> {
        self.end
    }

    /// Whether `n` is the start or the end cell.
    #[inline]
    pub fn is_endpoint(&self, n: Node) -> bool {
        self.start == Some(n) || self.end == Some(n)
    }

    /// Place the start cell, clearing any obstacle under it.
    ///
    /// If `n` is the current end cell, the end is removed.
    pub fn set_start(&mut self, n: Node) -> Result<(), GridError> {
        let i = self.index(n)?;
        if self.end == Some(n) {
            self.end = None;
        }
        self.obstacles[i] = false;
        self.start = Some(n);
        Ok(())
    }

    /// Place the end cell, clearing any obstacle under it.
    ///
    /// The end may not sit on the start cell.
    pub fn set_end(&mut self, n: Node) -> Result<(), GridError> {
        let i = self.index(n)?;
        if self.start == Some(n) {
            return Err(GridError::Reserved(n));
        }
        self.obstacles[i] = false;
        self.end = Some(n);
        Ok(())
    }

    /// Remove the start cell.
    pub fn clear_start(&mut self) {
        self.start = None;
    }

    /// Remove the end cell.
    pub fn clear_end(&mut self) {
        self.end = None;
    }

    /// Both endpoints, or the reason a search cannot run.
    pub fn endpoints(&self) -> Result<(Node, Node), GridError> {
        let start = self.start.ok_or(GridError::MissingStart)?;
        let end = self.end.ok_or(GridError::MissingEnd)?;
        Ok((start, end))
    }
}

/// Unchecked wire form of a [`Grid`], validated on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridRepr {
    bounds: Bounds,
    obstacles: Vec<bool>,
    start: Option<Node>,
    end: Option<Node>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(repr: GridRepr) -> Result<Self, GridError> {
        let bounds = Bounds::new(repr.bounds.rows, repr.bounds.cols);
        if repr.obstacles.len() != bounds.len() {
            return Err(GridError::CellCount {
                bounds,
                expected: bounds.len(),
                found: repr.obstacles.len(),
            });
        }
        let grid = Self {
            bounds,
            obstacles: repr.obstacles,
            start: None,
            end: None,
        };
        for n in [repr.start, repr.end].into_iter().flatten() {
            grid.index(n)?;
            if grid.is_obstacle(n) {
                return Err(GridError::Blocked(n));
            }
        }
        if let (Some(start), Some(end)) = (repr.start, repr.end) {
            if start == end {
                return Err(GridError::Reserved(end));
            }
        }
        Ok(Self {
            start: repr.start,
            end: repr.end,
            ..grid
        })
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_round_trip() {
        let mut g = Grid::new(3, 4);
        g.set_obstacle(Node::new(1, 2), true).unwrap();
        g.set_start(Node::new(0, 0)).unwrap();
        g.set_end(Node::new(2, 3)).unwrap();
        let json = serde_json::to_string(&g).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    fn from_json(json: &str) -> Result<Grid, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn short_obstacle_buffer_is_rejected() {
        let err = from_json(
            r#"{"bounds":{"rows":3,"cols":3},"obstacles":[false],"start":null,"end":null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("needs 9 cells, found 1"), "{err}");
    }

    #[test]
    fn endpoint_on_obstacle_is_rejected() {
        let err = from_json(
            r#"{"bounds":{"rows":1,"cols":3},"obstacles":[true,false,false],
                "start":{"row":0,"col":0},"end":{"row":0,"col":2}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("(0, 0) is blocked"), "{err}");
    }

    #[test]
    fn coinciding_endpoints_are_rejected() {
        let err = from_json(
            r#"{"bounds":{"rows":1,"cols":3},"obstacles":[false,false,false],
                "start":{"row":0,"col":1},"end":{"row":0,"col":1}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("reserved"), "{err}");
    }

    #[test]
    fn endpoint_outside_is_rejected() {
        let err = from_json(
            r#"{"bounds":{"rows":1,"cols":3},"obstacles":[false,false,false],
                "start":{"row":0,"col":0},"end":{"row":4,"col":0}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("outside"), "{err}");
    }
}
