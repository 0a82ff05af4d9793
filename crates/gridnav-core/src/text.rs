//! ASCII map format for [`Grid`].
//!
//! One line per row: `.` open, `#` obstacle, `S` start, `E` end. Every
//! line must have the same width. Leading/trailing whitespace is trimmed
//! from the whole string but not from individual lines.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;
use crate::geom::Node;
use crate::grid::Grid;

pub(crate) const OPEN: char = '.';
pub(crate) const WALL: char = '#';
pub(crate) const START: char = 'S';
pub(crate) const END: char = 'E';

fn parse_error(line: usize, col: usize, reason: impl Into<String>) -> GridError {
    GridError::Parse {
        line: line + 1,
        col: col + 1,
        reason: reason.into(),
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .trim()
            .lines()
            .map(|l| l.trim_end_matches('\r'))
            .collect();
        let width = lines.first().map_or(0, |l| l.chars().count());
        let mut grid = Grid::new(lines.len() as i32, width as i32);
        let mut start = None;
        let mut end = None;

        for (row, line) in lines.iter().enumerate() {
            let w = line.chars().count();
            if w != width {
                return Err(parse_error(
                    row,
                    w.min(width),
                    format!("expected {width} cells, found {w}"),
                ));
            }
            for (col, ch) in line.chars().enumerate() {
                let n = Node::new(row as i32, col as i32);
                match ch {
                    OPEN => {}
                    WALL => grid.set_obstacle(n, true)?,
                    START if start.is_some() => {
                        return Err(parse_error(row, col, "duplicate start cell"));
                    }
                    START => start = Some(n),
                    END if end.is_some() => {
                        return Err(parse_error(row, col, "duplicate end cell"));
                    }
                    END => end = Some(n),
                    other => {
                        return Err(parse_error(row, col, format!("invalid cell {other:?}")));
                    }
                }
            }
        }

        if let Some(n) = start {
            grid.set_start(n)?;
        }
        if let Some(n) = end {
            grid.set_end(n)?;
        }
        Ok(grid)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            if row > 0 {
                writeln!(f)?;
            }
            for col in 0..self.cols() {
                let n = Node::new(row, col);
                let ch = if self.start() == Some(n) {
                    START
                } else if self.end() == Some(n) {
                    END
                } else if self.is_obstacle(n) {
                    WALL
                } else {
                    OPEN
                };
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAP: &str = "\
S.#.
..#.
...E";

    #[test]
    fn parse_map() {
        let g: Grid = MAP.parse().unwrap();
        assert_eq!(g.rows(), 3);
        assert_eq!(g.cols(), 4);
        assert_eq!(g.start(), Some(Node::new(0, 0)));
        assert_eq!(g.end(), Some(Node::new(2, 3)));
        assert!(g.is_obstacle(Node::new(0, 2)));
        assert!(g.is_obstacle(Node::new(1, 2)));
        assert_eq!(g.obstacle_count(), 2);
    }

    #[test]
    fn display_round_trips() {
        let g: Grid = MAP.parse().unwrap();
        assert_eq!(g.to_string(), MAP);
    }

    #[test]
    fn ragged_rows_rejected() {
        let err = "...\n..".parse::<Grid>().unwrap_err();
        assert!(matches!(err, GridError::Parse { line: 2, .. }));
    }

    #[test]
    fn unknown_cell_rejected() {
        let err = "..x".parse::<Grid>().unwrap_err();
        assert_eq!(
            err,
            GridError::Parse {
                line: 1,
                col: 3,
                reason: "invalid cell 'x'".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_endpoints_rejected() {
        assert!("S.S".parse::<Grid>().is_err());
        assert!("E.\n.E".parse::<Grid>().is_err());
    }

    #[test]
    fn endpoints_optional() {
        let g: Grid = "..\n#.".parse().unwrap();
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
    }
}
