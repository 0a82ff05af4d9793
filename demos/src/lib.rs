//! Terminal view layer for gridnav.
//!
//! The search core never sees presentation state. [`Board`] is the
//! rendering adapter: it subscribes to visitation events and the final
//! path, and draws them over a [`Grid`] with crossterm colours.
//! [`Stats`] derives the figures shown after a run (path length, visited
//! nodes, elapsed time) from what the core returns.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use crossterm::{
    QueueableCommand, cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use gridnav_core::{Grid, Node};
use gridnav_paths::{Algorithm, Path, Search, Visit, euclidean, search};

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// What the view has learned about a cell from the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    Visited,
    Path,
}

const GLYPH_OPEN: char = '.';
const GLYPH_WALL: char = '#';
const GLYPH_VISITED: char = '+';
const GLYPH_PATH: char = '*';
const GLYPH_START: char = 'S';
const GLYPH_END: char = 'E';

const COL_WALL: Color = Color::DarkGrey;
const COL_OPEN: Color = Color::Grey;
const COL_VISITED: Color = Color::Cyan;
const COL_PATH: Color = Color::Yellow;
const COL_START: Color = Color::Green;
const COL_END: Color = Color::Magenta;

/// Search overlay drawn on top of a grid.
#[derive(Debug, Clone)]
pub struct Board {
    rows: i32,
    cols: i32,
    marks: Vec<Mark>,
}

impl Board {
    /// Create an empty overlay sized for `grid`.
    pub fn new(grid: &Grid) -> Self {
        Self {
            rows: grid.rows(),
            cols: grid.cols(),
            marks: vec![Mark::None; grid.bounds().len()],
        }
    }

    fn index(&self, n: Node) -> Option<usize> {
        if n.row < 0 || n.col < 0 || n.row >= self.rows || n.col >= self.cols {
            return None;
        }
        Some((n.row * self.cols + n.col) as usize)
    }

    /// The mark at `n`.
    pub fn mark(&self, n: Node) -> Mark {
        self.index(n).map_or(Mark::None, |i| self.marks[i])
    }

    /// Record a visitation event.
    pub fn visit(&mut self, v: Visit) {
        if let Some(i) = self.index(v.node) {
            if self.marks[i] == Mark::None {
                self.marks[i] = Mark::Visited;
            }
        }
    }

    /// Record the final path.
    pub fn trace(&mut self, path: &Path) {
        for &n in path {
            if let Some(i) = self.index(n) {
                self.marks[i] = Mark::Path;
            }
        }
    }

    /// Forget every mark.
    pub fn clear(&mut self) {
        self.marks.fill(Mark::None);
    }

    fn glyph(&self, grid: &Grid, n: Node) -> (char, Color) {
        if grid.start() == Some(n) {
            (GLYPH_START, COL_START)
        } else if grid.end() == Some(n) {
            (GLYPH_END, COL_END)
        } else if grid.is_obstacle(n) {
            (GLYPH_WALL, COL_WALL)
        } else {
            match self.mark(n) {
                Mark::Path => (GLYPH_PATH, COL_PATH),
                Mark::Visited => (GLYPH_VISITED, COL_VISITED),
                Mark::None => (GLYPH_OPEN, COL_OPEN),
            }
        }
    }

    /// Plain-text rendering, one line per row.
    pub fn to_text(&self, grid: &Grid) -> String {
        let mut s = String::with_capacity(self.marks.len() + self.rows as usize);
        for row in 0..self.rows {
            if row > 0 {
                s.push('\n');
            }
            for col in 0..self.cols {
                s.push(self.glyph(grid, Node::new(row, col)).0);
            }
        }
        s
    }

    /// Queue a coloured rendering of `grid` plus the overlay on `out`.
    pub fn draw(&self, grid: &Grid, out: &mut impl Write) -> io::Result<()> {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (ch, color) = self.glyph(grid, Node::new(row, col));
                out.queue(SetForegroundColor(color))?.queue(Print(ch))?;
            }
            out.queue(ResetColor)?.queue(Print("\r\n"))?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Stats
// ---------------------------------------------------------------------------

/// Figures reported after a run.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub algorithm: Algorithm,
    /// Sum of Euclidean step lengths, `None` if no path was found.
    pub path_length: Option<f64>,
    /// Number of visitation events.
    pub visited: usize,
    pub elapsed: Duration,
}

impl Stats {
    /// One-line human summary.
    pub fn summary(&self) -> String {
        let length = match self.path_length {
            Some(l) => format!("{l:.2}"),
            None => "no path".to_string(),
        };
        format!(
            "{:<9} path length: {:<8} nodes visited: {:<5} time: {:.3}ms",
            self.algorithm.name(),
            length,
            self.visited,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

/// Sum of the Euclidean distances between consecutive nodes.
pub fn path_length(path: &Path) -> f64 {
    path.nodes()
        .windows(2)
        .map(|w| euclidean(w[0], w[1]))
        .sum()
}

/// Parse a `row,col` pair.
pub fn parse_node(s: &str) -> Result<Node> {
    let Some((r, c)) = s.split_once(',') else {
        bail!("expected ROW,COL, got {s:?}");
    };
    let row = r.trim().parse().with_context(|| format!("invalid row in {s:?}"))?;
    let col = c.trim().parse().with_context(|| format!("invalid column in {s:?}"))?;
    Ok(Node::new(row, col))
}

// ---------------------------------------------------------------------------
// Runner
// ---------------------------------------------------------------------------

/// Drive one search to completion, feeding every event to `board`.
///
/// With a non-zero `delay` the board is redrawn on `out` after each event,
/// which is the only place pacing happens.
pub fn run_search(
    algorithm: Algorithm,
    grid: &Grid,
    board: &mut Board,
    delay: Duration,
    out: &mut impl Write,
) -> Result<Stats> {
    board.clear();
    let began = Instant::now();
    let mut s: Search<'_, Grid> = search(algorithm, grid).context("grid is not ready to search")?;
    let mut visited = 0;
    for v in s.by_ref() {
        board.visit(v);
        visited += 1;
        if !delay.is_zero() {
            redraw(board, grid, out)?;
            std::thread::sleep(delay);
        }
    }
    let elapsed = began.elapsed();
    let path = s.into_path();
    if let Some(p) = &path {
        board.trace(p);
    }
    log::info!("{algorithm}: {visited} visits, path found: {}", path.is_some());
    Ok(Stats {
        algorithm,
        path_length: path.as_ref().map(path_length),
        visited,
        elapsed,
    })
}

/// Run every algorithm on `grid` without drawing.
pub fn compare(grid: &Grid) -> Result<Vec<Stats>> {
    let mut board = Board::new(grid);
    let mut sink = io::sink();
    Algorithm::ALL
        .into_iter()
        .map(|algo| run_search(algo, grid, &mut board, Duration::ZERO, &mut sink))
        .collect()
}

/// Clear the terminal and draw the board from the top-left corner.
pub fn redraw(board: &Board, grid: &Grid, out: &mut impl Write) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?
        .queue(terminal::Clear(ClearType::All))?;
    board.draw(grid, out)?;
    out.flush()
}
