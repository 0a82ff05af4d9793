//! Terminal path-search demo.
//!
//! Run: cargo run --bin gridnav -- --maze recursive --algorithm astar --delay-ms 20

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use gridnav_core::{Grid, Node};
use gridnav_demos::{Board, compare, parse_node, redraw, run_search};
use gridnav_mazes::{DEFAULT_DENSITY, MazeConfig, MazeKind};
use gridnav_paths::Algorithm;

#[derive(Parser, Debug)]
#[command(author, version, about = "Visualise grid path-search strategies in the terminal")]
struct Cli {
    /// Number of rows when no map file is given.
    #[arg(long, default_value_t = 20)]
    rows: i32,

    /// Number of columns when no map file is given.
    #[arg(long, default_value_t = 20)]
    cols: i32,

    /// Search strategy: astar, dijkstra, greedy, bfs or dfs.
    #[arg(short, long, default_value_t = Algorithm::AStar)]
    algorithm: Algorithm,

    /// Obstacle generator: empty, random or recursive.
    #[arg(short, long, default_value_t = MazeKind::Empty)]
    maze: MazeKind,

    /// Obstacle probability for the random generator.
    #[arg(long, default_value_t = DEFAULT_DENSITY)]
    density: f64,

    /// Seed for reproducible mazes.
    #[arg(long)]
    seed: Option<u64>,

    /// Load the grid from an ASCII map (`.` open, `#` wall, `S` start, `E` end).
    #[arg(long)]
    map: Option<PathBuf>,

    /// Start cell as ROW,COL (defaults to the top-left corner).
    #[arg(long, value_parser = parse_node)]
    start: Option<Node>,

    /// End cell as ROW,COL (defaults to the bottom-right corner).
    #[arg(long, value_parser = parse_node)]
    end: Option<Node>,

    /// Redraw after every visited node, pausing this many milliseconds.
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Run every algorithm on the same grid and print a comparison.
    #[arg(long)]
    compare: bool,

    /// Print the algorithm descriptions and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        for algo in Algorithm::ALL {
            println!("{:<9} {}", algo.name(), algo.description());
        }
        return Ok(());
    }

    let grid = build_grid(&cli)?;
    let mut out = io::stdout();

    if cli.compare {
        println!("{grid}\n");
        for stats in compare(&grid)? {
            println!("{}", stats.summary());
        }
        return Ok(());
    }

    let mut board = Board::new(&grid);
    let delay = Duration::from_millis(cli.delay_ms);
    let stats = run_search(cli.algorithm, &grid, &mut board, delay, &mut out)?;
    redraw(&board, &grid, &mut out)?;
    writeln!(out, "{}", stats.summary())?;
    Ok(())
}

fn build_grid(cli: &Cli) -> Result<Grid> {
    let mut grid = match &cli.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read map {}", path.display()))?;
            text.parse::<Grid>()
                .with_context(|| format!("failed to parse map {}", path.display()))?
        }
        None => Grid::new(cli.rows, cli.cols),
    };

    let start = cli
        .start
        .or(grid.start())
        .unwrap_or(Node::new(0, 0));
    let end = cli
        .end
        .or(grid.end())
        .unwrap_or(Node::new(grid.rows() - 1, grid.cols() - 1));
    grid.clear_start();
    grid.clear_end();
    grid.set_start(start).context("invalid start cell")?;
    grid.set_end(end).context("invalid end cell")?;

    // A map file keeps its own obstacles unless a generator is requested.
    if cli.map.is_none() || cli.maze != MazeKind::Empty {
        let config = MazeConfig {
            kind: cli.maze,
            density: cli.density,
            seed: cli.seed,
        };
        config.apply(&mut grid, &[]);
    }
    Ok(grid)
}
