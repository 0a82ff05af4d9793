//! Obstacle generators for gridnav grids.
//!
//! Two generators are provided, both of which leave the start, end and any
//! extra keep-clear cells passable:
//! - **Random**: every other cell becomes an obstacle with a fixed
//!   probability. No connectivity guarantee.
//! - **Recursive division**: the grid is split by walls that each contain
//!   exactly one gap, which keeps every open cell reachable.

pub mod config;
pub mod mapgen;

pub use config::{MazeConfig, MazeKind, ParseMazeKindError};
pub use mapgen::{
    DEFAULT_DENSITY, MazeGen, Orientation, generate_random_maze, generate_recursive_maze,
};
