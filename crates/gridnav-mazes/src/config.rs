//! Declarative maze settings.

use std::fmt;
use std::str::FromStr;

use gridnav_core::{Grid, Node};
use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::mapgen::{DEFAULT_DENSITY, MazeGen};

/// Which generator to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MazeKind {
    /// Remove every obstacle.
    #[default]
    Empty,
    /// Independent random obstacles.
    Random,
    /// Recursive division with single-gap walls.
    Recursive,
}

impl MazeKind {
    /// Short identifier, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Random => "random",
            Self::Recursive => "recursive",
        }
    }
}

impl fmt::Display for MazeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`MazeKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown maze kind {0:?} (expected empty, random or recursive)")]
pub struct ParseMazeKindError(pub String);

impl FromStr for MazeKind {
    type Err = ParseMazeKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "empty" | "none" => Ok(Self::Empty),
            "random" => Ok(Self::Random),
            "recursive" | "division" | "recursive-division" => Ok(Self::Recursive),
            _ => Err(ParseMazeKindError(s.to_string())),
        }
    }
}

/// Maze settings: generator, obstacle density and optional seed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MazeConfig {
    pub kind: MazeKind,
    /// Obstacle probability for [`MazeKind::Random`].
    pub density: f64,
    /// Fixed seed for reproducible mazes; a fresh one is drawn if `None`.
    pub seed: Option<u64>,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            kind: MazeKind::Empty,
            density: DEFAULT_DENSITY,
            seed: None,
        }
    }
}

impl MazeConfig {
    /// Run the configured generator on `grid` and return the number of
    /// obstacles placed.
    pub fn apply(&self, grid: &mut Grid, keep_clear: &[Node]) -> usize {
        let seed = self.seed.unwrap_or_else(rand::random);
        debug!("{} maze with seed {seed}", self.kind);
        let mut mg = MazeGen::new(StdRng::seed_from_u64(seed));
        match self.kind {
            MazeKind::Empty => {
                grid.clear_obstacles();
                0
            }
            MazeKind::Random => mg.random(grid, self.density, keep_clear),
            MazeKind::Recursive => mg.recursive_division(grid, keep_clear),
        }
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = MazeConfig {
            kind: MazeKind::Recursive,
            density: 0.25,
            seed: Some(7),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: MazeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: MazeConfig = serde_json::from_str(r#"{"kind":"random"}"#).unwrap();
        assert_eq!(cfg.kind, MazeKind::Random);
        assert_eq!(cfg.density, DEFAULT_DENSITY);
    }
}
