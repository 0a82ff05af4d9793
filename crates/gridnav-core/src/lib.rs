//! **gridnav-core**: data model for grid-based path search.
//!
//! This crate provides the types shared across the *gridnav* workspace:
//! the [`Node`] coordinate, the [`Bounds`] rectangle used to pack nodes
//! into flat arena indices, the obstacle [`Grid`] with its distinguished
//! start and end cells, and the [`GridError`] precondition type.

pub mod error;
pub mod geom;
pub mod grid;
mod text;

pub use error::GridError;
pub use geom::{Bounds, BoundsIter, Node};
pub use grid::Grid;
