//! Grid search strategies for gridnav.
//!
//! Five interchangeable strategies share one frontier-exploration skeleton:
//!
//! - **A\*** ordered by `g + h`, optimal
//! - **Dijkstra** ordered by `g`, optimal
//! - **Greedy best-first** ordered by `h`, fast but not optimal
//! - **BFS** FIFO, fewest steps
//! - **DFS** LIFO, finds *a* path
//!
//! Movement is 8-directional with cost 1 orthogonally and √2 diagonally;
//! a diagonal step is only legal when both orthogonal cells beside it are
//! open. The heuristic is the octile distance.
//!
//! A [`Search`] is an iterator of [`Visit`] events, one per newly
//! discovered node. The caller drains it at its own pace (or drops it to
//! cancel) and reads the final [`Path`] from [`Search::outcome`].
//!
//! # Trait seam
//!
//! | Item | Role |
//! |---|---|
//! | [`Pather`] | bounds, neighbor expansion and heuristic |
//! | `Grid` | the [`Pather`] backing every real search |

mod distance;
mod frontier;
mod neighbors;
mod path;
mod search;
mod traits;

pub use distance::{euclidean, octile};
pub use frontier::PriorityFrontier;
pub use neighbors::{Neighbors, Step, expand};
pub use path::{Path, Predecessors, reconstruct};
pub use search::{Algorithm, ParseAlgorithmError, Search, SearchResult, Visit, search};
pub use traits::Pather;
