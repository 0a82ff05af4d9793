//! The shared frontier-exploration skeleton and its five strategies.
//!
//! Every strategy runs the same state machine over nodes
//! (unvisited → frontier → visited). They differ only in how the worklist
//! is ordered and in which edges update a node's bookkeeping; see
//! [`Algorithm`].

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use gridnav_core::{Bounds, Grid, GridError, Node};
use log::{debug, trace};
use thiserror::Error;

use crate::frontier::{PriorityFrontier, Worklist};
use crate::neighbors::Step;
use crate::path::{Path, Predecessors, reconstruct};
use crate::traits::Pather;

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The available search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    AStar,
    Dijkstra,
    Greedy,
    Bfs,
    Dfs,
}

impl Algorithm {
    /// Every strategy, in menu order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::AStar,
        Algorithm::Dijkstra,
        Algorithm::Greedy,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Short identifier, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::AStar => "astar",
            Self::Dijkstra => "dijkstra",
            Self::Greedy => "greedy",
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
        }
    }

    /// One-sentence summary of the strategy's behavior.
    pub fn description(self) -> &'static str {
        match self {
            Self::AStar => {
                "Expands nodes by cost so far plus the octile estimate to the goal; \
                 returns a shortest path while exploring less than Dijkstra."
            }
            Self::Dijkstra => {
                "Expands nodes in order of their distance from the start; \
                 returns a shortest path but explores in every direction."
            }
            Self::Greedy => {
                "Always expands the node that looks closest to the goal; \
                 very fast but the path may be longer than necessary."
            }
            Self::Bfs => {
                "Explores in layers of equal step count; \
                 returns a path with the fewest steps, ignoring diagonal cost."
            }
            Self::Dfs => {
                "Follows one branch as deep as possible before backtracking; \
                 finds a path if one exists but makes no length guarantee."
            }
        }
    }

    /// Whether returned paths are shortest under the geometric cost model.
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::AStar | Self::Dijkstra)
    }

    fn strategy(self) -> Strategy {
        match self {
            Self::AStar => Strategy {
                key: Key::CostPlusEstimate,
                update: Update::Improves,
            },
            Self::Dijkstra => Strategy {
                key: Key::Cost,
                update: Update::Improves,
            },
            Self::Greedy => Strategy {
                key: Key::Estimate,
                update: Update::NotVisited,
            },
            Self::Bfs => Strategy {
                key: Key::Fifo,
                update: Update::NotDiscovered,
            },
            Self::Dfs => Strategy {
                key: Key::Lifo,
                update: Update::NotDiscovered,
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string names no known [`Algorithm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown search algorithm {0:?} (expected astar, dijkstra, greedy, bfs or dfs)")]
pub struct ParseAlgorithmError(pub String);

impl FromStr for Algorithm {
    type Err = ParseAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "astar" | "a*" | "a-star" => Ok(Self::AStar),
            "dijkstra" => Ok(Self::Dijkstra),
            "greedy" | "best-first" => Ok(Self::Greedy),
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            _ => Err(ParseAlgorithmError(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Strategy descriptor
// ---------------------------------------------------------------------------

/// Ordering key of the worklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    CostPlusEstimate,
    Cost,
    Estimate,
    Fifo,
    Lifo,
}

/// Which edges update a neighbor's predecessor and re-enqueue it.
///
/// `Improves` and `NotVisited` tolerate duplicate frontier entries and
/// discard stale ones on extraction; `NotDiscovered` never enqueues a node
/// twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Update {
    Improves,
    NotVisited,
    NotDiscovered,
}

#[derive(Debug, Clone, Copy)]
struct Strategy {
    key: Key,
    update: Update,
}

impl Strategy {
    fn worklist(self) -> Worklist {
        match self.key {
            Key::Fifo => Worklist::Fifo(VecDeque::new()),
            Key::Lifo => Worklist::Lifo(Vec::new()),
            _ => Worklist::Priority(PriorityFrontier::new()),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// A node discovered by a search, reported the first time it is enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    pub node: Node,
    /// Discovery order, starting at 0.
    pub order: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeState {
    Unvisited,
    Frontier,
    Visited,
}

#[derive(Debug)]
enum Outcome {
    Running,
    Found(Path),
    NoPath,
}

/// Everything a drained search produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The path, or `None` if the end is unreachable.
    pub path: Option<Path>,
    /// Number of [`Visit`] events emitted.
    pub visits: usize,
}

/// A running search from `start` to `end`.
///
/// `Search` is an iterator of [`Visit`] events in algorithmic order. It
/// does no pacing of its own: each call to `next` advances the search just
/// far enough to produce the next event. Once the iterator returns `None`
/// the result is available from [`outcome`](Self::outcome). Dropping the
/// search early abandons it.
pub struct Search<'a, P: Pather + ?Sized> {
    pather: &'a P,
    algorithm: Algorithm,
    strategy: Strategy,
    bounds: Bounds,
    goal: Node,
    goal_idx: usize,
    worklist: Worklist,
    state: Vec<NodeState>,
    cost: Vec<f64>,
    preds: Predecessors,
    pending: VecDeque<Visit>,
    nbuf: Vec<Step>,
    discovered: usize,
    expanded: usize,
    outcome: Outcome,
}

/// Start a search on `grid` between its start and end cells.
///
/// Fails fast with [`GridError::MissingStart`] or [`GridError::MissingEnd`]
/// when the grid is not ready to be searched.
pub fn search(algorithm: Algorithm, grid: &Grid) -> Result<Search<'_, Grid>, GridError> {
    let (start, end) = grid.endpoints()?;
    Search::new(algorithm, grid, start, end)
}

impl<'a, P: Pather + ?Sized> Search<'a, P> {
    /// Prepare a search over `pather`. Nothing is explored until the first
    /// call to `next`.
    ///
    /// Both endpoints must be inside the bounds and passable.
    pub fn new(
        algorithm: Algorithm,
        pather: &'a P,
        start: Node,
        end: Node,
    ) -> Result<Self, GridError> {
        let bounds = pather.bounds();
        let check = |n: Node| -> Result<usize, GridError> {
            let i = bounds
                .index(n)
                .ok_or(GridError::OutOfBounds { node: n, bounds })?;
            if !pather.is_passable(n) {
                return Err(GridError::Blocked(n));
            }
            Ok(i)
        };
        let start_idx = check(start)?;
        let goal_idx = check(end)?;

        let strategy = algorithm.strategy();
        let mut worklist = strategy.worklist();
        let mut state = vec![NodeState::Unvisited; bounds.len()];
        let mut cost = vec![f64::INFINITY; bounds.len()];

        state[start_idx] = NodeState::Frontier;
        cost[start_idx] = 0.0;
        let priority = match strategy.key {
            Key::CostPlusEstimate | Key::Estimate => pather.estimate(start, end),
            _ => 0.0,
        };
        worklist.push(start_idx, priority);

        debug!("{algorithm} search from {start} to {end} on {bounds} grid");

        Ok(Self {
            pather,
            algorithm,
            strategy,
            bounds,
            goal: end,
            goal_idx,
            worklist,
            state,
            cost,
            preds: Predecessors::new(bounds),
            pending: VecDeque::with_capacity(8),
            nbuf: Vec::with_capacity(8),
            discovered: 0,
            expanded: 0,
            outcome: Outcome::Running,
        })
    }

    /// The strategy driving this search.
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Whether the search has terminated and every event has been drained.
    pub fn is_finished(&self) -> bool {
        !matches!(self.outcome, Outcome::Running) && self.pending.is_empty()
    }

    /// The path found, once the search is finished.
    ///
    /// `None` while the search is still running or when the end is
    /// unreachable; check [`is_finished`](Self::is_finished) to tell them
    /// apart.
    pub fn outcome(&self) -> Option<&Path> {
        match &self.outcome {
            Outcome::Found(path) if self.pending.is_empty() => Some(path),
            _ => None,
        }
    }

    /// Consume the search and return its path, if one was found.
    pub fn into_path(self) -> Option<Path> {
        match self.outcome {
            Outcome::Found(path) => Some(path),
            _ => None,
        }
    }

    /// Number of [`Visit`] events produced so far.
    pub fn visited_count(&self) -> usize {
        self.discovered - self.pending.len()
    }

    /// Drain the search and return its result.
    pub fn run(mut self) -> SearchResult {
        let visits = self.by_ref().count();
        SearchResult {
            path: self.into_path(),
            visits,
        }
    }

    /// Extract the next useful node and expand it, or terminate.
    fn step(&mut self) {
        let Some(ci) = self.worklist.pop() else {
            debug!(
                "{} search exhausted after {} expansions: no path",
                self.algorithm, self.expanded
            );
            self.outcome = Outcome::NoPath;
            return;
        };
        // Stale duplicate of a finalized node.
        if self.state[ci] == NodeState::Visited {
            return;
        }
        self.state[ci] = NodeState::Visited;

        if ci == self.goal_idx {
            let path = reconstruct(&self.preds, self.goal);
            debug!(
                "{} search reached {} after {} expansions, path of {} nodes",
                self.algorithm,
                self.goal,
                self.expanded,
                path.len()
            );
            self.outcome = Outcome::Found(path);
            return;
        }

        self.expand(ci);
    }

    fn expand(&mut self, ci: usize) {
        self.expanded += 1;
        let current = self.bounds.node(ci);
        let current_cost = self.cost[ci];

        let mut nbuf = std::mem::take(&mut self.nbuf);
        nbuf.clear();
        self.pather.neighbors(current, &mut nbuf);

        for step in nbuf.iter() {
            let Some(ni) = self.bounds.index(step.node) else {
                continue;
            };
            let ns = self.state[ni];
            if ns == NodeState::Visited {
                continue;
            }
            let tentative = current_cost + step.cost;
            match self.strategy.update {
                Update::Improves if tentative >= self.cost[ni] => continue,
                Update::NotDiscovered if ns != NodeState::Unvisited => continue,
                _ => {}
            }

            self.cost[ni] = self.cost[ni].min(tentative);
            self.preds.set_index(ni, ci);
            let priority = match self.strategy.key {
                Key::CostPlusEstimate => tentative + self.pather.estimate(step.node, self.goal),
                Key::Cost => tentative,
                Key::Estimate => self.pather.estimate(step.node, self.goal),
                Key::Fifo | Key::Lifo => 0.0,
            };
            self.worklist.push(ni, priority);

            if ns == NodeState::Unvisited {
                self.state[ni] = NodeState::Frontier;
                self.pending.push_back(Visit {
                    node: step.node,
                    order: self.discovered,
                });
                self.discovered += 1;
            }
        }

        trace!(
            "expanded {current}: {} discovered, worklist {}",
            self.discovered,
            self.worklist.len()
        );
        self.nbuf = nbuf;
    }
}

impl<P: Pather + ?Sized> Iterator for Search<'_, P> {
    type Item = Visit;

    fn next(&mut self) -> Option<Visit> {
        loop {
            if let Some(v) = self.pending.pop_front() {
                return Some(v);
            }
            if !matches!(self.outcome, Outcome::Running) {
                return None;
            }
            self.step();
        }
    }
}

impl<P: Pather + ?Sized> std::iter::FusedIterator for Search<'_, P> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::euclidean;
    use crate::neighbors::expand;
    use std::collections::HashSet;
    use std::f64::consts::SQRT_2;

    const EPS: f64 = 1e-9;

    fn length(path: &Path) -> f64 {
        path.nodes().windows(2).map(|w| euclidean(w[0], w[1])).sum()
    }

    /// Shortest distances from `src` by plain relaxation until fixpoint,
    /// with `unit` forcing every step to cost 1.
    fn brute_force(grid: &Grid, src: Node, unit: bool) -> Vec<f64> {
        let b = grid.bounds();
        let mut dist = vec![f64::INFINITY; b.len()];
        dist[b.index(src).unwrap()] = 0.0;
        let mut buf = Vec::new();
        loop {
            let mut changed = false;
            for n in b {
                let d = dist[b.index(n).unwrap()];
                if d.is_infinite() {
                    continue;
                }
                buf.clear();
                expand(grid, n, &mut buf);
                for s in &buf {
                    let c = if unit { 1.0 } else { s.cost };
                    let ni = b.index(s.node).unwrap();
                    if d + c < dist[ni] - EPS {
                        dist[ni] = d + c;
                        changed = true;
                    }
                }
            }
            if !changed {
                return dist;
            }
        }
    }

    /// Deterministic obstacle fields without pulling in an RNG.
    fn scrambled_grid(rows: i32, cols: i32, seed: u64) -> Grid {
        let mut g = Grid::new(rows, cols);
        let mut x = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        for n in g.bounds() {
            x = x
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            if (x >> 33) % 100 < 30 {
                g.set_obstacle(n, true).unwrap();
            }
        }
        g.set_start(Node::new(0, 0)).unwrap();
        g.set_end(Node::new(rows - 1, cols - 1)).unwrap();
        g
    }

    #[test]
    fn open_3x3_diagonal() {
        let mut g = Grid::new(3, 3);
        g.set_start(Node::new(0, 0)).unwrap();
        g.set_end(Node::new(2, 2)).unwrap();
        let res = search(Algorithm::AStar, &g).unwrap().run();
        let path = res.path.unwrap();
        assert_eq!(
            path.nodes(),
            &[Node::new(0, 0), Node::new(1, 1), Node::new(2, 2)]
        );
        assert!((length(&path) - 2.0 * SQRT_2).abs() < EPS);
        assert!(res.visits <= 9);
    }

    #[test]
    fn full_wall_blocks_every_algorithm() {
        let g: Grid = "S....\n#####\n....E".parse().unwrap();
        for algo in Algorithm::ALL {
            let res = search(algo, &g).unwrap().run();
            assert_eq!(res.path, None, "{algo}");
            assert!(res.visits > 0, "{algo}");
        }
    }

    #[test]
    fn single_gap_is_crossed_orthogonally() {
        let g: Grid = "S....\n##.##\n....E".parse().unwrap();
        let through = [Node::new(0, 2), Node::new(1, 2), Node::new(2, 2)];
        for algo in Algorithm::ALL {
            let path = search(algo, &g).unwrap().run().path.unwrap();
            assert!(
                path.nodes().windows(3).any(|w| w == through),
                "{algo}: {:?}",
                path.nodes()
            );
            assert!(path.is_contiguous(&g), "{algo}");
        }
    }

    #[test]
    fn diagonal_gaps_are_not_passable() {
        // The two halves only touch diagonally between blocked corners.
        let g: Grid = "S..#\n..#.\n.#..\n#..E".parse().unwrap();
        for algo in Algorithm::ALL {
            assert_eq!(search(algo, &g).unwrap().run().path, None, "{algo}");
        }
    }

    #[test]
    fn returned_paths_never_cut_corners() {
        for seed in 0..40 {
            let g = scrambled_grid(6, 6, seed);
            for algo in Algorithm::ALL {
                if let Some(path) = search(algo, &g).unwrap().run().path {
                    for w in path.nodes().windows(2) {
                        let (a, b) = (w[0], w[1]);
                        if a.is_diagonal_to(b) {
                            assert!(g.is_passable(Node::new(b.row, a.col)));
                            assert!(g.is_passable(Node::new(a.row, b.col)));
                        }
                    }
                    assert!(path.is_contiguous(&g), "{algo} seed {seed}");
                    assert_eq!(path.start(), g.start());
                    assert_eq!(path.end(), g.end());
                }
            }
        }
    }

    #[test]
    fn optimal_strategies_match_brute_force() {
        for seed in 0..60 {
            let rows = 2 + (seed % 5) as i32;
            let cols = 6 - (seed % 3) as i32;
            let g = scrambled_grid(rows, cols, seed);
            let (start, end) = g.endpoints().unwrap();
            let best = brute_force(&g, start, false)[g.bounds().index(end).unwrap()];
            for algo in [Algorithm::AStar, Algorithm::Dijkstra] {
                let path = search(algo, &g).unwrap().run().path;
                match path {
                    Some(p) => assert!((length(&p) - best).abs() < 1e-6, "{algo} seed {seed}"),
                    None => assert!(best.is_infinite(), "{algo} seed {seed}"),
                }
            }
        }
    }

    #[test]
    fn bfs_minimises_step_count() {
        for seed in 0..60 {
            let g = scrambled_grid(6, 6, seed);
            let (start, end) = g.endpoints().unwrap();
            let best = brute_force(&g, start, true)[g.bounds().index(end).unwrap()];
            if let Some(p) = search(Algorithm::Bfs, &g).unwrap().run().path {
                assert_eq!((p.len() - 1) as f64, best, "seed {seed}");
            }
        }
    }

    #[test]
    fn every_strategy_is_complete() {
        for seed in 0..60 {
            let g = scrambled_grid(5, 6, seed);
            let (start, end) = g.endpoints().unwrap();
            let reachable =
                brute_force(&g, start, true)[g.bounds().index(end).unwrap()].is_finite();
            for algo in Algorithm::ALL {
                let path = search(algo, &g).unwrap().run().path;
                assert_eq!(path.is_some(), reachable, "{algo} seed {seed}");
                if let Some(p) = path {
                    assert!(!p.is_empty());
                }
            }
        }
    }

    #[test]
    fn visits_are_unique_and_ordered() {
        let g = scrambled_grid(6, 6, 7);
        for algo in Algorithm::ALL {
            let s = search(algo, &g).unwrap();
            let visits: Vec<Visit> = s.collect();
            let mut seen = HashSet::new();
            for (i, v) in visits.iter().enumerate() {
                assert_eq!(v.order, i);
                assert!(seen.insert(v.node), "{algo} reported {} twice", v.node);
                assert_ne!(Some(v.node), g.start());
                assert!(g.is_passable(v.node));
            }
            assert!(visits.len() < g.bounds().len());
        }
    }

    #[test]
    fn outcome_appears_only_after_draining() {
        let g: Grid = "S...E".parse().unwrap();
        let mut s = search(Algorithm::Bfs, &g).unwrap();
        assert!(!s.is_finished());
        let first = s.next().unwrap();
        assert_eq!(first, Visit { node: Node::new(0, 1), order: 0 });
        assert_eq!(s.outcome(), None);
        assert_eq!(s.visited_count(), 1);
        while s.next().is_some() {}
        assert!(s.is_finished());
        assert_eq!(s.outcome().map(Path::len), Some(5));
        assert_eq!(s.next(), None);
    }

    #[test]
    fn abandoning_a_search_is_fine() {
        let g = scrambled_grid(6, 6, 3);
        let s = search(Algorithm::Dijkstra, &g).unwrap();
        let taken: Vec<_> = s.take(2).collect();
        assert!(taken.len() <= 2);
    }

    #[test]
    fn start_equal_to_end() {
        let g = Grid::new(3, 3);
        let res = Search::new(Algorithm::AStar, &g, Node::new(1, 1), Node::new(1, 1))
            .unwrap()
            .run();
        assert_eq!(res.path.unwrap().into_vec(), vec![Node::new(1, 1)]);
        assert_eq!(res.visits, 0);
    }

    #[test]
    fn greedy_walks_straight_on_open_grid() {
        let mut g = Grid::new(1, 6);
        g.set_start(Node::new(0, 0)).unwrap();
        g.set_end(Node::new(0, 5)).unwrap();
        let res = search(Algorithm::Greedy, &g).unwrap().run();
        assert_eq!(res.path.unwrap().len(), 6);
        assert_eq!(res.visits, 5);
    }

    #[test]
    fn dfs_finds_a_path_around_walls() {
        let g: Grid = "S.#...\n..#.#.\n....#E".parse().unwrap();
        let path = search(Algorithm::Dfs, &g).unwrap().run().path.unwrap();
        assert!(path.is_contiguous(&g));
        assert_eq!(path.end(), Some(Node::new(2, 5)));
    }

    #[test]
    fn astar_explores_no_more_than_dijkstra() {
        let mut g = Grid::new(15, 15);
        g.set_start(Node::new(7, 0)).unwrap();
        g.set_end(Node::new(7, 14)).unwrap();
        let a = search(Algorithm::AStar, &g).unwrap().run();
        let d = search(Algorithm::Dijkstra, &g).unwrap().run();
        assert!(a.visits <= d.visits);
        assert!((length(&a.path.unwrap()) - 14.0).abs() < EPS);
    }

    #[test]
    fn precondition_errors() {
        let mut g = Grid::new(3, 3);
        assert!(matches!(search(Algorithm::Bfs, &g), Err(GridError::MissingStart)));
        g.set_start(Node::new(0, 0)).unwrap();
        assert!(matches!(search(Algorithm::Bfs, &g), Err(GridError::MissingEnd)));
        let err = Search::new(Algorithm::Bfs, &g, Node::new(0, 0), Node::new(3, 3)).err();
        assert!(matches!(err, Some(GridError::OutOfBounds { .. })));
    }

    #[test]
    fn blocked_endpoints_are_rejected() {
        let g: Grid = "S#.\n...\n.#E".parse().unwrap();
        let from_wall = Search::new(Algorithm::AStar, &g, Node::new(0, 1), Node::new(2, 2)).err();
        assert_eq!(from_wall, Some(GridError::Blocked(Node::new(0, 1))));
        let into_wall = Search::new(Algorithm::Dfs, &g, Node::new(0, 0), Node::new(2, 1)).err();
        assert_eq!(into_wall, Some(GridError::Blocked(Node::new(2, 1))));
    }

    #[test]
    fn algorithm_names_round_trip() {
        for algo in Algorithm::ALL {
            assert_eq!(algo.to_string().parse::<Algorithm>(), Ok(algo));
            assert!(!algo.description().is_empty());
        }
        assert_eq!("A*".parse::<Algorithm>(), Ok(Algorithm::AStar));
        assert_eq!(" DFS ".parse::<Algorithm>(), Ok(Algorithm::Dfs));
        assert!("dykstra".parse::<Algorithm>().is_err());
        assert!(Algorithm::AStar.is_optimal());
        assert!(!Algorithm::Greedy.is_optimal());
    }
}
