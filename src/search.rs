//! Best-first search over an implicit graph, unifying Dijkstra and A*.
//!
//! The engine is generic over the node type; the grid, the cost strategy and
//! the finalize observer are all supplied by the caller. Edges have unit
//! cost, so distances are plain step counts.

use std::hash::Hash;

use fxhash::{FxBuildHasher, FxHashSet};
use grid_util::point::Point;
use indexmap::IndexMap;
use log::debug;

use crate::error::MazeError;
use crate::heuristic::Heuristic;
use crate::maze_grid::MazeGrid;
use crate::pqueue::SearchQueue;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// How a search ended. [Unreachable](SearchStatus::Unreachable) is a normal
/// outcome to branch on, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The destination was finalized; its distance entry is the shortest
    /// step count.
    Reached,
    /// The queue emptied before the destination was finalized.
    Unreachable,
}

/// Everything a finished search leaves behind. The maps are insertion-ordered
/// (discovery order), which keeps iteration deterministic.
#[derive(Clone, Debug)]
pub struct SearchResult<N> {
    pub status: SearchStatus,
    pub distances: FxIndexMap<N, u32>,
    pub predecessors: FxIndexMap<N, N>,
}

/// The cost strategy injected into the queue comparator, resolved once at
/// configuration time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CostPolicy {
    /// Order by accumulated distance alone.
    Dijkstra,
    /// Order by accumulated distance plus the heuristic estimate.
    Astar(Heuristic),
}

impl CostPolicy {
    /// Queue priority of `cell` given its tentative distance `g`.
    pub fn priority(&self, g: u32, dest: Point, cell: Point) -> f64 {
        match self {
            CostPolicy::Dijkstra => g as f64,
            CostPolicy::Astar(heuristic) => g as f64 + heuristic.estimate(dest, cell),
        }
    }
}

/// One search invocation: origin, destination and cost policy, passed
/// explicitly into every core operation. Independent contexts never share
/// state, so separate searches cannot interfere.
#[derive(Clone, Copy, Debug)]
pub struct SearchContext {
    pub origin: Point,
    pub dest: Point,
    pub policy: CostPolicy,
}

impl SearchContext {
    pub fn new(origin: Point, dest: Point, policy: CostPolicy) -> SearchContext {
        SearchContext {
            origin,
            dest,
            policy,
        }
    }

    /// Runs the search over `grid`, invoking `on_finalize` once per finalized
    /// cell in finalize order.
    pub fn run<F>(&self, grid: &MazeGrid, on_finalize: F) -> SearchResult<Point>
    where
        F: FnMut(&Point, u32),
    {
        best_first(
            self.origin,
            self.dest,
            |p| grid.neighborhood_points(p),
            |g, cell| self.policy.priority(g, self.dest, *cell),
            on_finalize,
        )
    }

    /// Reconstructs the origin-to-destination path from a [Reached]
    /// (SearchStatus::Reached) result.
    pub fn reconstruct(&self, result: &SearchResult<Point>) -> Result<Vec<Point>, MazeError> {
        reconstruct_path(&result.predecessors, self.origin, self.dest)
    }
}

/// Generalized Dijkstra / A* with unit step cost.
///
/// Pops the minimum-priority cell, finalizes it (invoking `on_finalize` with
/// the cell and its now-permanent distance), stops when `dest` is finalized,
/// and otherwise relaxes each neighbor under the no-worse-skip rule: a
/// neighbor whose recorded distance is already equal or better is left
/// alone. Cells are pushed again on every improvement; the stale duplicates
/// are skipped when popped. Queue exhaustion, not an iteration bound, decides
/// unreachability.
///
/// `priority` maps a tentative distance and a cell to the queue key. It is
/// evaluated inside the heap comparator against the live distance map, so an
/// improvement to a queued cell reorders it immediately.
pub fn best_first<N, FN, IN, FP, FV>(
    origin: N,
    dest: N,
    mut successors: FN,
    priority: FP,
    mut on_finalize: FV,
) -> SearchResult<N>
where
    N: Eq + Hash + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = N>,
    FP: Fn(u32, &N) -> f64,
    FV: FnMut(&N, u32),
{
    let mut distances: FxIndexMap<N, u32> = FxIndexMap::default();
    let mut predecessors: FxIndexMap<N, N> = FxIndexMap::default();
    let mut finalized: FxHashSet<N> = FxHashSet::default();
    let mut frontier: SearchQueue<N> = SearchQueue::new();

    // The comparator reads the live distance map; every queued cell has an
    // entry, inserted before the push.
    distances.insert(origin, 0);
    frontier.push(origin, |a, b| {
        priority(distances[a], a) < priority(distances[b], b)
    });

    loop {
        let p = match frontier.pop(|a, b| {
            priority(distances[a], a) < priority(distances[b], b)
        }) {
            Some(p) => p,
            None => {
                debug!(
                    "queue exhausted after finalizing {} cells, destination not reached",
                    finalized.len()
                );
                return SearchResult {
                    status: SearchStatus::Unreachable,
                    distances,
                    predecessors,
                };
            }
        };
        if !finalized.insert(p) {
            // Stale duplicate of an already finalized cell.
            continue;
        }
        let gp = distances[&p];
        on_finalize(&p, gp);
        if p == dest {
            return SearchResult {
                status: SearchStatus::Reached,
                distances,
                predecessors,
            };
        }
        let neighbors = successors(&p);
        for n in neighbors {
            if finalized.contains(&n) {
                // Finalized distances are permanent, even when an
                // overestimating heuristic would now offer a shortcut.
                continue;
            }
            let candidate = gp + 1;
            if distances.get(&n).map_or(false, |&d| d <= candidate) {
                continue;
            }
            predecessors.insert(n, p);
            distances.insert(n, candidate);
            frontier.push(n, |a, b| {
                priority(distances[a], a) < priority(distances[b], b)
            });
        }
    }
}

/// Walks predecessor links back from `dest` and returns the path in
/// origin-to-destination order, both endpoints included.
///
/// Fails with [MazeError::BrokenChain] when a link is missing before the walk
/// reaches the origin, which happens when a caller reconstructs an
/// [Unreachable](SearchStatus::Unreachable) result without checking the
/// status first.
pub fn reconstruct_path<N>(
    predecessors: &FxIndexMap<N, N>,
    origin: N,
    dest: N,
) -> Result<Vec<N>, MazeError>
where
    N: Eq + Hash + Copy,
{
    let mut path: Vec<N> = itertools::unfold(Some(dest), |state| {
        let current = (*state)?;
        *state = if current == origin {
            None
        } else {
            predecessors.get(&current).copied()
        };
        Some(current)
    })
    .collect();
    match path.last() {
        Some(last) if *last == origin => {
            path.reverse();
            Ok(path)
        }
        _ => Err(MazeError::BrokenChain),
    }
}
