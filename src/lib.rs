//! # bitmap_pathfinding
//!
//! Shortest paths on grids derived from bitmap images: black pixels are
//! walls, every other color is passable. The search core is a best-first
//! engine unifying
//! [Dijkstra](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm) and
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) over a
//! lazy-deletion priority queue whose ordering is recomputed from the live
//! distance map on every comparison. Edges have unit cost, diagonal steps
//! included, so distances are step counts. The accompanying binary replays
//! the exploration and the found path as an animated GIF.

pub mod error;
pub mod heuristic;
pub mod maze_grid;
pub mod pqueue;
pub mod render;
pub mod search;

pub use error::MazeError;
pub use heuristic::Heuristic;
pub use maze_grid::MazeGrid;
pub use pqueue::SearchQueue;
pub use search::{
    best_first, reconstruct_path, CostPolicy, SearchContext, SearchResult, SearchStatus,
};
