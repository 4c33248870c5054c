//! Error types for bitmap_pathfinding.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("unknown heuristic '{0}', expected one of [manhattan|euclidian]")]
    UnknownHeuristic(String),

    #[error("heuristic prefix '{0}' is ambiguous")]
    AmbiguousHeuristic(String),

    /// A predecessor lookup missed before the walk reached the origin. This
    /// signals reconstruction of an `Unreachable` result or a corrupted
    /// predecessor map, never a merely shorter path.
    #[error("predecessor chain is broken before reaching the origin")]
    BrokenChain,

    #[error("no passable cell in the {0} row")]
    NoOpenCell(&'static str),

    #[error("bad cell coordinate '{0}', expected X,Y")]
    BadCoordinate(String),

    #[error("destination is unreachable from the origin")]
    NoPath,

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
