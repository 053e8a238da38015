//! Lattice error types.

use thiserror::Error;

/// Errors from grid construction and weighted path search.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    /// Grid needs at least one cell on each axis.
    #[error("invalid grid dimensions: {size_x}x{size_y}")]
    InvalidDimensions { size_x: usize, size_y: usize },

    /// Chunk size must be finite and positive.
    #[error("invalid chunk size: {0}")]
    InvalidChunkSize(f64),

    /// Search ran out of iterations before reaching its goal.
    #[error("search max depth of {max_depth} has been reached")]
    MaxDepthExceeded { max_depth: usize },

    /// Every route to the end cell is blocked by impassable cells.
    #[error("weighted search could not find a path")]
    PathNotFound,
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors from the bounded flood search.
///
/// `E` is whatever the visitor returns to abort the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError<E> {
    /// Frontier was still non-empty after `max_depth` levels.
    #[error("search max depth of {max_depth} has been reached")]
    MaxDepthExceeded { max_depth: usize },

    /// Visitor returned an error.
    #[error("search visitor failed: {0}")]
    Visitor(#[source] E),
}
