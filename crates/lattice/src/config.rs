//! Grid and search configuration.

use serde::{Deserialize, Serialize};

use crate::{LatticeError, LatticeResult};

/// Dimensions of a grid, fixed for its whole lifetime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Number of cells along x.
    pub size_x: usize,
    /// Number of cells along y.
    pub size_y: usize,
    /// Edge length of one square cell in world units.
    pub chunk_size: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size_x: 64,
            size_y: 64,
            chunk_size: 32.0,
        }
    }
}

impl GridConfig {
    #[must_use]
    pub const fn new(size_x: usize, size_y: usize, chunk_size: f64) -> Self {
        Self {
            size_x,
            size_y,
            chunk_size,
        }
    }

    /// Reject empty grids and non-positive or non-finite chunk sizes.
    pub fn validate(&self) -> LatticeResult<()> {
        if self.size_x == 0
            || self.size_y == 0
            || self.size_x.checked_mul(self.size_y).is_none()
        {
            return Err(LatticeError::InvalidDimensions {
                size_x: self.size_x,
                size_y: self.size_y,
            });
        }

        if !self.chunk_size.is_finite() || self.chunk_size <= 0.0 {
            return Err(LatticeError::InvalidChunkSize(self.chunk_size));
        }

        Ok(())
    }
}

/// Iteration caps handed to the two searches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Breadth-first levels allowed for the flood search.
    pub flood_max_depth: usize,
    /// Frontier pops allowed for the weighted search.
    pub path_max_depth: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            flood_max_depth: 32,
            path_max_depth: 100_000,
        }
    }
}
