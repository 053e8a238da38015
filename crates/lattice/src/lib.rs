//! Lattice Spatial Grid
//!
//! Divides the plane into a fixed grid of square chunks. Each chunk holds the
//! values whose bounds are centered inside it and a weight summarizing how
//! densely it is occupied.
//!
//! ```text
//!         x →
//!       ┌─────┬─────┬─────┐
//!   y   │ 0,0 │ 1,0 │ 2,0 │   cell = clamp(floor(pos / chunk_size))
//!   ↓   ├─────┼─────┼─────┤
//!       │ 0,1 │ 1,1 │ 2,1 │   weight = Σ overlap(cell, bounds) × multiplier
//!       └─────┴─────┴─────┘
//! ```
//!
//! On top of that index the grid answers:
//!
//! - **Range queries** ([`SpatialGrid::find_near`]): distinct values in every
//!   cell a rectangle touches.
//! - **Flood search** ([`SpatialGrid::search`]): depth-bounded breadth-first
//!   visit of cells around a point.
//! - **Weighted search** ([`SpatialGrid::weighted_search`]): A* where entering
//!   a cell costs its weight and infinite-weight cells are walls.
//!
//! # Concurrency
//!
//! A grid is shared by reference between threads. One reader/writer lock
//! guards every cell: inserts, deletes and [`SpatialGrid::drop_all`] are
//! exclusive, queries run side by side. [`SpatialGrid::update`] takes the
//! write lock twice, so readers may see the value briefly absent.
//!
//! # Usage
//!
//! ```
//! use lattice::SpatialGrid;
//! use lattice_geometry::{Rectangle, Vector};
//!
//! let grid = SpatialGrid::new(4, 1, 10.0)?;
//! grid.insert("rock", Rectangle::new(Vector::new(15.0, 5.0), 10.0, 10.0), 2.0);
//!
//! assert_eq!(grid.weight_at(1, 0), 200.0);
//! assert_eq!(grid.find_near(&Rectangle::new(Vector::new(10.0, 5.0), 4.0, 4.0)), vec!["rock"]);
//!
//! let path = grid.weighted_search(Vector::new(5.0, 5.0), Vector::new(35.0, 5.0), 64)?;
//! assert_eq!(path.len(), 4);
//! # Ok::<(), lattice::LatticeError>(())
//! ```

pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod path;
pub mod raster;
pub mod search;

pub use cell::{Cell, CellCoord, Occupancy};
pub use config::{GridConfig, SearchConfig};
pub use error::{LatticeError, LatticeResult, SearchError};
pub use grid::{DIRECTIONS, Dimensions, Item, Neighbors, SpatialGrid};
pub use path::Path;
pub use raster::BresenhamLine;
