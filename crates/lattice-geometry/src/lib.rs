//! Geometry primitives for the lattice spatial grid.
//!
//! Only what the grid consumes lives here: a 2D [`Vector`] with component-wise
//! arithmetic and an axis-aligned [`Rectangle`] described by its center.

pub mod rectangle;
pub mod vector;

pub use rectangle::Rectangle;
pub use vector::Vector;
