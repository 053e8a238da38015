//! Grid cells and their occupant buckets.

use lattice_geometry::{Rectangle, Vector};

/// Integer coordinates of a cell in the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: usize,
    pub y: usize,
}

impl CellCoord {
    /// Create a coordinate from cell indices.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance in cell-index units.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for CellCoord {
    fn from((x, y): (usize, usize)) -> Self {
        Self::new(x, y)
    }
}

/// Bookkeeping for one occupant, stored alongside its value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Occupancy {
    /// Bounds the occupant was inserted with.
    pub bounds: Rectangle,
    /// Cost density factor; `f64::INFINITY` marks an impassable occupant.
    pub multiplier: f64,
    /// Weight this occupant added to its cell, fixed at insertion.
    pub weight: f64,
}

impl Occupancy {
    /// Whether this occupant contributed an infinite weight.
    #[must_use]
    pub fn is_impassable(&self) -> bool {
        self.weight.is_infinite()
    }
}

/// A spatial cell holding the occupants whose bounds are centered inside it.
///
/// Values and their [`Occupancy`] records are kept in two parallel vectors so
/// the values can be handed to visitors as a plain slice.
#[derive(Clone, Debug)]
pub struct Cell<T> {
    coord: CellCoord,
    /// Reference rectangle used for overlap weights, never for containment.
    bounds: Rectangle,
    /// Sum of finite contributions.
    finite_weight: f64,
    /// Number of occupants that contributed an infinite weight.
    impassable: usize,
    values: Vec<T>,
    records: Vec<Occupancy>,
}

impl<T> Cell<T> {
    /// Create an empty cell whose reference rectangle covers its chunk.
    #[must_use]
    pub fn new(coord: CellCoord, chunk_size: f64) -> Self {
        let center = Vector::new(
            (coord.x as f64).mul_add(chunk_size, chunk_size / 2.0),
            (coord.y as f64).mul_add(chunk_size, chunk_size / 2.0),
        );

        Self {
            coord,
            bounds: Rectangle::new(center, chunk_size, chunk_size),
            finite_weight: 0.0,
            impassable: 0,
            values: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Position of this cell in the grid.
    #[must_use]
    pub const fn coord(&self) -> CellCoord {
        self.coord
    }

    /// Reference rectangle covering the chunk.
    #[must_use]
    pub const fn bounds(&self) -> &Rectangle {
        &self.bounds
    }

    /// Aggregate traversal weight of every occupant in the cell.
    ///
    /// Infinite as long as at least one impassable occupant is present.
    #[must_use]
    pub fn weight(&self) -> f64 {
        if self.impassable > 0 {
            f64::INFINITY
        } else {
            self.finite_weight
        }
    }

    /// Whether any occupant made the cell a wall.
    #[must_use]
    pub fn is_impassable(&self) -> bool {
        self.impassable > 0
    }

    /// Occupant values in insertion order, modulo swap-removals.
    #[must_use]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Occupant values paired with their bookkeeping.
    pub fn occupants(&self) -> impl Iterator<Item = (&T, &Occupancy)> {
        self.values.iter().zip(&self.records)
    }

    /// Number of occupants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the cell has no occupants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Add an occupant and return the weight it contributed.
    ///
    /// The contribution is the overlap of `bounds` with this cell's reference
    /// rectangle times `multiplier`. No overlap contributes nothing, even for
    /// an infinite multiplier.
    pub fn insert(&mut self, value: T, bounds: Rectangle, multiplier: f64) -> f64 {
        debug_assert!(
            multiplier >= 0.0,
            "multiplier must be non-negative, got {multiplier}"
        );

        let overlap = self.bounds.area_of_overlap(&bounds);
        let weight = if overlap > 0.0 {
            overlap * multiplier
        } else {
            0.0
        };

        if weight.is_infinite() {
            self.impassable += 1;
        } else {
            self.finite_weight += weight;
        }

        self.values.push(value);
        self.records.push(Occupancy {
            bounds,
            multiplier,
            weight,
        });

        weight
    }
}

impl<T: PartialEq> Cell<T> {
    /// Remove the first occupant equal to `value`.
    ///
    /// The last occupant takes its slot. Returns the removed occupant, or
    /// `None` when nothing matched.
    pub fn remove(&mut self, value: &T) -> Option<(T, Occupancy)> {
        let index = self.values.iter().position(|v| v == value)?;

        let removed = self.values.swap_remove(index);
        let record = self.records.swap_remove(index);

        if record.is_impassable() {
            self.impassable -= 1;
        } else {
            // Subtracting would leave rounding residue behind.
            self.finite_weight = self
                .records
                .iter()
                .filter(|r| !r.is_impassable())
                .fold(0.0, |sum, r| sum + r.weight);
        }

        Some((removed, record))
    }
}
