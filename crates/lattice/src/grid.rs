//! Chunked spatial grid.

use core::hash::Hash;

use hashbrown::HashSet;
use lattice_geometry::{Rectangle, Vector};
use parking_lot::RwLock;
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::{Cell, CellCoord, GridConfig, LatticeResult};

/// 4-connected neighbor offsets, in the order neighbors are visited.
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Neighbors of a single cell.
pub type Neighbors = SmallVec<[CellCoord; 4]>;

/// A value to insert, bundled with its bounds and cost multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct Item<T> {
    pub value: T,
    pub bounds: Rectangle,
    pub multiplier: f64,
}

impl<T> Item<T> {
    #[must_use]
    pub const fn new(value: T, bounds: Rectangle, multiplier: f64) -> Self {
        Self {
            value,
            bounds,
            multiplier,
        }
    }
}

/// Fixed shape of a grid: cell counts and chunk size.
///
/// All coordinate-to-cell translation goes through [`Dimensions::location`].
/// Only a validated [`GridConfig`] can produce one, so both axes hold at
/// least one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    size_x: usize,
    size_y: usize,
    chunk_size: f64,
}

impl Dimensions {
    fn from_config(config: &GridConfig) -> LatticeResult<Self> {
        config.validate()?;

        Ok(Self {
            size_x: config.size_x,
            size_y: config.size_y,
            chunk_size: config.chunk_size,
        })
    }

    /// Number of cells along x.
    #[must_use]
    pub const fn size_x(&self) -> usize {
        self.size_x
    }

    /// Number of cells along y.
    #[must_use]
    pub const fn size_y(&self) -> usize {
        self.size_y
    }

    /// Edge length of one cell.
    #[must_use]
    pub const fn chunk_size(&self) -> f64 {
        self.chunk_size
    }

    /// Total number of cells.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size_x * self.size_y
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell containing a world position.
    ///
    /// Each axis is floored to a cell index and clamped into the grid, so
    /// positions outside the grid land on the nearest border cell.
    #[must_use]
    pub fn location(&self, x: f64, y: f64) -> CellCoord {
        CellCoord::new(
            axis_index(x, self.chunk_size, self.size_x),
            axis_index(y, self.chunk_size, self.size_y),
        )
    }

    /// Clamp integer cell indices into the grid.
    #[must_use]
    pub fn clamp(&self, coord: CellCoord) -> CellCoord {
        CellCoord::new(
            coord.x.min(self.size_x - 1),
            coord.y.min(self.size_y - 1),
        )
    }

    #[must_use]
    pub const fn contains(&self, coord: CellCoord) -> bool {
        coord.x < self.size_x && coord.y < self.size_y
    }

    /// Row-major index of a cell.
    #[must_use]
    pub const fn index(&self, coord: CellCoord) -> usize {
        coord.y * self.size_x + coord.x
    }

    /// Inverse of [`Dimensions::index`].
    #[must_use]
    pub const fn coord(&self, index: usize) -> CellCoord {
        CellCoord::new(index % self.size_x, index / self.size_x)
    }

    /// World-space center of a cell.
    #[must_use]
    pub fn cell_center(&self, coord: CellCoord) -> Vector {
        let half = self.chunk_size / 2.0;
        Vector::new(
            (coord.x as f64).mul_add(self.chunk_size, half),
            (coord.y as f64).mul_add(self.chunk_size, half),
        )
    }

    /// In-bounds 4-connected neighbors of a cell.
    ///
    /// Cells past the grid edge are omitted.
    #[must_use]
    pub fn neighbors(&self, coord: CellCoord) -> Neighbors {
        DIRECTIONS
            .iter()
            .filter_map(|&(dx, dy)| {
                let x = coord.x.checked_add_signed(dx)?;
                let y = coord.y.checked_add_signed(dy)?;
                let next = CellCoord::new(x, y);
                self.contains(next).then_some(next)
            })
            .collect()
    }

    fn fresh_cells<T>(&self) -> Vec<Cell<T>> {
        (0..self.len())
            .map(|index| Cell::new(self.coord(index), self.chunk_size))
            .collect()
    }
}

fn axis_index(value: f64, chunk_size: f64, size: usize) -> usize {
    // `as` saturates and maps NaN to 0.
    let index = (value / chunk_size).floor() as i64;
    index.clamp(0, size as i64 - 1) as usize
}

/// Cells and item count, guarded together by the grid lock.
pub(crate) struct GridState<T> {
    pub(crate) cells: Vec<Cell<T>>,
    pub(crate) item_count: usize,
}

/// A 2D spatial grid of fixed-size square chunks.
///
/// Every occupant lives in exactly one cell: the one containing the center of
/// its bounds. Cell weights aggregate the overlap of each occupant with its
/// cell, scaled by the occupant's multiplier, and drive
/// [`SpatialGrid::weighted_search`].
///
/// The grid is meant to be shared between threads. A single reader/writer
/// lock guards all cells: mutations take it exclusively, queries share it.
pub struct SpatialGrid<T> {
    dims: Dimensions,
    pub(crate) state: RwLock<GridState<T>>,
}

impl<T> core::fmt::Debug for SpatialGrid<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpatialGrid")
            .field("dims", &self.dims)
            .finish_non_exhaustive()
    }
}

impl<T> SpatialGrid<T> {
    /// Create an empty grid of `size_x` by `size_y` cells.
    pub fn new(size_x: usize, size_y: usize, chunk_size: f64) -> LatticeResult<Self> {
        Self::from_config(&GridConfig::new(size_x, size_y, chunk_size))
    }

    /// Create an empty grid from a validated config.
    pub fn from_config(config: &GridConfig) -> LatticeResult<Self> {
        let dims = Dimensions::from_config(config)?;

        Ok(Self {
            dims,
            state: RwLock::new(GridState {
                cells: dims.fresh_cells(),
                item_count: 0,
            }),
        })
    }

    /// Fixed shape of this grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Number of cells along x.
    #[must_use]
    pub const fn size_x(&self) -> usize {
        self.dims.size_x
    }

    /// Number of cells along y.
    #[must_use]
    pub const fn size_y(&self) -> usize {
        self.dims.size_y
    }

    /// Edge length of one cell in world units.
    #[must_use]
    pub const fn chunk_size(&self) -> f64 {
        self.dims.chunk_size
    }

    /// Number of occupants currently stored.
    #[must_use]
    pub fn size(&self) -> usize {
        self.state.read().item_count
    }

    /// Cell containing a world position, clamped into the grid.
    #[must_use]
    pub fn location(&self, x: f64, y: f64) -> CellCoord {
        self.dims.location(x, y)
    }

    /// World-space center of a cell.
    #[must_use]
    pub fn cell_center(&self, coord: CellCoord) -> Vector {
        self.dims.cell_center(coord)
    }

    /// In-bounds 4-connected neighbors of a cell.
    #[must_use]
    pub fn neighbors(&self, coord: CellCoord) -> Neighbors {
        self.dims.neighbors(coord)
    }

    /// Insert a value into the cell containing the center of `bounds`.
    ///
    /// `multiplier` scales the overlap between `bounds` and the cell into the
    /// cell's weight. Pass `f64::INFINITY` to make the cell impassable.
    pub fn insert(&self, value: T, bounds: Rectangle, multiplier: f64) {
        let coord = self.dims.location(bounds.position.x, bounds.position.y);
        let index = self.dims.index(coord);

        let mut state = self.state.write();
        let weight = state.cells[index].insert(value, bounds, multiplier);
        state.item_count += 1;

        trace!(x = coord.x, y = coord.y, weight, "inserted occupant");
    }

    /// Insert a bundled [`Item`].
    pub fn insert_item(&self, item: Item<T>) {
        self.insert(item.value, item.bounds, item.multiplier);
    }

    /// Remove every occupant and rebuild each cell from scratch.
    pub fn drop_all(&self) {
        let cells = self.dims.fresh_cells();

        let mut state = self.state.write();
        state.cells = cells;
        state.item_count = 0;

        trace!("dropped all occupants");
    }

    /// Aggregate weight of a cell, with indices clamped into the grid.
    #[must_use]
    pub fn weight_at(&self, x: usize, y: usize) -> f64 {
        let index = self.dims.index(self.checked_cell(x, y));
        self.state.read().cells[index].weight()
    }

    /// Number of occupants in a cell, with indices clamped into the grid.
    #[must_use]
    pub fn len_at(&self, x: usize, y: usize) -> usize {
        let index = self.dims.index(self.checked_cell(x, y));
        self.state.read().cells[index].len()
    }

    fn checked_cell(&self, x: usize, y: usize) -> CellCoord {
        let coord = CellCoord::new(x, y);
        if !self.dims.contains(coord) {
            warn!(
                x,
                y,
                size_x = self.dims.size_x,
                size_y = self.dims.size_y,
                "cell index out of bounds, clamping"
            );
        }
        self.dims.clamp(coord)
    }
}

impl<T: PartialEq> SpatialGrid<T> {
    /// Remove `value` from the cell containing the center of `bounds`.
    ///
    /// Only the owning cell is scanned, so `bounds` needs to resolve to the
    /// same cell it was inserted with. Returns `false` and leaves the grid
    /// untouched when no matching occupant exists.
    pub fn delete(&self, value: &T, bounds: &Rectangle) -> bool {
        let coord = self.dims.location(bounds.position.x, bounds.position.y);
        let index = self.dims.index(coord);

        let mut state = self.state.write();
        let Some((_, record)) = state.cells[index].remove(value) else {
            trace!(x = coord.x, y = coord.y, "delete found no matching occupant");
            return false;
        };
        state.item_count -= 1;

        trace!(x = coord.x, y = coord.y, weight = record.weight, "deleted occupant");
        true
    }

    /// Move a value from `old_bounds` to `new_bounds`.
    ///
    /// This is a [`delete`](Self::delete) followed by an
    /// [`insert`](Self::insert), each under its own write lock. A concurrent
    /// reader can observe the value missing from the grid between the two.
    pub fn update(&self, value: T, old_bounds: &Rectangle, new_bounds: Rectangle, multiplier: f64) {
        self.delete(&value, old_bounds);
        self.insert(value, new_bounds, multiplier);
    }
}

impl<T: Clone> SpatialGrid<T> {
    /// Values stored in a cell, with indices clamped into the grid.
    #[must_use]
    pub fn items_at(&self, x: usize, y: usize) -> Vec<T> {
        let index = self.dims.index(self.checked_cell(x, y));
        self.state.read().cells[index].values().to_vec()
    }

    /// Snapshot of a cell, with indices clamped into the grid.
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Cell<T> {
        let index = self.dims.index(self.checked_cell(x, y));
        self.state.read().cells[index].clone()
    }
}

impl<T: Clone + Eq + Hash> SpatialGrid<T> {
    /// Distinct values held by every cell the rectangle touches.
    ///
    /// The corners of `bounds` are mapped to cells and every cell in between
    /// is scanned. Order of the result is unspecified.
    #[must_use]
    pub fn find_near(&self, bounds: &Rectangle) -> Vec<T> {
        let (min, max) = (bounds.min_point(), bounds.max_point());
        let from = self.dims.location(min.x, min.y);
        let to = self.dims.location(max.x, max.y);

        let state = self.state.read();
        let mut found = HashSet::new();
        for y in from.y..=to.y {
            for x in from.x..=to.x {
                let cell = &state.cells[self.dims.index(CellCoord::new(x, y))];
                found.extend(cell.values().iter().cloned());
            }
        }

        found.into_iter().collect()
    }
}
