//! Build grids from character layouts.
//!
//! A layout is read row-major: the first `size_x` cells form row `y = 0`.
//! Whitespace is ignored, so layouts can be written one row per line.
//!
//! | char       | occupant                                   |
//! |------------|--------------------------------------------|
//! | `0` or `.` | none                                       |
//! | `1`        | [`UNIT`], full-cell bounds, multiplier 1   |
//! | `x`        | [`WALL`], full-cell bounds, infinite       |

use lattice_geometry::Rectangle;

use crate::{CellCoord, SpatialGrid};

/// Value stored for unit-weight cells.
pub const UNIT: u32 = 1;

/// Value stored for impassable cells.
pub const WALL: u32 = 9;

/// Insert one occupant per marked cell of `layout`.
///
/// Returns the number of occupants inserted. Characters past the end of the
/// grid and unknown characters are skipped.
pub fn populate(grid: &SpatialGrid<u32>, layout: &str) -> usize {
    let dims = grid.dimensions();
    let mut inserted = 0;

    for (i, block) in layout
        .chars()
        .filter(|c| !c.is_whitespace())
        .enumerate()
        .take(dims.len())
    {
        let (value, multiplier) = match block {
            '1' => (UNIT, 1.0),
            'x' => (WALL, f64::INFINITY),
            _ => continue,
        };

        let center = dims.cell_center(dims.coord(i));
        let bounds = Rectangle::new(center, dims.chunk_size(), dims.chunk_size());
        grid.insert(value, bounds, multiplier);
        inserted += 1;
    }

    inserted
}

/// Render the grid back into a layout, one row per line.
///
/// Cells are drawn as `x` when impassable, `1` when occupied and `0` when
/// empty.
#[must_use]
pub fn render<T>(grid: &SpatialGrid<T>) -> String {
    let dims = grid.dimensions();
    let state = grid.state.read();

    let mut out = String::with_capacity(dims.len() + dims.size_y());
    for y in 0..dims.size_y() {
        for x in 0..dims.size_x() {
            let cell = &state.cells[dims.index(CellCoord::new(x, y))];
            out.push(if cell.is_impassable() {
                'x'
            } else if cell.is_empty() {
                '0'
            } else {
                '1'
            });
        }
        out.push('\n');
    }

    out
}
