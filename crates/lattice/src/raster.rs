//! Straight-line cell rasterization.
//!
//! ```text
//! From (0,0) to (5,2):
//!
//!   2 . . . . ● ●
//!   1 . . ● ● . .
//!   0 ● ● . . . .
//!     0 1 2 3 4 5
//! ```

use lattice_geometry::Vector;

use crate::{CellCoord, SpatialGrid};

/// Bresenham walk between two cells, both endpoints included.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: isize,
    y: isize,
    dx: isize,
    dy: isize,
    x_inc: isize,
    y_inc: isize,
    error: isize,
    steep: bool,
    end_x: isize,
    done: bool,
}

impl BresenhamLine {
    #[must_use]
    pub fn new(start: CellCoord, end: CellCoord) -> Self {
        let (sx, sy) = (start.x as isize, start.y as isize);
        let (ex, ey) = (end.x as isize, end.y as isize);

        let dx = (ex - sx).abs();
        let dy = (ey - sy).abs();
        let steep = dy > dx;

        // Walk along the major axis.
        let (x, y, end_x, end_y, dx, dy) = if steep {
            (sy, sx, ey, ex, dy, dx)
        } else {
            (sx, sy, ex, ey, dx, dy)
        };

        Self {
            x,
            y,
            dx,
            dy,
            x_inc: if end_x > x { 1 } else { -1 },
            y_inc: if end_y > y { 1 } else { -1 },
            error: dx / 2,
            steep,
            end_x,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let (x, y) = if self.steep {
            (self.y, self.x)
        } else {
            (self.x, self.y)
        };
        let cell = CellCoord::new(x as usize, y as usize);

        if self.x == self.end_x {
            self.done = true;
            return Some(cell);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        }
        self.x += self.x_inc;

        Some(cell)
    }
}

impl<T> SpatialGrid<T> {
    /// Cells crossed by the segment from `start` to `end`, in order.
    ///
    /// Both endpoints are mapped to cells the same way as every other
    /// position, so the line never leaves the grid.
    #[must_use]
    pub fn cells_on_line(&self, start: Vector, end: Vector) -> Vec<CellCoord> {
        BresenhamLine::new(
            self.location(start.x, start.y),
            self.location(end.x, end.y),
        )
        .collect()
    }

    /// Whether no impassable cell lies on the segment from `start` to `end`.
    #[must_use]
    pub fn line_of_sight(&self, start: Vector, end: Vector) -> bool {
        let dims = self.dimensions();
        let cells = self.cells_on_line(start, end);

        let state = self.state.read();
        cells
            .into_iter()
            .all(|cell| !state.cells[dims.index(cell)].is_impassable())
    }
}
