//! Weighted A* path search over grid cells.
//!
//! Moving into a cell costs that cell's aggregate weight, so paths prefer
//! sparsely occupied cells and never enter impassable ones. The heuristic is
//! the Manhattan distance between cell indices.

use core::cmp::Ordering;
use std::collections::BinaryHeap;

use lattice_geometry::Vector;
use tracing::{debug, trace};

use crate::{CellCoord, LatticeError, LatticeResult, SpatialGrid};

/// A path found by [`SpatialGrid::weighted_search_with_cost`].
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    /// World-space center of each cell, start first.
    pub waypoints: Vec<Vector>,
    /// Cells along the path, start first.
    pub cells: Vec<CellCoord>,
    /// Sum of the weights of every cell entered after the start.
    pub cost: f64,
    /// Frontier pops spent finding the path.
    pub iterations: usize,
}

/// Frontier entry, ordered so the max-heap pops the lowest priority first
/// and, among equal priorities, the earliest pushed.
#[derive(Clone, Copy, Debug)]
struct Frontier {
    index: usize,
    priority: f64,
    sequence: u64,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Default)]
struct OpenSet {
    heap: BinaryHeap<Frontier>,
    next_sequence: u64,
}

impl OpenSet {
    fn push(&mut self, index: usize, priority: f64) {
        self.heap.push(Frontier {
            index,
            priority,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|entry| entry.index)
    }

    fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

fn heuristic(from: CellCoord, to: CellCoord) -> f64 {
    from.manhattan(to) as f64
}

impl<T> SpatialGrid<T> {
    /// Cheapest path between the cells containing `start` and `end`.
    ///
    /// Returns the centers of the cells along the path, start and end
    /// included. See [`SpatialGrid::weighted_search_with_cost`].
    pub fn weighted_search(
        &self,
        start: Vector,
        end: Vector,
        max_depth: usize,
    ) -> LatticeResult<Vec<Vector>> {
        self.weighted_search_with_cost(start, end, max_depth)
            .map(|path| path.waypoints)
    }

    /// Cheapest path between the cells containing `start` and `end`, with
    /// its cost.
    ///
    /// Entering a cell costs its weight; cells of infinite weight are never
    /// entered. `max_depth` caps the number of frontier pops, not the path
    /// length.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::MaxDepthExceeded`] when the iteration cap is hit
    ///   before the end cell is popped.
    /// - [`LatticeError::PathNotFound`] when the end cell is unreachable.
    pub fn weighted_search_with_cost(
        &self,
        start: Vector,
        end: Vector,
        max_depth: usize,
    ) -> LatticeResult<Path> {
        let dims = self.dimensions();
        let state = self.state.read();

        let start_cell = dims.location(start.x, start.y);
        let end_cell = dims.location(end.x, end.y);
        let (start_index, end_index) = (dims.index(start_cell), dims.index(end_cell));

        let mut costs = vec![f64::INFINITY; dims.len()];
        let mut came_from: Vec<Option<usize>> = vec![None; dims.len()];
        costs[start_index] = 0.0;

        let mut open = OpenSet::default();
        open.push(start_index, 0.0);

        let mut iterations = 0;
        while !open.is_empty() {
            if iterations > max_depth {
                debug!(
                    max_depth,
                    start = ?start_cell,
                    end = ?end_cell,
                    "weighted search hit max depth"
                );
                return Err(LatticeError::MaxDepthExceeded { max_depth });
            }

            let Some(current) = open.pop() else {
                break;
            };

            if current == end_index {
                let cells = reconstruct(&came_from, start_index, end_index)
                    .into_iter()
                    .map(|index| dims.coord(index))
                    .collect::<Vec<_>>();
                let waypoints = cells.iter().map(|&cell| dims.cell_center(cell)).collect();

                debug!(
                    length = cells.len(),
                    cost = costs[end_index],
                    iterations,
                    "weighted search found path"
                );
                return Ok(Path {
                    waypoints,
                    cells,
                    cost: costs[end_index],
                    iterations,
                });
            }

            for next in dims.neighbors(dims.coord(current)) {
                let next_index = dims.index(next);
                let cost = costs[current] + state.cells[next_index].weight();

                if cost.is_infinite() || cost >= costs[next_index] {
                    continue;
                }

                costs[next_index] = cost;
                came_from[next_index] = Some(current);
                open.push(next_index, cost + heuristic(next, end_cell));
            }

            iterations += 1;
        }

        debug!(start = ?start_cell, end = ?end_cell, iterations, "weighted search found no path");
        Err(LatticeError::PathNotFound)
    }
}

/// Walk predecessor links from `end` back to `start`, returned start first.
fn reconstruct(came_from: &[Option<usize>], start: usize, end: usize) -> Vec<usize> {
    let mut path = vec![end];
    let mut current = end;

    while current != start {
        let Some(previous) = came_from[current] else {
            break;
        };
        trace!(from = previous, to = current, "path step");
        path.push(previous);
        current = previous;
    }

    path.reverse();
    path
}
