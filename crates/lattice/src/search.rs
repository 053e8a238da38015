//! Bounded breadth-first flood search.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::{SearchError, SpatialGrid};

impl<T> SpatialGrid<T> {
    /// Visit cells outward from `(x, y)`, one breadth-first level at a time.
    ///
    /// The start cell is level 0 and each level adds the unvisited 4-connected
    /// neighbors of the previous one. `visitor` sees the occupants of every
    /// cell exactly once. Traversal stops at the first visitor error, and
    /// fails with [`SearchError::MaxDepthExceeded`] if cells are still queued
    /// once more than `max_depth` levels would be needed.
    ///
    /// The grid's read lock is held for the whole search, so the visitor must
    /// not mutate this grid.
    pub fn search<E, F>(
        &self,
        x: f64,
        y: f64,
        max_depth: usize,
        mut visitor: F,
    ) -> Result<(), SearchError<E>>
    where
        F: FnMut(&[T]) -> Result<(), E>,
    {
        let dims = self.dimensions();
        let state = self.state.read();

        let start = dims.location(x, y);
        let mut visited = vec![false; dims.len()];
        let mut queue = VecDeque::from([start]);

        let mut depth = 0;
        while !queue.is_empty() {
            if depth > max_depth {
                debug!(max_depth, queued = queue.len(), "flood search hit max depth");
                return Err(SearchError::MaxDepthExceeded { max_depth });
            }

            for _ in 0..queue.len() {
                let Some(coord) = queue.pop_front() else {
                    break;
                };

                let index = dims.index(coord);
                if visited[index] {
                    continue;
                }
                visited[index] = true;

                visitor(state.cells[index].values()).map_err(SearchError::Visitor)?;

                queue.extend(
                    dims.neighbors(coord)
                        .into_iter()
                        .filter(|next| !visited[dims.index(*next)]),
                );
            }

            depth += 1;
        }

        trace!(levels = depth, "flood search exhausted grid");
        Ok(())
    }
}
