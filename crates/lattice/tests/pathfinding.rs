//! Weighted search scenarios.

use std::collections::VecDeque;

use lattice::layout::{self, WALL};
use lattice::{CellCoord, LatticeError, SpatialGrid};
use lattice_geometry::{Rectangle, Vector};

const SIZE: f64 = 32.0;

fn build(size_x: usize, size_y: usize, rows: &str) -> SpatialGrid<u32> {
    let grid = SpatialGrid::new(size_x, size_y, SIZE).unwrap();
    layout::populate(&grid, rows);
    grid
}

fn center(x: usize, y: usize) -> Vector {
    Vector::new(
        (x as f64).mul_add(SIZE, SIZE / 2.0),
        (y as f64).mul_add(SIZE, SIZE / 2.0),
    )
}

fn centers(cells: &[(usize, usize)]) -> Vec<Vector> {
    cells.iter().map(|&(x, y)| center(x, y)).collect()
}

/// Fewest steps between two cells, walking around impassable cells.
fn bfs_steps(grid: &SpatialGrid<u32>, from: CellCoord, to: CellCoord) -> Option<usize> {
    let dims = grid.dimensions();
    let mut dist = vec![None; dims.len()];
    dist[dims.index(from)] = Some(0);

    let mut queue = VecDeque::from([from]);
    while let Some(cell) = queue.pop_front() {
        let d = dist[dims.index(cell)].unwrap();
        if cell == to {
            return Some(d);
        }
        for next in grid.neighbors(cell) {
            let index = dims.index(next);
            if dist[index].is_none() && grid.weight_at(next.x, next.y).is_finite() {
                dist[index] = Some(d + 1);
                queue.push_back(next);
            }
        }
    }

    None
}

fn assert_connected(grid: &SpatialGrid<u32>, cells: &[CellCoord]) {
    for pair in cells.windows(2) {
        assert_eq!(pair[0].manhattan(pair[1]), 1, "{:?} -> {:?}", pair[0], pair[1]);
    }
    for cell in cells {
        assert!(grid.weight_at(cell.x, cell.y).is_finite(), "{cell:?} is a wall");
    }
}

#[test]
fn test_open_grid_goes_straight() {
    let grid = SpatialGrid::<u32>::new(4, 4, 10.0).unwrap();

    let path = grid
        .weighted_search(Vector::new(5.0, 5.0), Vector::new(35.0, 5.0), 64)
        .unwrap();

    assert_eq!(
        path,
        vec![
            Vector::new(5.0, 5.0),
            Vector::new(15.0, 5.0),
            Vector::new(25.0, 5.0),
            Vector::new(35.0, 5.0),
        ]
    );
}

#[test]
fn test_waypoints_are_cell_centers() {
    let grid = SpatialGrid::<u32>::new(4, 4, 10.0).unwrap();

    let path = grid
        .weighted_search(Vector::new(1.0, 9.0), Vector::new(39.0, 2.0), 64)
        .unwrap();

    assert_eq!(path.first(), Some(&Vector::new(5.0, 5.0)));
    assert_eq!(path.last(), Some(&Vector::new(35.0, 5.0)));
    assert_eq!(path.len(), 4);
}

#[test]
fn test_heavy_row_forces_detour() {
    let grid = SpatialGrid::new(4, 3, 10.0).unwrap();
    let block = |x: f64, y: f64| Rectangle::new(Vector::new(x, y), 10.0, 10.0);

    // Dense crates in the middle of the direct row
    grid.insert(1, block(15.0, 15.0), 100.0);
    grid.insert(2, block(25.0, 15.0), 100.0);
    // Light clutter along the bottom row
    for x in [5.0, 15.0, 25.0, 35.0] {
        grid.insert(3, block(x, 25.0), 1.0);
    }

    let path = grid
        .weighted_search_with_cost(Vector::new(5.0, 15.0), Vector::new(35.0, 15.0), 64)
        .unwrap();

    assert_eq!(
        path.waypoints,
        vec![
            Vector::new(5.0, 15.0),
            Vector::new(5.0, 5.0),
            Vector::new(15.0, 5.0),
            Vector::new(25.0, 5.0),
            Vector::new(35.0, 5.0),
            Vector::new(35.0, 15.0),
        ]
    );
    assert_eq!(path.cost, 0.0);
}

#[test]
fn test_simple_path() {
    let grid = build(
        9,
        9,
        "
        100000000
        011111110
        010000010
        010101010
        010101010
        010111010
        010000010
        011111010
        000000000
        ",
    );

    let path = grid.weighted_search(center(4, 4), center(4, 2), 32).unwrap();

    assert_eq!(path, centers(&[(4, 4), (4, 3), (4, 2)]));
}

#[test]
fn test_max_depth() {
    let grid = build(
        9,
        9,
        "
        000000000
        0xxxxxxx0
        0x00000x0
        0x0x0x0x0
        0x0x0x0x0
        0x0xxx0x0
        0x00000x0
        0xxxxx0x0
        000000000
        ",
    );

    let result = grid.weighted_search(center(0, 0), center(4, 4), 10);
    assert_eq!(result, Err(LatticeError::MaxDepthExceeded { max_depth: 10 }));

    // Same maze with room to finish
    let path = grid
        .weighted_search_with_cost(center(0, 0), center(4, 4), 1024)
        .unwrap();
    assert_eq!(path.cells.first(), Some(&CellCoord::new(0, 0)));
    assert_eq!(path.cells.last(), Some(&CellCoord::new(4, 4)));
    assert_connected(&grid, &path.cells);
}

#[test]
fn test_hard_path() {
    // Every open cell costs the same, so the cheapest path is the shortest.
    let grid = build(
        9,
        9,
        "
        111111111
        1xxxxxxx1
        1x11111x1
        1x1x1x1x1
        1x1x1x1x1
        1x1xxx1x1
        1x11111x1
        1x1xxx1x1
        111111111
        ",
    );

    let path = grid
        .weighted_search_with_cost(center(0, 0), center(4, 4), 512)
        .unwrap();

    assert_eq!(
        path.waypoints,
        centers(&[
            (0, 0),
            (0, 1),
            (0, 2),
            (0, 3),
            (0, 4),
            (0, 5),
            (0, 6),
            (0, 7),
            (0, 8),
            (1, 8),
            (2, 8),
            (2, 7),
            (2, 6),
            (2, 5),
            (2, 4),
            (2, 3),
            (2, 2),
            (3, 2),
            (4, 2),
            (4, 3),
            (4, 4),
        ])
    );
    assert_eq!(path.cost, 20.0 * SIZE * SIZE);
}

#[test]
fn test_long_path() {
    let grid = build(
        18,
        18,
        "
        1xxxxxx11xxxx1x1x1
        11111111111111x1x1
        1xxxxxx11xxxx1xx11
        11x11111111111x111
        11x1xx11xxxxxxx111
        11x111111111111111
        1xxx11111x1x1x1x11
        11x1111111x1111111
        111xx11111xxx1x111
        11x111x11111x1x1x1
        1x11xxxx11xxxxxxx1
        1x11x11x11x11111x1
        1111x11x11x1x1x1x1
        1x11111111x1x1x1x1
        11x1x11x11x1xxx1x1
        1xx1111x11x11111x1
        1x11x11x11x1xxx1x1
        111111111111111111
        ",
    );
    let (start, end) = (CellCoord::new(9, 9), CellCoord::new(13, 13));

    let path = grid
        .weighted_search_with_cost(center(9, 9), center(13, 13), 4096)
        .unwrap();

    let steps = bfs_steps(&grid, start, end).unwrap();
    assert_eq!(path.cells.first(), Some(&start));
    assert_eq!(path.cells.last(), Some(&end));
    assert_eq!(path.cells.len(), steps + 1);
    assert_eq!(path.cost, steps as f64 * SIZE * SIZE);
    assert_connected(&grid, &path.cells);

    // Walls force a detour longer than the Manhattan distance.
    assert!(steps > start.manhattan(end));
}

#[test]
fn test_walled_target_is_unreachable() {
    let grid = SpatialGrid::new(5, 5, 10.0).unwrap();
    for (x, y) in [(25.0, 15.0), (25.0, 35.0), (15.0, 25.0), (35.0, 25.0)] {
        grid.insert(WALL, Rectangle::new(Vector::new(x, y), 10.0, 10.0), f64::INFINITY);
    }

    let result = grid.weighted_search(Vector::new(5.0, 5.0), Vector::new(25.0, 25.0), 10_000);
    assert_eq!(result, Err(LatticeError::PathNotFound));

    // Opening one side makes it reachable again.
    grid.delete(&WALL, &Rectangle::new(Vector::new(25.0, 15.0), 10.0, 10.0));
    let path = grid
        .weighted_search(Vector::new(5.0, 5.0), Vector::new(25.0, 25.0), 10_000)
        .unwrap();
    assert_eq!(path.last(), Some(&Vector::new(25.0, 25.0)));
    assert_eq!(path[path.len() - 2], Vector::new(25.0, 15.0));
}

#[test]
fn test_walls_are_never_crossed() {
    let grid = build(
        5,
        5,
        "
        00000
        xxxx0
        00000
        0xxxx
        00000
        ",
    );

    let path = grid
        .weighted_search_with_cost(center(0, 0), center(0, 4), 1024)
        .unwrap();

    assert_connected(&grid, &path.cells);
    assert_eq!(path.cells.first(), Some(&CellCoord::new(0, 0)));
    assert_eq!(path.cells.last(), Some(&CellCoord::new(0, 4)));
    // The only corridor zig-zags through both gaps.
    assert!(path.cells.contains(&CellCoord::new(4, 1)));
    assert!(path.cells.contains(&CellCoord::new(0, 3)));
}
