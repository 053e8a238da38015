//! Load a grid scenario and run both searches over it.
//!
//! The scenario file comes from the first argument or `LATTICE_SCENARIO`.
//! `LATTICE_MAX_DEPTH` overrides the weighted search iteration cap.

mod scenario;

use std::convert::Infallible;
use std::path::PathBuf;

use eyre::OptionExt;
use lattice::{LatticeError, layout};
use tracing::{info, warn};

use crate::scenario::Scenario;

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lattice=info".parse()?)
                .add_directive("lattice_demo=info".parse()?),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("LATTICE_SCENARIO").ok())
        .map(PathBuf::from)
        .ok_or_eyre("usage: lattice-demo <scenario.json> (or set LATTICE_SCENARIO)")?;

    let mut scenario = Scenario::load(&path)?;

    if let Ok(raw) = std::env::var("LATTICE_MAX_DEPTH") {
        scenario.override_max_depth(&raw)?;
    }

    info!("Loaded scenario {}", path.display());

    let grid = scenario.build()?;
    info!(
        size_x = grid.size_x(),
        size_y = grid.size_y(),
        chunk_size = grid.chunk_size(),
        occupants = grid.size(),
        "Grid ready\n{}",
        layout::render(&grid)
    );

    let mut cells = 0_usize;
    let mut found = 0_usize;
    let flood = grid.search(
        scenario.start.x,
        scenario.start.y,
        scenario.search.flood_max_depth,
        |items: &[u32]| {
            cells += 1;
            found += items.len();
            Ok::<_, Infallible>(())
        },
    );
    match flood {
        Ok(()) => info!(cells, found, "Flood search covered the grid"),
        Err(e) => info!(cells, found, "Flood search stopped: {}", e),
    }

    match grid.weighted_search_with_cost(
        scenario.start,
        scenario.end,
        scenario.search.path_max_depth,
    ) {
        Ok(path) => {
            info!(
                steps = path.cells.len().saturating_sub(1),
                cost = path.cost,
                iterations = path.iterations,
                "Path found"
            );
            for cell in &path.cells {
                info!("  ({}, {})", cell.x, cell.y);
            }
        }
        Err(e @ (LatticeError::PathNotFound | LatticeError::MaxDepthExceeded { .. })) => {
            warn!("No path from {:?} to {:?}: {}", scenario.start, scenario.end, e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
