//! JSON scenario files.

use std::path::Path;

use eyre::WrapErr;
use lattice::{GridConfig, SearchConfig, SpatialGrid, layout};
use lattice_geometry::Vector;
use serde::Deserialize;

/// Layout characters, either as one string or one string per row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Layout {
    Text(String),
    Rows(Vec<String>),
}

impl Layout {
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Rows(rows) => rows.concat(),
        }
    }
}

/// A grid layout plus the two points to search between.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub search: SearchConfig,
    pub layout: Layout,
    pub start: Vector,
    pub end: Vector,
}

impl Scenario {
    pub fn load(path: &Path) -> eyre::Result<Self> {
        let text = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> eyre::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Replace the weighted search iteration cap with a user-supplied value.
    pub fn override_max_depth(&mut self, raw: &str) -> eyre::Result<()> {
        let max_depth = raw.trim().parse().wrap_err_with(|| {
            format!("LATTICE_MAX_DEPTH must be a non-negative integer, got {raw:?}")
        })?;
        self.search.path_max_depth = max_depth;
        Ok(())
    }

    /// Build the grid and fill it from the layout.
    pub fn build(&self) -> eyre::Result<SpatialGrid<u32>> {
        let grid = SpatialGrid::from_config(&self.grid)?;
        layout::populate(&grid, &self.layout.text());
        Ok(grid)
    }
}
