/// Static floor grid
use std::str::FromStr;

use crate::error::{CargoError, Result};
use crate::parse;

/// Read-only matrix of solid floor tiles, indexed `rows[z][x]`.
///
/// Blocks never consult the floor; it is purely for display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FloorGrid {
    rows: Vec<Vec<bool>>,
}

impl FloorGrid {
    pub fn new(rows: Vec<Vec<bool>>) -> Self {
        Self { rows }
    }

    /// Build from integer rows, any non-zero value is solid
    pub fn from_cells<R: AsRef<[u8]>>(rows: &[R]) -> Self {
        Self::new(
            rows.iter()
                .map(|row| row.as_ref().iter().map(|&c| c != 0).collect())
                .collect(),
        )
    }

    /// Number of rows (z extent)
    pub fn depth(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (x extent)
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_solid(&self, x: usize, z: usize) -> bool {
        self.rows
            .get(z)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// Iterate `(x, z)` of every solid tile in row-major order
    pub fn solid_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(z, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, solid)| **solid)
                .map(move |(x, _)| (x, z))
        })
    }
}

impl FromStr for FloorGrid {
    type Err = CargoError;

    fn from_str(s: &str) -> Result<Self> {
        parse::parse_floor_layout(s)
    }
}
