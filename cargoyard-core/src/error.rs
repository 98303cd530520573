/// Error type shared by the store, translator, drag tracker and parsers
use std::fmt;

use thiserror::Error;

use crate::block::BlockId;
use crate::drag::PointerId;

/// Coordinate axis, used to report which component of a point was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CargoError {
    #[error("{axis} coordinate is not finite ({value})")]
    NonFiniteCoordinate { axis: Axis, value: f32 },

    #[error("no block with id {0}")]
    UnknownBlock(BlockId),

    #[error("block id {0} is used more than once")]
    DuplicateBlock(BlockId),

    #[error("invalid extent {0}: expected one of 1, 2, 4, 8, 16, 24, 32")]
    InvalidExtent(u32),

    #[error("block {block} is already being dragged by pointer {pointer}")]
    BlockBusy { block: BlockId, pointer: PointerId },

    #[error("invalid color tag {0:?}: expected #rrggbb or #rgb")]
    InvalidColor(String),

    #[error("invalid floor layout at line {line}: {reason}")]
    InvalidLayout { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CargoError>;
