/// Per-pointer drag state machine
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::block::BlockId;
use crate::error::{CargoError, Result};

/// Identifies one pointer (mouse, touch contact, pen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId(pub u32);

impl PointerId {
    /// The mouse, or the first touch contact
    pub const PRIMARY: PointerId = PointerId(0);
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drag state of a single block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { pointer: PointerId },
}

/// Tracks which pointer drags which block.
///
/// A pointer drags at most one block and a block is held by at most one
/// pointer.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    active: HashMap<PointerId, BlockId>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start dragging `block` with `pointer`.
    ///
    /// A pointer that was still dragging another block lets go of it first;
    /// the released block is returned. Pressing again on the block the
    /// pointer already holds is a no-op.
    pub fn begin(&mut self, pointer: PointerId, block: BlockId) -> Result<Option<BlockId>> {
        if let Some(holder) = self.holder_of(block) {
            if holder != pointer {
                return Err(CargoError::BlockBusy {
                    block,
                    pointer: holder,
                });
            }
        }

        let released = self.active.insert(pointer, block).filter(|&prev| prev != block);
        if let Some(prev) = released {
            debug!(%pointer, block = %prev, "pointer pressed again, released previous drag");
        }
        debug!(%pointer, %block, "drag started");
        Ok(released)
    }

    /// Stop whatever drag `pointer` holds
    pub fn end(&mut self, pointer: PointerId) -> Option<BlockId> {
        let block = self.active.remove(&pointer);
        if let Some(block) = block {
            debug!(%pointer, %block, "drag ended");
        }
        block
    }

    /// Stop the drag on `block`, whichever pointer holds it
    pub fn end_block(&mut self, block: BlockId) -> Option<PointerId> {
        let pointer = self.holder_of(block)?;
        self.end(pointer);
        Some(pointer)
    }

    pub fn dragged_by(&self, pointer: PointerId) -> Option<BlockId> {
        self.active.get(&pointer).copied()
    }

    pub fn holder_of(&self, block: BlockId) -> Option<PointerId> {
        self.active
            .iter()
            .find(|(_, held)| **held == block)
            .map(|(&pointer, _)| pointer)
    }

    pub fn state(&self, block: BlockId) -> DragState {
        match self.holder_of(block) {
            Some(pointer) => DragState::Dragging { pointer },
            None => DragState::Idle,
        }
    }

    /// Number of drags in progress
    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
