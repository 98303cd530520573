/// Authoritative in-memory block collection
use std::collections::HashMap;

use nalgebra::Point3;
use tracing::{debug, warn};

use crate::block::{Block, BlockId};
use crate::error::{CargoError, Result};

/// Blocks in insertion order, addressable by id.
///
/// The set of blocks is fixed at initialization; only positions change.
#[derive(Debug, Clone, Default)]
pub struct GridStore {
    blocks: Vec<Block>,
    index: HashMap<BlockId, usize>,
}

impl GridStore {
    /// Take ownership of the initial blocks. Positions are stored verbatim.
    pub fn initialize<I>(blocks: I) -> Result<Self>
    where
        I: IntoIterator<Item = Block>,
    {
        let blocks: Vec<Block> = blocks.into_iter().collect();
        let mut index = HashMap::with_capacity(blocks.len());
        for (slot, block) in blocks.iter().enumerate() {
            if index.insert(block.id, slot).is_some() {
                return Err(CargoError::DuplicateBlock(block.id));
            }
        }

        debug!(count = blocks.len(), "grid store initialized");
        Ok(Self { blocks, index })
    }

    /// Replace the position of one block, leaving every other block untouched
    pub fn update_position(&mut self, id: BlockId, position: Point3<f32>) -> Result<()> {
        let Some(&slot) = self.index.get(&id) else {
            warn!(block = %id, ?position, "position update for unknown block");
            return Err(CargoError::UnknownBlock(id));
        };

        let block = &mut self.blocks[slot];
        debug!(block = %id, from = ?block.position, to = ?position, "block moved");
        block.position = position;
        Ok(())
    }

    pub fn get(&self, id: BlockId) -> Option<&Block> {
        self.index.get(&id).map(|&slot| &self.blocks[slot])
    }

    pub fn contains(&self, id: BlockId) -> bool {
        self.index.contains_key(&id)
    }

    /// Read model, in insertion order
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
