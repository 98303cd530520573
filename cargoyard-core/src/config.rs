/// Scene configuration and the default cargo layout
use nalgebra::Point3;

use crate::block::{Block, BlockId, Extent, VisualTag};
use crate::floor::FloorGrid;

/// Default number of rows a block may be lifted above the first
pub const DEFAULT_HEIGHT_LIMIT: u32 = 4;

/// Block palette, cycled by block index
pub const PALETTE: [VisualTag; 7] = [
    VisualTag::rgb(0x7c, 0x3a, 0xed),
    VisualTag::rgb(0x25, 0x63, 0xeb),
    VisualTag::rgb(0x05, 0x96, 0x69),
    VisualTag::rgb(0xfa, 0xcc, 0x15),
    VisualTag::rgb(0xfb, 0x92, 0x3c),
    VisualTag::rgb(0xef, 0x44, 0x44),
    VisualTag::rgb(0xa8, 0x55, 0xf7),
];

const DEFAULT_FLOOR: [[u8; 5]; 3] = [[1, 1, 1, 1, 1], [1, 0, 0, 0, 1], [1, 1, 1, 1, 1]];

/// Everything a session needs at start-up
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub height_limit: u32,
    pub floor: FloorGrid,
    pub blocks: Vec<Block>,
}

impl SceneConfig {
    pub fn with_height_limit(mut self, height_limit: u32) -> Self {
        self.height_limit = height_limit;
        self
    }

    pub fn with_floor(mut self, floor: FloorGrid) -> Self {
        self.floor = floor;
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            height_limit: DEFAULT_HEIGHT_LIMIT,
            floor: FloorGrid::from_cells(&DEFAULT_FLOOR),
            blocks: default_blocks(),
        }
    }
}

/// One block per allowed extent, lined up along x in front of the floor
pub fn default_blocks() -> Vec<Block> {
    Extent::ALLOWED
        .iter()
        .enumerate()
        .filter_map(|(i, &size)| {
            let extent = Extent::new(size).ok()?;
            Some(Block::new(
                BlockId(i as u32),
                extent,
                PALETTE[i % PALETTE.len()],
                Point3::new(i as f32 - 3.0, 0.5, -5.0),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.height_limit, 4);
        assert_eq!(config.floor.solid_cells().count(), 12);
        assert_eq!(config.blocks.len(), 7);

        let last = &config.blocks[6];
        assert_eq!(last.id, BlockId(6));
        assert_eq!(last.extent.value(), 32);
        assert_eq!(last.tag.to_string(), "#a855f7");
        assert_eq!(last.position, Point3::new(3.0, 0.5, -5.0));
    }

    #[test]
    fn test_overrides() {
        let floor = FloorGrid::from_cells(&[[1u8]]);
        let config = SceneConfig::default()
            .with_height_limit(9)
            .with_floor(floor.clone());
        assert_eq!(config.height_limit, 9);
        assert_eq!(config.floor, floor);
    }
}
