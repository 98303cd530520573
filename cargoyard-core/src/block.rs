/// Placeable cargo blocks
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};

use crate::error::{CargoError, Result};
use crate::geometry::Mesh;
use crate::parse;
use crate::picking::Aabb;

/// Stable block identifier, unique within a store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Block length along the z axis, in half units. Restricted to a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent(u32);

impl Extent {
    /// Every extent a block may be created with, smallest first
    pub const ALLOWED: [u32; 7] = [1, 2, 4, 8, 16, 24, 32];

    pub fn new(value: u32) -> Result<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(CargoError::InvalidExtent(value))
        }
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display color of a block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisualTag {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl VisualTag {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale the color towards black, `factor` in `[0, 1]`
    pub fn shaded(self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (c as f32 * factor).round() as u8;
        Self::rgb(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for VisualTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for VisualTag {
    type Err = CargoError;

    fn from_str(s: &str) -> Result<Self> {
        parse::parse_color(s)
    }
}

/// One placeable cargo unit
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub extent: Extent,
    pub tag: VisualTag,
    pub position: Point3<f32>,
}

impl Block {
    pub fn new(id: BlockId, extent: Extent, tag: VisualTag, position: Point3<f32>) -> Self {
        Self {
            id,
            extent,
            tag,
            position,
        }
    }

    /// Box dimensions: one unit wide and tall, `extent / 2` deep
    pub fn size(&self) -> Vector3<f32> {
        Vector3::new(1.0, 1.0, self.extent.value() as f32 / 2.0)
    }

    /// World-space bounds around the current position
    pub fn bounds(&self) -> Aabb {
        Aabb::centered(self.position, self.size() / 2.0)
    }

    /// Model-space mesh, centred on the origin
    pub fn mesh(&self) -> Mesh {
        Mesh::cuboid(self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_rejects_values_outside_set() {
        assert!(Extent::new(16).is_ok());
        assert_eq!(Extent::new(3), Err(CargoError::InvalidExtent(3)));
        assert_eq!(Extent::new(0), Err(CargoError::InvalidExtent(0)));
    }

    #[test]
    fn test_visual_tag_display_round_trips_hex() {
        let tag: VisualTag = "#7c3aed".parse().unwrap();
        assert_eq!(tag, VisualTag::rgb(0x7c, 0x3a, 0xed));
        assert_eq!(tag.to_string(), "#7c3aed");
    }

    #[test]
    fn test_block_size_follows_extent() {
        let block = Block::new(
            BlockId(4),
            Extent::new(16).unwrap(),
            VisualTag::rgb(0, 0, 0),
            Point3::new(1.0, 0.5, -5.0),
        );
        assert_eq!(block.size(), Vector3::new(1.0, 1.0, 8.0));

        let bounds = block.bounds();
        assert_eq!(bounds.min, Point3::new(0.5, 0.0, -9.0));
        assert_eq!(bounds.max, Point3::new(1.5, 1.0, -1.0));
    }

    #[test]
    fn test_shaded_darkens() {
        let tag = VisualTag::rgb(200, 100, 50);
        assert_eq!(tag.shaded(0.5), VisualTag::rgb(100, 50, 25));
        assert_eq!(tag.shaded(2.0), tag);
    }
}
