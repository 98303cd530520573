/// Builder session: the store, the floor and the drag state for one run
use nalgebra::Point3;
use tracing::{debug, info};

use crate::block::{Block, BlockId};
use crate::config::SceneConfig;
use crate::drag::{DragState, DragTracker, PointerId};
use crate::error::{CargoError, Result};
use crate::floor::FloorGrid;
use crate::snap::{snap_to_grid, GridPos};
use crate::store::GridStore;

/// Owns all mutable scene state. Created at start-up, dropped at exit.
///
/// The block-keyed `on_pointer_*` methods act as the primary pointer, except
/// that `on_pointer_up` releases a block whichever pointer holds it. The
/// `pointer_*` methods take an explicit [`PointerId`] for multi-touch input.
#[derive(Debug, Clone)]
pub struct BuilderSession {
    store: GridStore,
    floor: FloorGrid,
    drags: DragTracker,
    height_limit: u32,
}

impl BuilderSession {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let SceneConfig {
            height_limit,
            floor,
            blocks,
        } = config;
        let store = GridStore::initialize(blocks)?;

        info!(
            blocks = store.len(),
            floor_tiles = floor.solid_cells().count(),
            height_limit,
            "builder session started"
        );
        Ok(Self {
            store,
            floor,
            drags: DragTracker::new(),
            height_limit,
        })
    }

    pub fn blocks(&self) -> &[Block] {
        self.store.blocks()
    }

    pub fn block(&self, id: BlockId) -> Option<&Block> {
        self.store.get(id)
    }

    pub fn store(&self) -> &GridStore {
        &self.store
    }

    pub fn floor(&self) -> &FloorGrid {
        &self.floor
    }

    pub fn height_limit(&self) -> u32 {
        self.height_limit
    }

    pub fn drag_state(&self, id: BlockId) -> Result<DragState> {
        self.require(id)?;
        Ok(self.drags.state(id))
    }

    pub fn dragged_by(&self, pointer: PointerId) -> Option<BlockId> {
        self.drags.dragged_by(pointer)
    }

    /// Set a block's position directly, bypassing the grid snap
    pub fn update_position(&mut self, id: BlockId, position: Point3<f32>) -> Result<()> {
        self.store.update_position(id, position)
    }

    /// Primary pointer pressed on block `id`
    pub fn on_pointer_down(&mut self, id: BlockId) -> Result<()> {
        self.pointer_down(PointerId::PRIMARY, id)
    }

    /// Pointer moved over block `id`.
    ///
    /// Snaps and stores the point if the primary pointer is dragging the
    /// block, returning the new grid position. Any other block ignores the
    /// move, including one held by another pointer.
    pub fn on_pointer_move(&mut self, id: BlockId, point: Point3<f32>) -> Result<Option<GridPos>> {
        match self.drag_state(id)? {
            DragState::Dragging { pointer } if pointer == PointerId::PRIMARY => {
                self.snap_block(id, &point).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Pointer released over block `id`
    pub fn on_pointer_up(&mut self, id: BlockId) -> Result<()> {
        self.require(id)?;
        self.drags.end_block(id);
        Ok(())
    }

    pub fn pointer_down(&mut self, pointer: PointerId, id: BlockId) -> Result<()> {
        self.require(id)?;
        self.drags.begin(pointer, id)?;
        Ok(())
    }

    /// Move the block `pointer` is dragging, if any
    pub fn pointer_move(
        &mut self,
        pointer: PointerId,
        point: Point3<f32>,
    ) -> Result<Option<(BlockId, GridPos)>> {
        let Some(id) = self.drags.dragged_by(pointer) else {
            return Ok(None);
        };
        let snapped = self.snap_block(id, &point)?;
        Ok(Some((id, snapped)))
    }

    pub fn pointer_up(&mut self, pointer: PointerId) -> Option<BlockId> {
        self.drags.end(pointer)
    }

    /// Pointer lost (left the window, touch cancelled). Same as release.
    pub fn pointer_cancel(&mut self, pointer: PointerId) -> Option<BlockId> {
        let released = self.drags.end(pointer);
        if let Some(block) = released {
            debug!(%pointer, %block, "drag cancelled");
        }
        released
    }

    fn snap_block(&mut self, id: BlockId, point: &Point3<f32>) -> Result<GridPos> {
        let snapped = snap_to_grid(point, self.height_limit)?;
        self.store.update_position(id, snapped.to_point())?;
        Ok(snapped)
    }

    fn require(&self, id: BlockId) -> Result<()> {
        if self.store.contains(id) {
            Ok(())
        } else {
            Err(CargoError::UnknownBlock(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BuilderSession {
        BuilderSession::new(SceneConfig::default()).unwrap()
    }

    #[test]
    fn test_drag_snaps_and_clamps() {
        let mut session = session();
        session.on_pointer_down(BlockId(0)).unwrap();

        let snapped = session
            .on_pointer_move(BlockId(0), Point3::new(2.6, 7.0, -4.4))
            .unwrap();
        assert_eq!(snapped, Some(GridPos::new(3, 5, -4)));
        assert_eq!(
            session.block(BlockId(0)).unwrap().position,
            Point3::new(3.0, 5.0, -4.0)
        );
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut session = session();
        let before = session.blocks().to_vec();

        assert_eq!(
            session.on_pointer_move(BlockId(2), Point3::new(9.0, 9.0, 9.0)),
            Ok(None)
        );
        assert_eq!(session.blocks(), before.as_slice());
    }

    #[test]
    fn test_move_on_other_block_is_ignored() {
        let mut session = session();
        session.on_pointer_down(BlockId(1)).unwrap();

        assert_eq!(
            session.on_pointer_move(BlockId(2), Point3::new(0.0, 0.0, 0.0)),
            Ok(None)
        );
        assert_eq!(
            session.block(BlockId(2)).unwrap().position,
            Point3::new(-1.0, 0.5, -5.0)
        );
    }

    #[test]
    fn test_block_keyed_move_ignores_other_pointers() {
        let mut session = session();
        let touch = PointerId(9);
        session.pointer_down(touch, BlockId(3)).unwrap();

        assert_eq!(
            session.on_pointer_move(BlockId(3), Point3::new(4.0, 2.0, 1.0)),
            Ok(None)
        );
        assert_eq!(
            session.block(BlockId(3)).unwrap().position,
            Point3::new(0.0, 0.5, -5.0)
        );
        assert_eq!(session.dragged_by(touch), Some(BlockId(3)));
    }

    #[test]
    fn test_non_finite_move_leaves_store_untouched() {
        let mut session = session();
        session.on_pointer_down(BlockId(4)).unwrap();
        let before = session.blocks().to_vec();

        let err = session
            .on_pointer_move(BlockId(4), Point3::new(1.0, f32::NAN, 1.0))
            .unwrap_err();
        assert!(matches!(err, CargoError::NonFiniteCoordinate { .. }));
        assert_eq!(session.blocks(), before.as_slice());
        // still dragging after a rejected move
        assert_eq!(
            session.drag_state(BlockId(4)),
            Ok(DragState::Dragging {
                pointer: PointerId::PRIMARY
            })
        );
    }

    #[test]
    fn test_unknown_block_entry_points() {
        let mut session = session();
        let unknown = BlockId(42);
        assert_eq!(
            session.on_pointer_down(unknown),
            Err(CargoError::UnknownBlock(unknown))
        );
        assert_eq!(
            session.on_pointer_move(unknown, Point3::origin()),
            Err(CargoError::UnknownBlock(unknown))
        );
        assert_eq!(
            session.on_pointer_up(unknown),
            Err(CargoError::UnknownBlock(unknown))
        );
    }

    #[test]
    fn test_pointer_keyed_drags_are_independent() {
        let mut session = session();
        let touch = PointerId(3);
        session.pointer_down(PointerId::PRIMARY, BlockId(0)).unwrap();
        session.pointer_down(touch, BlockId(1)).unwrap();

        assert_eq!(
            session.pointer_move(touch, Point3::new(-6.2, 1.4, 2.5)),
            Ok(Some((BlockId(1), GridPos::new(-6, 1, 3))))
        );
        assert_eq!(
            session.block(BlockId(0)).unwrap().position,
            Point3::new(-3.0, 0.5, -5.0)
        );

        assert_eq!(session.pointer_cancel(touch), Some(BlockId(1)));
        assert_eq!(session.pointer_move(touch, Point3::origin()), Ok(None));
        assert_eq!(session.dragged_by(PointerId::PRIMARY), Some(BlockId(0)));
    }

    #[test]
    fn test_height_limit_from_config() {
        let mut session =
            BuilderSession::new(SceneConfig::default().with_height_limit(0)).unwrap();
        assert_eq!(session.height_limit(), 0);
        session.on_pointer_down(BlockId(5)).unwrap();
        assert_eq!(
            session.on_pointer_move(BlockId(5), Point3::new(0.0, 3.0, 0.0)),
            Ok(Some(GridPos::new(0, 1, 0)))
        );
    }
}
