/// Cargoyard Core Library - block placement on an integer grid
///
/// Holds the block store, the drag-to-grid snapping rule and the per-pointer
/// drag state machine, plus the geometry, camera and picking helpers a
/// front-end needs to turn pointer input into grid moves.

pub mod block;
pub mod config;
pub mod drag;
pub mod error;
pub mod floor;
pub mod geometry;
pub mod parse;
pub mod picking;
pub mod projection;
pub mod session;
pub mod snap;
pub mod store;
pub mod transform;

// Re-export commonly used types
pub use block::{Block, BlockId, Extent, VisualTag};
pub use config::{SceneConfig, DEFAULT_HEIGHT_LIMIT};
pub use drag::{DragState, DragTracker, PointerId};
pub use error::{Axis, CargoError, Result};
pub use floor::FloorGrid;
pub use geometry::{Mesh, Triangle, Vertex};
pub use picking::{pick_block, Aabb, DragPlane, Hit, Ray};
pub use projection::Camera;
pub use session::BuilderSession;
pub use snap::{snap_to_grid, GridPos};
pub use store::GridStore;
pub use transform::{Orbit, Transform};
