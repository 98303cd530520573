/// Cargoyard Web - WASM bindings for driving a builder session from JavaScript
///
/// The browser side owns rendering and hit testing; it reports pointer
/// presses, intersection points and releases per block id and reads block
/// positions back after every move.

use cargoyard_core::{Block, BlockId, BuilderSession, CargoError, DragState, SceneConfig};
use nalgebra::Point3;
use wasm_bindgen::prelude::*;

fn to_js(err: CargoError) -> JsValue {
    let message = err.to_string();
    web_sys::console::warn_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

#[wasm_bindgen]
pub struct CargoyardSession {
    session: BuilderSession,
}

#[wasm_bindgen]
impl CargoyardSession {
    /// Session with the default cargo scene
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<CargoyardSession, JsValue> {
        Self::from_config(SceneConfig::default())
    }

    /// Default scene with a custom height limit
    #[wasm_bindgen(js_name = withHeightLimit)]
    pub fn with_height_limit(height_limit: u32) -> Result<CargoyardSession, JsValue> {
        Self::from_config(SceneConfig::default().with_height_limit(height_limit))
    }

    #[wasm_bindgen(js_name = heightLimit)]
    pub fn height_limit(&self) -> u32 {
        self.session.height_limit()
    }

    #[wasm_bindgen(js_name = blockCount)]
    pub fn block_count(&self) -> usize {
        self.session.blocks().len()
    }

    /// Block ids in render order
    #[wasm_bindgen(js_name = blockIds)]
    pub fn block_ids(&self) -> Vec<u32> {
        self.session.blocks().iter().map(|b| b.id.0).collect()
    }

    /// `[x, y, z]` of a block
    #[wasm_bindgen(js_name = blockPosition)]
    pub fn block_position(&self, id: u32) -> Result<Vec<f32>, JsValue> {
        let block = self.block(id)?;
        Ok(vec![block.position.x, block.position.y, block.position.z])
    }

    #[wasm_bindgen(js_name = blockExtent)]
    pub fn block_extent(&self, id: u32) -> Result<u32, JsValue> {
        Ok(self.block(id)?.extent.value())
    }

    /// Block color as `#rrggbb`
    #[wasm_bindgen(js_name = blockColor)]
    pub fn block_color(&self, id: u32) -> Result<String, JsValue> {
        Ok(self.block(id)?.tag.to_string())
    }

    /// Solid floor tiles as flattened `[x0, z0, x1, z1, ...]`
    #[wasm_bindgen(js_name = floorCells)]
    pub fn floor_cells(&self) -> Vec<u32> {
        self.session
            .floor()
            .solid_cells()
            .flat_map(|(x, z)| [x as u32, z as u32])
            .collect()
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.on_pointer_down(BlockId(id)).map_err(to_js)
    }

    /// Returns `true` when the block was dragging and its position was updated
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, id: u32, x: f32, y: f32, z: f32) -> Result<bool, JsValue> {
        self.session
            .on_pointer_move(BlockId(id), Point3::new(x, y, z))
            .map(|snapped| snapped.is_some())
            .map_err(to_js)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, id: u32) -> Result<(), JsValue> {
        self.session.on_pointer_up(BlockId(id)).map_err(to_js)
    }

    #[wasm_bindgen(js_name = isDragging)]
    pub fn is_dragging(&self, id: u32) -> Result<bool, JsValue> {
        let state = self.session.drag_state(BlockId(id)).map_err(to_js)?;
        Ok(matches!(state, DragState::Dragging { .. }))
    }
}

impl CargoyardSession {
    fn from_config(config: SceneConfig) -> Result<CargoyardSession, JsValue> {
        let session = BuilderSession::new(config).map_err(to_js)?;
        Ok(CargoyardSession { session })
    }

    fn block(&self, id: u32) -> Result<&Block, JsValue> {
        self.session
            .block(BlockId(id))
            .ok_or_else(|| to_js(CargoError::UnknownBlock(BlockId(id))))
    }
}
