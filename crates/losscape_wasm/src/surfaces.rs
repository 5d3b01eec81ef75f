//! Loss-surface generation over the wasm boundary.

use losscape_core::surface::generate_loss_surfaces;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::session::{JsOracle, WasmCalibration};

#[wasm_bindgen]
impl WasmCalibration {
    /// Samples one loss surface per parameter pair against a JS error
    /// callback. `pairs` is either `null`/`undefined` for every unordered
    /// pair, or an array of `[xKey, yKey]` tuples.
    pub fn generate_surfaces(
        &self,
        resolution: usize,
        pairs: JsValue,
        error_fn: &js_sys::Function,
    ) -> Result<JsValue, JsValue> {
        let requested: Option<Vec<(String, String)>> = serde_wasm_bindgen::from_value(pairs)
            .map_err(|err| JsValue::from_str(&format!("Invalid pair list: {err}")))?;

        let oracle = JsOracle::new(error_fn);
        let surfaces = generate_loss_surfaces(
            &self.result,
            &self.space,
            &oracle,
            resolution,
            requested.as_deref(),
        )
        .map_err(|err| JsValue::from_str(&format!("Surface generation failed: {err}")))?;

        if let Some(failure) = oracle.take_failure() {
            return Err(failure);
        }
        to_value(&surfaces).map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
    }
}
