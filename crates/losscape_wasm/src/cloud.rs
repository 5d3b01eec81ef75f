//! Anchor-manifold point-cloud sampling over the wasm boundary.

use losscape_core::cloud::sample_point_cloud;
use losscape_core::types::{Bounds, PointCloudSample, SweepSettings};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::session::{JsOracle, WasmCalibration};

/// Sweep payload: the finite samples plus the cost actually paid for them.
#[derive(Serialize)]
struct SweepSummary {
    evaluations: usize,
    kept: usize,
    samples: Vec<PointCloudSample>,
}

#[wasm_bindgen]
impl WasmCalibration {
    pub fn sample_point_cloud(
        &self,
        resolution: usize,
        angles_deg: Vec<f64>,
        magnitude_min: f64,
        magnitude_max: f64,
        error_fn: &js_sys::Function,
    ) -> Result<JsValue, JsValue> {
        let settings = SweepSettings {
            resolution,
            angles_deg,
            magnitude: Bounds::new(magnitude_min, magnitude_max),
        };

        let oracle = JsOracle::new(error_fn);
        let samples = sample_point_cloud(&self.result, &self.space, &oracle, &settings)
            .map_err(|err| JsValue::from_str(&format!("Point-cloud sampling failed: {err}")))?;

        if let Some(failure) = oracle.take_failure() {
            return Err(failure);
        }
        let summary = SweepSummary {
            evaluations: settings.evaluation_count(),
            kept: samples.len(),
            samples,
        };
        to_value(&summary).map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
    }
}
