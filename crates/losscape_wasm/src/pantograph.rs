//! Built-in pantograph model, exposed without a JS callback.

use losscape_core::cloud::sample_point_cloud;
use losscape_core::pantograph::{default_theta_sweep, solve_sweep, PantographLeg, SymmetryOracle};
use losscape_core::ranges::group_success_ranges;
use losscape_core::surface::generate_loss_surfaces;
use losscape_core::types::{Bounds, SweepSettings};
use serde::Serialize;
use serde_wasm_bindgen::to_value;
use wasm_bindgen::prelude::*;

use crate::session::WasmCalibration;

/// Solved hip/knee sweep for one leg geometry, in degrees. Angles where the
/// linkage cannot close carry NaN, and the valid stretches are summarized as
/// `(start, end)` hip-angle ranges.
#[derive(Serialize)]
struct SweepSolution {
    theta1_deg: Vec<f64>,
    theta2_deg: Vec<f64>,
    success_ranges: Vec<(f64, f64)>,
}

#[wasm_bindgen]
pub fn solve_leg_sweep(
    leg_length: f64,
    anchor_x: f64,
    anchor_y: f64,
    rod_length: f64,
    crank_length: f64,
    samples: usize,
) -> Result<JsValue, JsValue> {
    if samples == 0 {
        return Err(JsValue::from_str("At least one sweep sample is required."));
    }
    let leg = PantographLeg::new(leg_length, anchor_x, anchor_y, rod_length, crank_length);
    let theta1 = default_theta_sweep(samples);
    let theta2 = solve_sweep(&leg, &theta1);

    let solution = SweepSolution {
        success_ranges: group_success_ranges(&theta1, &theta2),
        theta1_deg: theta1.iter().map(|t| t.to_degrees()).collect(),
        theta2_deg: theta2.iter().map(|t| t.to_degrees()).collect(),
    };
    to_value(&solution).map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
}

#[wasm_bindgen]
impl WasmCalibration {
    /// Loss surfaces scored by the built-in symmetry objective.
    pub fn generate_symmetry_surfaces(
        &self,
        resolution: usize,
        leg_length: f64,
        sweep_samples: usize,
    ) -> Result<JsValue, JsValue> {
        let oracle = SymmetryOracle::new(
            &self.space,
            leg_length,
            default_theta_sweep(sweep_samples),
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let surfaces = generate_loss_surfaces(&self.result, &self.space, &oracle, resolution, None)
            .map_err(|err| JsValue::from_str(&format!("Surface generation failed: {err}")))?;
        to_value(&surfaces).map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
    }

    /// Anchor-manifold cloud scored by the built-in symmetry objective.
    pub fn sample_symmetry_cloud(
        &self,
        resolution: usize,
        angles_deg: Vec<f64>,
        magnitude_min: f64,
        magnitude_max: f64,
        leg_length: f64,
        sweep_samples: usize,
    ) -> Result<JsValue, JsValue> {
        let oracle = SymmetryOracle::new(
            &self.space,
            leg_length,
            default_theta_sweep(sweep_samples),
        )
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let settings = SweepSettings {
            resolution,
            angles_deg,
            magnitude: Bounds::new(magnitude_min, magnitude_max),
        };
        let samples = sample_point_cloud(&self.result, &self.space, &oracle, &settings)
            .map_err(|err| JsValue::from_str(&format!("Point-cloud sampling failed: {err}")))?;
        to_value(&samples).map_err(|err| JsValue::from_str(&format!("Serialization error: {err}")))
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(target_arch = "wasm32")]
    fn solve_leg_sweep_rejects_zero_samples() {
        let result = super::solve_leg_sweep(1.0, 0.6, -0.2, 0.8, 0.3, 0);
        assert!(result.is_err(), "expected sample count error");
    }
}
