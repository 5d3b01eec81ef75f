//! Core WASM calibration wrapper and the JS oracle adapter.

use std::cell::RefCell;
use std::collections::HashMap;

use losscape_core::oracle::Oracle;
use losscape_core::space::ParameterSpace;
use losscape_core::types::{Bounds, FitResult};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmCalibration {
    pub(crate) space: ParameterSpace,
    pub(crate) result: FitResult,
}

pub(crate) fn build_space(
    param_keys: Vec<String>,
    bound_keys: Vec<String>,
    bound_mins: Vec<f64>,
    bound_maxs: Vec<f64>,
) -> Result<ParameterSpace, JsValue> {
    if bound_keys.len() != bound_mins.len() || bound_keys.len() != bound_maxs.len() {
        return Err(JsValue::from_str("Bound arrays must have the same length."));
    }
    let mut bounds = HashMap::new();
    for (i, key) in bound_keys.into_iter().enumerate() {
        bounds.insert(key, Bounds::new(bound_mins[i], bound_maxs[i]));
    }
    ParameterSpace::new(param_keys, bounds).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen]
impl WasmCalibration {
    #[wasm_bindgen(constructor)]
    pub fn new(
        param_keys: Vec<String>,
        bound_keys: Vec<String>,
        bound_mins: Vec<f64>,
        bound_maxs: Vec<f64>,
        optimized: Vec<f64>,
        objective: f64,
    ) -> Result<WasmCalibration, JsValue> {
        console_error_panic_hook::set_once();

        let space = build_space(param_keys, bound_keys, bound_mins, bound_maxs)?;
        if optimized.len() != space.len() {
            return Err(JsValue::from_str(&format!(
                "Optimized vector has {} entries but the space has {}.",
                optimized.len(),
                space.len()
            )));
        }

        Ok(WasmCalibration {
            space,
            result: FitResult {
                x: optimized,
                fun: objective,
            },
        })
    }

    pub fn parameter_count(&self) -> usize {
        self.space.len()
    }

    pub fn objective(&self) -> f64 {
        self.result.fun
    }
}

/// Oracle backed by a JS callback `(params: Float64Array, fallback: number)
/// => number`.
///
/// The first exception the callback throws is stashed, every remaining
/// evaluation short-circuits to NaN, and the exception is handed back to the
/// caller unchanged once the sampler returns.
pub(crate) struct JsOracle<'a> {
    callback: &'a js_sys::Function,
    failure: RefCell<Option<JsValue>>,
}

impl<'a> JsOracle<'a> {
    pub(crate) fn new(callback: &'a js_sys::Function) -> Self {
        Self {
            callback,
            failure: RefCell::new(None),
        }
    }

    pub(crate) fn take_failure(&self) -> Option<JsValue> {
        self.failure.borrow_mut().take()
    }
}

impl Oracle for JsOracle<'_> {
    fn evaluate(&self, params: &[f64], fallback: f64) -> f64 {
        if self.failure.borrow().is_some() {
            return f64::NAN;
        }
        let array = js_sys::Float64Array::from(params);
        match self
            .callback
            .call2(&JsValue::NULL, &array.into(), &JsValue::from(fallback))
        {
            Ok(value) => value.as_f64().unwrap_or(fallback),
            Err(err) => {
                *self.failure.borrow_mut() = Some(err);
                f64::NAN
            }
        }
    }
}
