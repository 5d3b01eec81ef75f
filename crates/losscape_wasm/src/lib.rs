//! WASM bridge handing losscape sampling results to JS visualization layers.

pub mod cloud;
pub mod pantograph;
pub mod session;
pub mod surfaces;

pub use session::WasmCalibration;
