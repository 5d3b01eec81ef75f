//! Grid anchoring arithmetic shared by the samplers.
//!
//! The surface sampler does not subdivide `[min, max]` directly: it keeps
//! the plain subdivision step but shifts the whole axis so that the node
//! nearest the optimized value coincides with it exactly. The visible window
//! may therefore extend past the original bounds; that is intentional and
//! must not be clamped away.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Bounds;

/// A uniformly spaced axis shifted so that one node lands exactly on an
/// anchor value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchoredAxis {
    pub start: f64,
    pub step: f64,
    pub resolution: usize,
    /// Index of the node pinned to `anchor_value`.
    pub anchor_index: usize,
    pub anchor_value: f64,
}

impl AnchoredAxis {
    /// Node coordinates. The anchor node carries the exact anchor value, not
    /// the `start + index * step` reconstruction of it.
    pub fn values(&self) -> Vec<f64> {
        let mut values: Vec<f64> = (0..self.resolution)
            .map(|i| self.start + self.step * i as f64)
            .collect();
        values[self.anchor_index] = self.anchor_value;
        values
    }
}

/// Builds the evaluation axis for one parameter. An anchor that rounds
/// outside the grid means the optimum violates its declared bounds and is
/// rejected.
pub fn anchor_axis(
    bounds: Bounds,
    anchor_value: f64,
    resolution: usize,
) -> Result<AnchoredAxis, ConfigError> {
    if resolution < 2 {
        return Err(ConfigError::Resolution(resolution));
    }
    if !bounds.is_valid() {
        return Err(ConfigError::InvalidBounds {
            min: bounds.min,
            max: bounds.max,
        });
    }
    if !anchor_value.is_finite() {
        return Err(ConfigError::NonFiniteAnchor {
            value: anchor_value,
        });
    }

    let step = bounds.width() / (resolution - 1) as f64;
    let index = ((anchor_value - bounds.min) / step).round();
    if index < 0.0 || index > (resolution - 1) as f64 {
        return Err(ConfigError::AnchorOffGrid {
            index: index as i64,
            resolution,
        });
    }
    let anchor_index = index as usize;

    Ok(AnchoredAxis {
        start: anchor_value - anchor_index as f64 * step,
        step,
        resolution,
        anchor_index,
        anchor_value,
    })
}

/// Evenly spaced sweep over `[min, max]`, endpoint included and pinned.
pub fn linspace(min: f64, max: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![min];
    }
    let step = (max - min) / (count - 1) as f64;
    let mut values: Vec<f64> = (0..count).map(|i| min + step * i as f64).collect();
    values[count - 1] = max;
    values
}
