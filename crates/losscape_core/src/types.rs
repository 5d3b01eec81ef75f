//! Core types for landscape analysis.
//!
//! This module contains the data structures exchanged between the samplers
//! and their visualization consumers.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// Closed parameter interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Finite interval with `min < max`.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// Output of the external least-squares optimizer, held read-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Optimized parameter values, aligned index-for-index with the
    /// parameter-key ordering.
    pub x: Vec<f64>,
    /// Objective value at the optimum (a mean squared error).
    pub fun: f64,
}

/// A sampled loss surface for one parameter pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub x_key: String,
    pub y_key: String,
    /// Node coordinates along the two swept axes.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Sampled error values; row `i` holds `y[i]`, column `j` holds `x[j]`.
    pub z: DMatrix<f64>,
    /// Grid position of the cell pinned to the recorded optimizer objective.
    pub anchor_row: usize,
    pub anchor_col: usize,
}

impl Surface {
    /// Full coordinate mesh in plotting order: `X[(i, j)] = x[j]` and
    /// `Y[(i, j)] = y[i]`.
    pub fn mesh(&self) -> (DMatrix<f64>, DMatrix<f64>) {
        let rows = self.y.len();
        let cols = self.x.len();
        let mesh_x = DMatrix::from_fn(rows, cols, |_, j| self.x[j]);
        let mesh_y = DMatrix::from_fn(rows, cols, |i, _| self.y[i]);
        (mesh_x, mesh_y)
    }
}

/// One finite sample from the anchor-manifold sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointCloudSample {
    /// Anchor magnitude `|A|`.
    pub magnitude: f64,
    pub b: f64,
    pub c: f64,
    pub error: f64,
}

/// Settings controlling the point-cloud sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepSettings {
    /// Points per swept dimension.
    pub resolution: usize,
    /// Anchor directions in degrees; 45 is the `a_x = a_y` special case.
    pub angles_deg: Vec<f64>,
    /// Anchor magnitude sweep window.
    pub magnitude: Bounds,
}

impl Default for SweepSettings {
    fn default() -> Self {
        Self {
            resolution: 30,
            angles_deg: vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0],
            magnitude: Bounds::new(0.1, 1.2),
        }
    }
}

impl SweepSettings {
    /// Total oracle evaluations the sweep will perform: |angles| x
    /// resolution^3. This is the dominant cost of the whole system, and
    /// resolution and angle count are the only levers on it.
    pub fn evaluation_count(&self) -> usize {
        self.angles_deg.len() * self.resolution.pow(3)
    }
}
