//! Dense loss-surface grids around a calibration optimum.

use anyhow::{Context, Result};
use nalgebra::DMatrix;

use crate::error::ConfigError;
use crate::grid::anchor_axis;
use crate::oracle::Oracle;
use crate::space::ParameterSpace;
use crate::types::{FitResult, Surface};

/// Stored in place of non-finite oracle outputs. Genuine losses are squared
/// errors and therefore non-negative, so the marker never collides with one.
pub const INVALID_SENTINEL: f64 = -0.01;

/// Samples one loss surface per parameter pair, in request order.
///
/// `pairs` defaults to every unordered pair of the space's keys. Each grid is
/// anchored so that one node coincides with the optimum, and that cell is
/// overwritten with `result.fun` afterwards: the recorded optimizer objective
/// is authoritative for the optimum, whatever the oracle recomputes there.
pub fn generate_loss_surfaces<O: Oracle + ?Sized>(
    result: &FitResult,
    space: &ParameterSpace,
    oracle: &O,
    resolution: usize,
    pairs: Option<&[(String, String)]>,
) -> Result<Vec<Surface>> {
    if resolution < 2 {
        return Err(ConfigError::Resolution(resolution).into());
    }
    if result.x.len() != space.len() {
        return Err(ConfigError::DimensionMismatch {
            expected: space.len(),
            got: result.x.len(),
        }
        .into());
    }

    let default_pairs;
    let pairs: &[(String, String)] = match pairs {
        Some(requested) => requested,
        None => {
            default_pairs = space.all_pairs();
            &default_pairs
        }
    };
    if pairs.is_empty() {
        return Err(ConfigError::EmptyPairs.into());
    }

    log::debug!(
        "sampling {} loss surfaces at resolution {} ({} oracle calls)",
        pairs.len(),
        resolution,
        pairs.len() * resolution * resolution
    );

    let mut surfaces = Vec::with_capacity(pairs.len());
    for (x_key, y_key) in pairs {
        let surface = sample_pair(result, space, oracle, resolution, x_key, y_key)
            .with_context(|| format!("Failed to sample the ({x_key}, {y_key}) loss surface."))?;
        surfaces.push(surface);
    }
    Ok(surfaces)
}

fn sample_pair<O: Oracle + ?Sized>(
    result: &FitResult,
    space: &ParameterSpace,
    oracle: &O,
    resolution: usize,
    x_key: &str,
    y_key: &str,
) -> Result<Surface> {
    let x_index = space.index_of(x_key)?;
    let y_index = space.index_of(y_key)?;
    let x_axis = anchor_axis(space.bounds(x_key)?, result.x[x_index], resolution)?;
    let y_axis = anchor_axis(space.bounds(y_key)?, result.x[y_index], resolution)?;
    let x_values = x_axis.values();
    let y_values = y_axis.values();

    let mut params = result.x.clone();
    let mut z = DMatrix::zeros(resolution, resolution);
    for (row, &y) in y_values.iter().enumerate() {
        params[y_index] = y;
        for (col, &x) in x_values.iter().enumerate() {
            params[x_index] = x;
            let value = oracle.evaluate(&params, INVALID_SENTINEL);
            z[(row, col)] = if value.is_finite() {
                value
            } else {
                INVALID_SENTINEL
            };
        }
    }
    z[(y_axis.anchor_index, x_axis.anchor_index)] = result.fun;

    Ok(Surface {
        x_key: x_key.to_string(),
        y_key: y_key.to_string(),
        x: x_values,
        y: y_values,
        z,
        anchor_row: y_axis.anchor_index,
        anchor_col: x_axis.anchor_index,
    })
}
