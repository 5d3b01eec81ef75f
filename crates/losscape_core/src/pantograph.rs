//! Reference pantograph-leg model behind the calibration error function.
//!
//! Hip at the origin, upper leg of length `l` down to the knee, lower leg of
//! the same length from the knee, and a crank of length `c` on the knee
//! joint whose tip is tied to a fixed anchor point by a rod of length `b`.
//! The calibration asks the rod to steer the knee so that the lower-leg
//! angle mirrors the hip angle (`theta2 = theta1`).

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::cloud::{ANCHOR_X_KEY, ANCHOR_Y_KEY, CRANK_KEY, ROD_KEY};
use crate::error::ConfigError;
use crate::grid::linspace;
use crate::oracle::Oracle;
use crate::space::ParameterSpace;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PantographLeg {
    pub leg_length: f64,
    pub anchor: Vector2<f64>,
    pub rod_length: f64,
    pub crank_length: f64,
}

impl PantographLeg {
    pub fn new(
        leg_length: f64,
        anchor_x: f64,
        anchor_y: f64,
        rod_length: f64,
        crank_length: f64,
    ) -> Self {
        Self {
            leg_length,
            anchor: Vector2::new(anchor_x, anchor_y),
            rod_length,
            crank_length,
        }
    }

    pub fn knee(&self, theta1: f64) -> Vector2<f64> {
        self.leg_length * Vector2::new(theta1.cos(), -theta1.sin())
    }

    pub fn connector(&self, theta1: f64, theta2: f64) -> Vector2<f64> {
        self.knee(theta1) + self.crank_length * Vector2::new(theta2.cos(), theta2.sin())
    }

    pub fn foot(&self, theta1: f64, theta2: f64) -> Vector2<f64> {
        self.knee(theta1) - self.leg_length * Vector2::new(theta2.cos(), theta2.sin())
    }

    /// Knee angle that closes the pantograph rod onto the anchor, if the
    /// linkage can close at this hip angle. Of the two closing angles, the
    /// one nearer the `theta2 = theta1` symmetry line is returned.
    pub fn solve_knee_angle(&self, theta1: f64) -> Option<f64> {
        if self.leg_length <= 0.0 || self.rod_length <= 0.0 || self.crank_length <= 0.0 {
            return None;
        }
        let to_anchor = self.anchor - self.knee(theta1);
        let distance = to_anchor.norm();
        if distance <= f64::EPSILON {
            return None;
        }

        // Law of cosines in the crank / rod / knee-to-anchor triangle.
        let cos_spread = (self.crank_length.powi(2) + distance.powi(2)
            - self.rod_length.powi(2))
            / (2.0 * self.crank_length * distance);
        if !(-1.0..=1.0).contains(&cos_spread) {
            return None;
        }

        let heading = to_anchor.y.atan2(to_anchor.x);
        let spread = cos_spread.acos();
        [heading - spread, heading + spread]
            .into_iter()
            .map(wrap_angle)
            .min_by(|a, b| {
                angle_distance(*a, theta1).total_cmp(&angle_distance(*b, theta1))
            })
    }
}

/// Knee angle for each hip angle in the sweep, `NaN` where the linkage
/// cannot close.
pub fn solve_sweep(leg: &PantographLeg, theta1_vals: &[f64]) -> Vec<f64> {
    theta1_vals
        .iter()
        .map(|&theta1| leg.solve_knee_angle(theta1).unwrap_or(f64::NAN))
        .collect()
}

/// Default hip-angle sweep: 0 to 90 degrees, in radians.
pub fn default_theta_sweep(samples: usize) -> Vec<f64> {
    linspace(0.0, std::f64::consts::FRAC_PI_2, samples)
}

/// Mean squared deviation from the `theta2 = theta1` symmetry line across a
/// hip-angle sweep.
///
/// A configuration whose linkage fails to close at any sweep angle is
/// invalid as a whole; the caller's fallback is returned for it.
#[derive(Debug, Clone)]
pub struct SymmetryOracle {
    leg_length: f64,
    theta_sweep: Vec<f64>,
    ax_index: usize,
    ay_index: usize,
    rod_index: usize,
    crank_index: usize,
}

impl SymmetryOracle {
    /// Resolves the `a_x`/`a_y`/`b`/`c` positions once, against the space the
    /// samplers will build vectors for.
    pub fn new(
        space: &ParameterSpace,
        leg_length: f64,
        theta_sweep: Vec<f64>,
    ) -> Result<Self, ConfigError> {
        if theta_sweep.is_empty() {
            return Err(ConfigError::EmptyAngles);
        }
        Ok(Self {
            leg_length,
            ax_index: space.index_of(ANCHOR_X_KEY)?,
            ay_index: space.index_of(ANCHOR_Y_KEY)?,
            rod_index: space.index_of(ROD_KEY)?,
            crank_index: space.index_of(CRANK_KEY)?,
            theta_sweep,
        })
    }

    pub fn leg_from(&self, params: &[f64]) -> PantographLeg {
        PantographLeg {
            leg_length: self.leg_length,
            anchor: Vector2::new(params[self.ax_index], params[self.ay_index]),
            rod_length: params[self.rod_index],
            crank_length: params[self.crank_index],
        }
    }
}

impl Oracle for SymmetryOracle {
    fn evaluate(&self, params: &[f64], fallback: f64) -> f64 {
        let leg = self.leg_from(params);
        let mut sum = 0.0;
        for &theta1 in &self.theta_sweep {
            match leg.solve_knee_angle(theta1) {
                Some(theta2) => {
                    let deviation = wrap_angle(theta2 - theta1);
                    sum += deviation * deviation;
                }
                None => return fallback,
            }
        }
        sum / self.theta_sweep.len() as f64
    }
}

/// Wraps an angle into `(-PI, PI]`.
fn wrap_angle(angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    let wrapped = angle.rem_euclid(two_pi);
    if wrapped > std::f64::consts::PI {
        wrapped - two_pi
    } else {
        wrapped
    }
}

fn angle_distance(a: f64, b: f64) -> f64 {
    wrap_angle(a - b).abs()
}
