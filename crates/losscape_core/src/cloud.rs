//! Combinatorial sweep of the constrained anchor manifold.
//!
//! Instead of sweeping `a_x` and `a_y` independently, the sampler walks the
//! (magnitude, angle) manifold `a_x = |A| cos(angle)`, `a_y = |A| sin(angle)`
//! crossed with the rod and crank bounds. The `a_x = a_y` line is the
//! 45-degree special case.

use anyhow::Result;

use crate::error::ConfigError;
use crate::grid::linspace;
use crate::oracle::Oracle;
use crate::space::ParameterSpace;
use crate::types::{FitResult, PointCloudSample, SweepSettings};

/// Parameter keys the sweep overrides in the optimized vector.
pub const ANCHOR_X_KEY: &str = "a_x";
pub const ANCHOR_Y_KEY: &str = "a_y";
pub const ROD_KEY: &str = "b";
pub const CRANK_KEY: &str = "c";

struct SweepPoint {
    angle_deg: f64,
    magnitude: f64,
    b: f64,
    c: f64,
}

/// Fixed iteration order: angle, then magnitude, then b, then c. Identical
/// inputs yield identical output ordering even though consumers treat the
/// result as an unordered cloud.
fn cartesian_sweep<'a>(
    angles_deg: &'a [f64],
    magnitudes: &'a [f64],
    rod_values: &'a [f64],
    crank_values: &'a [f64],
) -> impl Iterator<Item = SweepPoint> + 'a {
    angles_deg.iter().flat_map(move |&angle_deg| {
        magnitudes.iter().flat_map(move |&magnitude| {
            rod_values.iter().flat_map(move |&b| {
                crank_values.iter().map(move |&c| SweepPoint {
                    angle_deg,
                    magnitude,
                    b,
                    c,
                })
            })
        })
    })
}

/// Sweeps the anchor manifold and keeps every finite oracle evaluation.
///
/// Costs exactly `settings.evaluation_count()` oracle calls; non-finite
/// results are dropped from the output, never stored with a marker.
pub fn sample_point_cloud<O: Oracle + ?Sized>(
    result: &FitResult,
    space: &ParameterSpace,
    oracle: &O,
    settings: &SweepSettings,
) -> Result<Vec<PointCloudSample>> {
    if settings.resolution < 2 {
        return Err(ConfigError::Resolution(settings.resolution).into());
    }
    if settings.angles_deg.is_empty() {
        return Err(ConfigError::EmptyAngles.into());
    }
    if !settings.magnitude.is_valid() {
        return Err(ConfigError::InvalidBounds {
            min: settings.magnitude.min,
            max: settings.magnitude.max,
        }
        .into());
    }
    if result.x.len() != space.len() {
        return Err(ConfigError::DimensionMismatch {
            expected: space.len(),
            got: result.x.len(),
        }
        .into());
    }

    let ax_index = space.index_of(ANCHOR_X_KEY)?;
    let ay_index = space.index_of(ANCHOR_Y_KEY)?;
    let rod_index = space.index_of(ROD_KEY)?;
    let crank_index = space.index_of(CRANK_KEY)?;

    let rod_bounds = space.bounds(ROD_KEY)?;
    let crank_bounds = space.bounds(CRANK_KEY)?;
    let magnitudes = linspace(
        settings.magnitude.min,
        settings.magnitude.max,
        settings.resolution,
    );
    let rod_values = linspace(rod_bounds.min, rod_bounds.max, settings.resolution);
    let crank_values = linspace(crank_bounds.min, crank_bounds.max, settings.resolution);

    log::debug!(
        "sweeping {} anchor-manifold configurations ({} angles x {}^3)",
        settings.evaluation_count(),
        settings.angles_deg.len(),
        settings.resolution
    );

    let mut cloud = Vec::new();
    let mut params = result.x.clone();
    for point in cartesian_sweep(&settings.angles_deg, &magnitudes, &rod_values, &crank_values) {
        let angle = point.angle_deg.to_radians();
        params[ax_index] = point.magnitude * angle.cos();
        params[ay_index] = point.magnitude * angle.sin();
        params[rod_index] = point.b;
        params[crank_index] = point.c;

        let error = oracle.evaluate(&params, f64::NAN);
        if error.is_finite() {
            cloud.push(PointCloudSample {
                magnitude: point.magnitude,
                b: point.b,
                c: point.c,
                error,
            });
        }
    }
    Ok(cloud)
}

#[cfg(test)]
mod tests {
    use super::sample_point_cloud;
    use crate::oracle::Oracle;
    use crate::space::ParameterSpace;
    use crate::types::{Bounds, FitResult, SweepSettings};
    use std::cell::Cell;
    use std::collections::HashMap;

    fn leg_space() -> ParameterSpace {
        let keys = ["a_x", "a_y", "b", "c"].map(str::to_string).to_vec();
        let bounds = HashMap::from([
            ("b".to_string(), Bounds::new(0.5, 1.5)),
            ("c".to_string(), Bounds::new(0.1, 0.9)),
        ]);
        ParameterSpace::new(keys, bounds).expect("space should build")
    }

    fn fit() -> FitResult {
        FitResult {
            x: vec![0.0, 0.0, 1.0, 0.5],
            fun: 0.0,
        }
    }

    fn tiny_sweep() -> SweepSettings {
        SweepSettings {
            resolution: 2,
            angles_deg: vec![45.0],
            ..SweepSettings::default()
        }
    }

    struct RecordingOracle {
        calls: Cell<usize>,
    }

    impl Oracle for RecordingOracle {
        fn evaluate(&self, params: &[f64], _fallback: f64) -> f64 {
            self.calls.set(self.calls.get() + 1);
            params.iter().sum()
        }
    }

    #[test]
    fn single_angle_resolution_two_costs_eight_evaluations() {
        let settings = tiny_sweep();
        assert_eq!(settings.evaluation_count(), 8);

        let oracle = RecordingOracle {
            calls: Cell::new(0),
        };
        let cloud = sample_point_cloud(&fit(), &leg_space(), &oracle, &settings)
            .expect("cloud should sample");
        assert_eq!(oracle.calls.get(), 8);
        assert_eq!(cloud.len(), 8);

        // Magnitude sweeps the window extremes, b and c their bound extremes.
        assert_eq!(cloud[0].magnitude, 0.1);
        assert_eq!(cloud[0].b, 0.5);
        assert_eq!(cloud[0].c, 0.1);
        let last = cloud.last().expect("non-empty cloud");
        assert_eq!(last.magnitude, 1.2);
        assert_eq!(last.b, 1.5);
        assert_eq!(last.c, 0.9);
    }

    #[test]
    fn forty_five_degrees_walks_the_diagonal_manifold() {
        let seen = std::cell::RefCell::new(Vec::new());
        let oracle = |params: &[f64], _fallback: f64| {
            seen.borrow_mut().push((params[0], params[1]));
            0.0
        };
        sample_point_cloud(&fit(), &leg_space(), &oracle, &tiny_sweep())
            .expect("cloud should sample");

        for &(a_x, a_y) in seen.borrow().iter() {
            assert!((a_x - a_y).abs() < 1e-12, "45 degrees means a_x = a_y");
        }
    }

    #[test]
    fn non_finite_errors_are_dropped_not_stored() {
        let oracle = |params: &[f64], fallback: f64| {
            if params[2] > 1.0 {
                fallback
            } else {
                params[3]
            }
        };
        let cloud = sample_point_cloud(&fit(), &leg_space(), &oracle, &tiny_sweep())
            .expect("cloud should sample");

        // b = 1.5 configurations fall out, b = 0.5 ones stay.
        assert_eq!(cloud.len(), 4);
        assert!(cloud.iter().all(|sample| sample.error.is_finite()));
        assert!(cloud.iter().all(|sample| sample.b == 0.5));
    }

    #[test]
    fn iteration_order_is_deterministic() {
        let oracle = |params: &[f64], _fallback: f64| params.iter().sum::<f64>();
        let settings = SweepSettings {
            resolution: 3,
            angles_deg: vec![20.0, 70.0],
            ..SweepSettings::default()
        };
        let first = sample_point_cloud(&fit(), &leg_space(), &oracle, &settings)
            .expect("first run");
        let second = sample_point_cloud(&fit(), &leg_space(), &oracle, &settings)
            .expect("second run");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2 * 27);
    }

    #[test]
    fn sweep_only_touches_the_four_manifold_parameters() {
        let keys = ["l", "a_x", "a_y", "b", "c"].map(str::to_string).to_vec();
        let bounds = HashMap::from([
            ("b".to_string(), Bounds::new(0.5, 1.5)),
            ("c".to_string(), Bounds::new(0.1, 0.9)),
        ]);
        let space = ParameterSpace::new(keys, bounds).expect("space should build");
        let result = FitResult {
            x: vec![0.77, 0.0, 0.0, 1.0, 0.5],
            fun: 0.0,
        };
        let oracle = |params: &[f64], _fallback: f64| params[0];
        let cloud = sample_point_cloud(&result, &space, &oracle, &tiny_sweep())
            .expect("cloud should sample");
        assert!(cloud.iter().all(|sample| sample.error == 0.77));
    }

    #[test]
    fn configuration_errors_fail_before_any_evaluation() {
        let oracle = RecordingOracle {
            calls: Cell::new(0),
        };

        let bad_resolution = SweepSettings {
            resolution: 1,
            ..tiny_sweep()
        };
        assert!(sample_point_cloud(&fit(), &leg_space(), &oracle, &bad_resolution).is_err());

        let no_angles = SweepSettings {
            angles_deg: Vec::new(),
            ..tiny_sweep()
        };
        assert!(sample_point_cloud(&fit(), &leg_space(), &oracle, &no_angles).is_err());

        let keys = ["a_x", "a_y"].map(str::to_string).to_vec();
        let unbounded = ParameterSpace::new(keys, HashMap::new()).expect("space should build");
        let short_fit = FitResult {
            x: vec![0.0, 0.0],
            fun: 0.0,
        };
        assert!(sample_point_cloud(&short_fit, &unbounded, &oracle, &tiny_sweep()).is_err());

        assert_eq!(oracle.calls.get(), 0, "no oracle call before validation");
    }
}
