//! Grouping of valid sweep intervals.

/// Contiguous runs of finite `theta2` samples, reported as `(start, end)`
/// pairs of `theta1` values in degrees.
///
/// The two slices are aligned index-for-index; the scan covers their common
/// prefix. A single valid sample yields a degenerate range with
/// `start == end`.
pub fn group_success_ranges(theta1_vals: &[f64], theta2_vals: &[f64]) -> Vec<(f64, f64)> {
    let len = theta1_vals.len().min(theta2_vals.len());
    let mut runs = Vec::new();
    let mut run_start: Option<usize> = None;

    for i in 0..len {
        if theta2_vals[i].is_finite() {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            runs.push((start, i - 1));
        }
    }
    if let Some(start) = run_start {
        runs.push((start, len - 1));
    }

    runs.into_iter()
        .map(|(start, end)| {
            (
                theta1_vals[start].to_degrees(),
                theta1_vals[end].to_degrees(),
            )
        })
        .collect()
}
