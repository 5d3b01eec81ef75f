pub mod cloud;
pub mod error;
pub mod grid;
/// The `losscape_core` crate analyzes the neighborhood of a least-squares
/// linkage-calibration optimum.
///
/// Key components:
/// - **Oracle**: capability trait over the externally supplied error function.
/// - **Surface sampler**: dense 2-D loss grids anchored exactly on the optimum.
/// - **Cloud sampler**: combinatorial sweep of the constrained anchor manifold.
/// - **Pantograph**: the reference leg model the calibration measures.
pub mod oracle;
pub mod pantograph;
pub mod ranges;
pub mod space;
pub mod surface;
pub mod types;
