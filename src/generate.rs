//! Seeded random instances for benchmarking and cross-validation.
//!
//! Every generator takes the RNG explicitly, so the same seed reproduces the same
//! instance on every platform.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use crate::core::cost::{CostMatrix, ModelError};
use crate::core::point::{Point, PointSet};

/// Deterministic generator for a given seed
#[must_use]
pub fn seeded_rng(seed: u64) -> Xoshiro256StarStar {
    SeedableRng::seed_from_u64(seed)
}

/// Symmetric integer costs drawn uniformly from `1..=max_cost` (zero diagonal).
///
/// # Errors
///
/// Returns [`ModelError::InvalidCost`] if `max_cost` is below 1 and the matrix has
/// any off-diagonal entry.
pub fn random_cost_matrix<R: Rng>(
    n: usize,
    max_cost: i64,
    rng: &mut R,
) -> Result<CostMatrix<i64>, ModelError> {
    if max_cost < 1 && n > 1 {
        return Err(ModelError::InvalidCost { i: 0, j: 1 });
    }
    CostMatrix::from_fn(n, |_, _| rng.gen_range(1..=max_cost))
}

/// `n` points with coordinates drawn uniformly from `[0, max_coord)`, in canonical order.
///
/// A non-positive `max_coord` places every point at the origin.
///
/// # Errors
///
/// Returns [`ModelError::NonFiniteCoordinate`] if `max_coord` is not finite.
pub fn random_points<R: Rng>(n: usize, max_coord: f64, rng: &mut R) -> Result<PointSet, ModelError> {
    if !max_coord.is_finite() {
        return Err(ModelError::NonFiniteCoordinate { index: 0 });
    }
    let bound = max_coord.max(0.0);
    let points = (0..n)
        .map(|_| Point::new(rng.gen::<f64>() * bound, rng.gen::<f64>() * bound))
        .collect();
    PointSet::new(points)
}

/// `n` points on the x axis with integer gaps drawn from `1..=max_gap`.
///
/// Points on a line are the case where the interval solver is exact.
///
/// # Errors
///
/// Returns [`ModelError::NonFiniteCoordinate`] if the running coordinate overflows.
pub fn collinear_points<R: Rng>(n: usize, max_gap: u32, rng: &mut R) -> Result<PointSet, ModelError> {
    let mut x = 0.0;
    let points = (0..n)
        .map(|_| {
            let p = Point::new(x, 0.0);
            x += f64::from(rng.gen_range(1..=max_gap.max(1)));
            p
        })
        .collect();
    PointSet::new(points)
}
