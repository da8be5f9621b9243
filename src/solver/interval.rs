//! Interval dynamic programming over vertices in a fixed order.
//!
//! `dp[l][r]` is the cheapest perfect matching of the contiguous index range `[l, r]`
//! (only even-sized ranges). The leftmost vertex `l` is paired with some `k` in
//! `l + 1, l + 3, ..., r`, which splits the rest into the independent ranges
//! `[l + 1, k - 1]` and `[k + 1, r]`, both even-sized:
//!
//! ```text
//! dp[l][r] = min over k of  cost(l, k) + dp[l + 1][k - 1] + dp[k + 1][r]
//! ```
//!
//! with empty ranges costing zero. Ranges are filled by increasing length, giving
//! O(n^3) time and O(n^2) space.
//!
//! ## Precondition
//!
//! The recurrence only considers matchings whose pairs nest or sit side by side in
//! the given order. It is optimal when some minimum matching has that shape, which
//! the no-crossing property of metric matchings guarantees for collinear points.
//! Sorting planar points by `(x, y)` is the consistent order used for the plane; there
//! the result is always a valid perfect matching and never below the true optimum.
//! Point input must be sorted; matrix input can optionally be checked for the
//! triangle inequality.

use tracing::{debug, warn};

use crate::core::cost::{Cost, CostMatrix};
use crate::core::matching::{Matching, Solution};
use crate::core::point::{Point, PointSet};
use crate::solver::{check_size, MatchError, MatchingSolver};
use crate::utils::validation::DEFAULT_INTERVAL_LIMIT;

const NAME: &str = "interval-dp";

/// Interval DP solver
#[derive(Debug, Clone, Copy)]
pub struct IntervalDp {
    max_vertices: usize,
    check_metric: bool,
    tolerance: f64,
}

impl Default for IntervalDp {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_INTERVAL_LIMIT,
            check_metric: false,
            tolerance: 1e-9,
        }
    }
}

impl IntervalDp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    /// Verify the triangle inequality on matrix input before solving (an extra O(n^3) pass)
    #[must_use]
    pub fn with_metric_check(mut self, check_metric: bool, tolerance: f64) -> Self {
        self.check_metric = check_metric;
        self.tolerance = tolerance;
        self
    }

    /// Solve a point set under Euclidean distance.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::OddVertexCount`] or [`MatchError::TooManyVertices`] before
    /// any distance is computed.
    pub fn solve_points(&self, points: &PointSet) -> Result<Solution<f64>, MatchError> {
        check_size(NAME, points.len(), self.max_vertices)?;
        let distances = points.distance_matrix()?;
        solve_ordered(&distances)
    }

    /// Solve points the caller claims are already in `(x, y)` order.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Model`] wrapping `ModelError::Unsorted` if they are not,
    /// plus every error of [`IntervalDp::solve_points`].
    pub fn solve_sorted(&self, points: &[Point]) -> Result<Solution<f64>, MatchError> {
        check_size(NAME, points.len(), self.max_vertices)?;
        let set = PointSet::from_sorted(points.to_vec())?;
        self.solve_points(&set)
    }
}

impl<C: Cost> MatchingSolver<C> for IntervalDp {
    fn name(&self) -> &'static str {
        NAME
    }

    fn solve(&self, costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError> {
        check_size(NAME, costs.len(), self.max_vertices)?;
        if self.check_metric {
            if let Some((i, j, k)) = costs.triangle_violation(self.tolerance) {
                return Err(MatchError::NotMetric { i, j, k });
            }
        } else {
            warn!("interval dp on matrix input without a triangle inequality check");
        }
        solve_ordered(costs)
    }
}

fn solve_ordered<C: Cost>(costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError> {
    let n = costs.len();
    if n == 0 {
        return Ok(Solution::empty());
    }

    // Every even-length range is filled before any longer range reads it, so the
    // tables need no "unset" marker.
    let mut dp: Vec<C> = vec![C::ZERO; n * n];
    let mut partner: Vec<usize> = vec![0; n * n];
    let range = |dp: &[C], l: usize, r: usize| if l > r { C::ZERO } else { dp[l * n + r] };

    debug!(vertices = n, cells = n * n, "interval dp table allocated");

    for len in (2..=n).step_by(2) {
        for l in 0..=(n - len) {
            let r = l + len - 1;
            let mut best: Option<(C, usize)> = None;
            for k in ((l + 1)..=r).step_by(2) {
                let candidate = costs
                    .get(l, k)
                    .checked_sum(range(&dp, l + 1, k - 1))
                    .and_then(|c| c.checked_sum(range(&dp, k + 1, r)))
                    .ok_or(MatchError::CostOverflow)?;
                if best.map_or(true, |(cost, _)| candidate < cost) {
                    best = Some((candidate, k));
                }
            }
            let (cost, k) = best.ok_or(MatchError::Unreached)?;
            dp[l * n + r] = cost;
            partner[l * n + r] = k;
        }
    }

    let matching = reconstruct(&partner, n);
    Ok(Solution {
        cost: dp[n - 1],
        matching,
    })
}

fn reconstruct(partner: &[usize], n: usize) -> Matching {
    let mut pairs = Vec::with_capacity(n / 2);
    let mut ranges = vec![(0, n - 1)];
    while let Some((l, r)) = ranges.pop() {
        let k = partner[l * n + r];
        pairs.push((l, k));
        if k > l + 1 {
            ranges.push((l + 1, k - 1));
        }
        if k < r {
            ranges.push((k + 1, r));
        }
    }
    Matching::new(pairs)
}
