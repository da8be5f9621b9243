//! Subset dynamic programming, exact for any symmetric cost matrix.
//!
//! `dp[mask]` is the cheapest way to match exactly the vertices whose bits are set in
//! `mask`. Masks are visited in increasing numeric order; from each reached mask the
//! lowest unmatched vertex `i` is paired with every unmatched `j > i`. Always pairing
//! the lowest unmatched vertex means each matching is built by exactly one sequence
//! of transitions.

use tracing::debug;

use crate::core::cost::{Cost, CostMatrix};
use crate::core::matching::{Matching, Solution};
use crate::solver::{check_size, MatchError, MatchingSolver};
use crate::utils::validation::{BITMASK_HARD_LIMIT, DEFAULT_BITMASK_LIMIT};

/// Bitmask DP solver with a configurable vertex ceiling.
///
/// Memory is `2^n` table entries plus two bytes of back-pointer per entry, so the
/// default ceiling of 24 vertices needs roughly 300 MB for `i64` costs.
#[derive(Debug, Clone, Copy)]
pub struct BitmaskDp {
    max_vertices: usize,
}

impl Default for BitmaskDp {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_BITMASK_LIMIT,
        }
    }
}

impl BitmaskDp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ceiling, clamped to the widest mask the back-pointer table can index.
    #[must_use]
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices.min(BITMASK_HARD_LIMIT);
        self
    }

    #[must_use]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }
}

/// Pair added by the transition that last improved a mask
type Step = [u8; 2];

impl<C: Cost> MatchingSolver<C> for BitmaskDp {
    fn name(&self) -> &'static str {
        "bitmask-dp"
    }

    // Vertex indices fit in u8: `max_vertices` never exceeds BITMASK_HARD_LIMIT
    #[allow(clippy::cast_possible_truncation)]
    fn solve(&self, costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError> {
        let n = costs.len();
        check_size(MatchingSolver::<C>::name(self), n, self.max_vertices)?;
        if n == 0 {
            return Ok(Solution::empty());
        }

        let full = (1_usize << n) - 1;
        let mut dp: Vec<Option<C>> = vec![None; full + 1];
        let mut step: Vec<Step> = vec![[0, 0]; full + 1];
        dp[0] = Some(C::ZERO);

        debug!(vertices = n, states = full + 1, "bitmask dp table allocated");

        for mask in 0..full {
            let Some(base) = dp[mask] else {
                continue;
            };
            let i = (!mask).trailing_zeros() as usize;
            for j in (i + 1)..n {
                if mask & (1 << j) != 0 {
                    continue;
                }
                let next = mask | (1 << i) | (1 << j);
                let candidate = base
                    .checked_sum(costs.get(i, j))
                    .ok_or(MatchError::CostOverflow)?;
                if dp[next].map_or(true, |current| candidate < current) {
                    dp[next] = Some(candidate);
                    step[next] = [i as u8, j as u8];
                }
            }
        }

        let cost = dp[full].ok_or(MatchError::Unreached)?;
        let matching = reconstruct(&step, full, n);
        Ok(Solution { cost, matching })
    }
}

fn reconstruct(step: &[Step], full: usize, n: usize) -> Matching {
    let mut pairs = Vec::with_capacity(n / 2);
    let mut mask = full;
    while mask != 0 {
        let [i, j] = step[mask];
        pairs.push((usize::from(i), usize::from(j)));
        mask &= !((1 << i) | (1 << j));
    }
    Matching::new(pairs)
}
