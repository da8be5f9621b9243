//! Exhaustive enumeration, the correctness baseline for tiny inputs.
//!
//! Vertex 0 is pinned to the first slot and every permutation of the remaining
//! `n - 1` vertices is read as consecutive pairs `(p[0], p[1]), (p[2], p[3]), ...`.
//! Pinning cuts the enumeration from `n!` to `(n - 1)!` sequences. Pair order and
//! the order inside a pair still repeat, so this is far above the `(n - 1)!!`
//! distinct matchings, but it needs no deduplication state.

use tracing::debug;

use crate::core::cost::{Cost, CostMatrix};
use crate::core::matching::{Matching, Solution};
use crate::solver::{check_size, MatchError, MatchingSolver};
use crate::utils::validation::DEFAULT_BRUTE_FORCE_LIMIT;

/// Brute-force enumerator with a configurable vertex ceiling
#[derive(Debug, Clone, Copy)]
pub struct BruteForce {
    max_vertices: usize,
}

impl Default for BruteForce {
    fn default() -> Self {
        Self {
            max_vertices: DEFAULT_BRUTE_FORCE_LIMIT,
        }
    }
}

impl BruteForce {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise or lower the ceiling. Running time grows as `(n - 1)!`.
    #[must_use]
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices;
        self
    }

    #[must_use]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }
}

impl<C: Cost> MatchingSolver<C> for BruteForce {
    fn name(&self) -> &'static str {
        "brute-force"
    }

    fn solve(&self, costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError> {
        let n = costs.len();
        check_size(MatchingSolver::<C>::name(self), n, self.max_vertices)?;
        if n == 0 {
            return Ok(Solution::empty());
        }

        let mut order: Vec<usize> = (0..n).collect();
        let mut best: Option<(C, Vec<usize>)> = None;
        let mut visited: u64 = 0;

        loop {
            visited += 1;
            let total = order
                .chunks_exact(2)
                .try_fold(C::ZERO, |acc, pair| acc.checked_sum(costs.get(pair[0], pair[1])))
                .ok_or(MatchError::CostOverflow)?;

            let improves = best.as_ref().map_or(true, |(cost, _)| total < *cost);
            if improves {
                best = Some((total, order.clone()));
            }

            if !next_permutation(&mut order[1..]) {
                break;
            }
        }

        debug!(vertices = n, sequences = visited, "brute-force enumeration finished");

        let (cost, order) = best.ok_or(MatchError::Unreached)?;
        let matching = Matching::new(order.chunks_exact(2).map(|pair| (pair[0], pair[1])));
        Ok(Solution { cost, matching })
    }
}

/// Advance `items` to the next lexicographic permutation.
///
/// Returns `false` once the last permutation has been passed, leaving `items`
/// back in ascending order.
fn next_permutation(items: &mut [usize]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(pivot) = items.windows(2).rposition(|w| w[0] < w[1]) else {
        items.reverse();
        return false;
    };
    let successor = items
        .iter()
        .rposition(|&x| x > items[pivot])
        .unwrap_or(pivot + 1);
    items.swap(pivot, successor);
    items[pivot + 1..].reverse();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_matrix() -> CostMatrix<i64> {
        CostMatrix::from_rows(vec![
            vec![0, 1, 4, 3],
            vec![1, 0, 2, 5],
            vec![4, 2, 0, 6],
            vec![3, 5, 6, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_next_permutation_counts() {
        let mut items = vec![1, 2, 3, 4];
        let mut count = 1;
        while next_permutation(&mut items) {
            count += 1;
        }
        assert_eq!(count, 24);
        assert_eq!(items, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_next_permutation_order() {
        let mut items = vec![1, 3, 2];
        assert!(next_permutation(&mut items));
        assert_eq!(items, vec![2, 1, 3]);
    }

    #[test]
    fn test_example_matrix() {
        let solution = BruteForce::new().solve(&example_matrix()).unwrap();
        assert_eq!(solution.cost, 5);
        assert_eq!(solution.matching.pairs(), &[(0, 3), (1, 2)]);
    }

    #[test]
    fn test_empty_and_single_pair() {
        let empty = CostMatrix::<i64>::from_rows(Vec::new()).unwrap();
        let solution = BruteForce::new().solve(&empty).unwrap();
        assert_eq!(solution.cost, 0);
        assert!(solution.matching.is_empty());

        let pair = CostMatrix::from_rows(vec![vec![0, 7], vec![7, 0]]).unwrap();
        assert_eq!(BruteForce::new().solve(&pair).unwrap().cost, 7);
    }

    #[test]
    fn test_odd_vertex_count() {
        let odd = CostMatrix::from_rows(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]).unwrap();
        assert_eq!(
            BruteForce::new().solve(&odd),
            Err(MatchError::OddVertexCount(3))
        );
    }

    #[test]
    fn test_ceiling() {
        let costs = example_matrix();
        let err = BruteForce::new().with_max_vertices(2).solve(&costs).unwrap_err();
        assert_eq!(
            err,
            MatchError::TooManyVertices {
                solver: "brute-force",
                vertices: 4,
                limit: 2
            }
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let big = i64::MAX / 2 + 1;
        let costs = CostMatrix::from_fn(4, |_, _| big).unwrap();
        assert_eq!(
            BruteForce::new().solve(&costs),
            Err(MatchError::CostOverflow)
        );
    }
}
