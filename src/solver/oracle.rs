//! Boundary to an external blossom-contraction matcher.
//!
//! The solvers in this crate are cross-checked against an exact polynomial-time
//! general-graph matcher. That matcher is not part of this crate: it is reached through
//! [`BlossomBackend`], the shape most blossom implementations expose (maximum-weight,
//! maximum-cardinality matching over an edge list, answered with a mate vector).
//!
//! [`BlossomAdapter`] turns a [`CostMatrix`] into that shape:
//!
//! 1. Build the complete graph on `n` vertices
//! 2. Negate every cost, so a maximum-weight perfect matching is a minimum-cost one
//! 3. Run the backend and check its mate vector is a perfect matching
//! 4. Sum the original (non-negated) costs of the matched pairs
//!
//! Anything implementing [`MatchingOracle`] can stand in for the adapter in tests.

use thiserror::Error;
use tracing::debug;

use crate::core::cost::CostMatrix;
use crate::core::matching::{Matching, Solution};
use crate::solver::{MatchError, MatchingSolver};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Perfect matching requires an even number of vertices, got {0}")]
    OddVertexCount(usize),

    #[error("Oracle found no perfect matching: {unmatched} vertices left unmatched")]
    NoPerfectMatching { unmatched: usize },

    #[error("Oracle returned an inconsistent mate for vertex {vertex}")]
    InvalidMate { vertex: usize },

    #[error("Matching cost overflowed")]
    CostOverflow,
}

/// "Given a symmetric cost matrix, produce the exact minimum perfect-matching cost or fail"
pub trait MatchingOracle {
    /// # Errors
    ///
    /// Returns [`OracleError`] when no perfect matching can be produced.
    fn min_cost_perfect_matching(&self, costs: &CostMatrix<i64>) -> Result<i64, OracleError>;
}

/// An undirected weighted edge handed to a blossom backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedEdge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

/// A general-graph maximum-weight matcher
pub trait BlossomBackend {
    /// Among maximum-cardinality matchings of the graph, return one of maximum total
    /// weight as a mate vector: `mate[v] == Some(u)` when `v` is matched to `u`.
    fn max_weight_matching(&self, vertex_count: usize, edges: &[WeightedEdge]) -> Vec<Option<usize>>;
}

impl<B: BlossomBackend + ?Sized> BlossomBackend for &B {
    fn max_weight_matching(&self, vertex_count: usize, edges: &[WeightedEdge]) -> Vec<Option<usize>> {
        (**self).max_weight_matching(vertex_count, edges)
    }
}

/// Adapts a [`BlossomBackend`] to the minimum-cost perfect matching contract
#[derive(Debug, Clone)]
pub struct BlossomAdapter<B> {
    backend: B,
}

impl<B: BlossomBackend> BlossomAdapter<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Solve and return the matching the backend chose.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] for odd input, an imperfect or inconsistent mate vector,
    /// or cost overflow.
    pub fn solve_matching(&self, costs: &CostMatrix<i64>) -> Result<Solution<i64>, OracleError> {
        let n = costs.len();
        if n % 2 == 1 {
            return Err(OracleError::OddVertexCount(n));
        }

        let edges = complete_graph(costs);
        debug!(vertices = n, edges = edges.len(), "handing complete graph to blossom backend");
        let mate = self.backend.max_weight_matching(n, &edges);
        let matching = matching_from_mate(&mate, n)?;

        let cost = matching.cost(costs).ok_or(OracleError::CostOverflow)?;
        Ok(Solution { cost, matching })
    }
}

impl<B: BlossomBackend> MatchingOracle for BlossomAdapter<B> {
    fn min_cost_perfect_matching(&self, costs: &CostMatrix<i64>) -> Result<i64, OracleError> {
        self.solve_matching(costs).map(|solution| solution.cost)
    }
}

impl<B: BlossomBackend> MatchingSolver<i64> for BlossomAdapter<B> {
    fn name(&self) -> &'static str {
        "blossom-oracle"
    }

    fn solve(&self, costs: &CostMatrix<i64>) -> Result<Solution<i64>, MatchError> {
        self.solve_matching(costs).map_err(|e| match e {
            OracleError::OddVertexCount(n) => MatchError::OddVertexCount(n),
            OracleError::CostOverflow => MatchError::CostOverflow,
            other => MatchError::Oracle(other),
        })
    }
}

/// Every pair `i < j` with its negated cost
fn complete_graph(costs: &CostMatrix<i64>) -> Vec<WeightedEdge> {
    let n = costs.len();
    let mut edges = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for u in 0..n {
        for v in (u + 1)..n {
            edges.push(WeightedEdge {
                u,
                v,
                weight: -costs.get(u, v),
            });
        }
    }
    edges
}

fn matching_from_mate(mate: &[Option<usize>], n: usize) -> Result<Matching, OracleError> {
    if mate.len() != n {
        return Err(OracleError::InvalidMate {
            vertex: mate.len().min(n),
        });
    }

    let unmatched = mate.iter().filter(|m| m.is_none()).count();
    if unmatched > 0 {
        return Err(OracleError::NoPerfectMatching { unmatched });
    }

    let mut pairs = Vec::with_capacity(n / 2);
    for (vertex, partner) in mate.iter().enumerate() {
        let partner = partner.ok_or(OracleError::InvalidMate { vertex })?;
        if partner >= n || partner == vertex || mate[partner] != Some(vertex) {
            return Err(OracleError::InvalidMate { vertex });
        }
        if vertex < partner {
            pairs.push((vertex, partner));
        }
    }
    Ok(Matching::new(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed mate vector regardless of input
    struct Fixed(Vec<Option<usize>>);

    impl BlossomBackend for Fixed {
        fn max_weight_matching(&self, _: usize, _: &[WeightedEdge]) -> Vec<Option<usize>> {
            self.0.clone()
        }
    }

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
    fn test_complete_graph_negates_costs() {
        let edges = complete_graph(&example_matrix());
        assert_eq!(edges.len(), 6);
        assert_eq!(edges[0], WeightedEdge { u: 0, v: 1, weight: -1 });
        assert_eq!(edges[5], WeightedEdge { u: 2, v: 3, weight: -6 });
    }

    #[test]
    fn test_sums_original_costs() {
        let adapter = BlossomAdapter::new(Fixed(vec![Some(3), Some(2), Some(1), Some(0)]));
        assert_eq!(adapter.min_cost_perfect_matching(&example_matrix()), Ok(5));
    }

    #[test]
    fn test_reports_unmatched_vertices() {
        let adapter = BlossomAdapter::new(Fixed(vec![Some(1), Some(0), None, None]));
        assert_eq!(
            adapter.min_cost_perfect_matching(&example_matrix()),
            Err(OracleError::NoPerfectMatching { unmatched: 2 })
        );
    }

    #[test]
    fn test_rejects_inconsistent_mate() {
        let adapter = BlossomAdapter::new(Fixed(vec![Some(1), Some(2), Some(1), Some(0)]));
        assert_eq!(
            adapter.min_cost_perfect_matching(&example_matrix()),
            Err(OracleError::InvalidMate { vertex: 0 })
        );

        let short = BlossomAdapter::new(Fixed(vec![Some(1), Some(0)]));
        assert!(matches!(
            short.min_cost_perfect_matching(&example_matrix()),
            Err(OracleError::InvalidMate { .. })
        ));
    }

    #[test]
    fn test_odd_input_never_reaches_backend() {
        let adapter = BlossomAdapter::new(Fixed(Vec::new()));
        let odd = CostMatrix::from_fn(3, |_, _| 1_i64).unwrap();
        assert_eq!(
            adapter.min_cost_perfect_matching(&odd),
            Err(OracleError::OddVertexCount(3))
        );
        assert_eq!(adapter.solve(&odd), Err(MatchError::OddVertexCount(3)));
    }
}
