//! Exact minimum-weight perfect matching solvers.
//!
//! Every solver returns the same optimum on inputs that satisfy its assumptions;
//! they differ in the assumptions they need and in how far they scale:
//!
//! | Solver | Input | Time | Practical ceiling |
//! |--------|-------|------|-------------------|
//! | [`BruteForce`] | any symmetric matrix | O((n-1)! n) | 12 vertices |
//! | [`BitmaskDp`] | any symmetric matrix | O(2^n n) | 24 vertices |
//! | [`IntervalDp`] | metric costs in a consistent order (sorted points) | O(n^3) | thousands |
//!
//! The [`oracle`] module defines the boundary to an external blossom implementation,
//! used only to cross-check the solvers above.
//!
//! ## Failure signal
//!
//! Solvers never return a partially computed number. Odd vertex counts, inputs beyond a
//! solver's configured ceiling, and unsorted points are all reported as [`MatchError`]
//! before any table is allocated.
//!
//! ## Example
//!
//! ```rust
//! use pair_solver::core::cost::CostMatrix;
//! use pair_solver::solver::{BitmaskDp, MatchingSolver};
//!
//! let costs = CostMatrix::from_rows(vec![
//!     vec![0, 1, 4, 3],
//!     vec![1, 0, 2, 5],
//!     vec![4, 2, 0, 6],
//!     vec![3, 5, 6, 0],
//! ])
//! .unwrap();
//!
//! let solution = BitmaskDp::default().solve(&costs).unwrap();
//! assert_eq!(solution.cost, 5);
//! assert_eq!(solution.matching.pairs(), &[(0, 3), (1, 2)]);
//! ```
//!
//! [`BruteForce`]: brute_force::BruteForce
//! [`BitmaskDp`]: bitmask::BitmaskDp
//! [`IntervalDp`]: interval::IntervalDp

use thiserror::Error;

use crate::core::cost::{Cost, CostMatrix, ModelError};
use crate::core::matching::Solution;
use crate::solver::oracle::OracleError;

pub mod bitmask;
pub mod brute_force;
pub mod engine;
pub mod interval;
pub mod oracle;

pub use bitmask::BitmaskDp;
pub use brute_force::BruteForce;
pub use engine::{MatchingEngine, SolveReport, SolverConfig, SolverKind};
pub use interval::IntervalDp;

/// Reasons a solver refuses or fails to produce an optimum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Perfect matching requires an even number of vertices, got {0}")]
    OddVertexCount(usize),

    #[error("{solver} supports at most {limit} vertices, got {vertices}")]
    TooManyVertices {
        solver: &'static str,
        vertices: usize,
        limit: usize,
    },

    #[error("Costs violate the triangle inequality: cost({i}, {k}) > cost({i}, {j}) + cost({j}, {k})")]
    NotMetric { i: usize, j: usize, k: usize },

    #[error("Matching cost overflowed the cost type")]
    CostOverflow,

    #[error("Full vertex set was never reached; this is a solver defect")]
    Unreached,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// A solver consuming a validated cost matrix
pub trait MatchingSolver<C: Cost> {
    /// Human-readable solver name used in errors and logs
    fn name(&self) -> &'static str;

    /// Compute a minimum-cost perfect matching over every vertex of `costs`.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError`] if a precondition of the solver does not hold.
    fn solve(&self, costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError>;
}

/// Shared precondition: even vertex count within `limit`
pub(crate) fn check_size(solver: &'static str, n: usize, limit: usize) -> Result<(), MatchError> {
    if n % 2 == 1 {
        return Err(MatchError::OddVertexCount(n));
    }
    if n > limit {
        return Err(MatchError::TooManyVertices {
            solver,
            vertices: n,
            limit,
        });
    }
    Ok(())
}
