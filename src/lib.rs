//! # pair-solver
//!
//! Exact minimum-weight perfect matching for small or ordered instances.
//!
//! Given an even number of vertices and a symmetric pairwise cost, a perfect matching
//! splits the vertices into disjoint pairs. `pair-solver` finds one whose total cost is
//! as small as possible, and returns both the cost and the pairs.
//!
//! ## Features
//!
//! - **Brute force**: Enumerates every pairing; the reference for tiny inputs
//! - **Bitmask DP**: Exact on arbitrary costs up to about two dozen vertices
//! - **Interval DP**: Cubic time on points in canonical order; exact on a line
//! - **Oracle adapter**: Plugs an external blossom implementation in behind a trait
//! - **Cross-validation**: Runs every applicable solver on the same input
//!
//! ## Example
//!
//! ```rust
//! use pair_solver::{CostMatrix, Instance, MatchingEngine, SolverKind};
//!
//! let costs = CostMatrix::from_rows(vec![
//!     vec![0, 1, 4, 3],
//!     vec![1, 0, 2, 5],
//!     vec![4, 2, 0, 6],
//!     vec![3, 5, 6, 0],
//! ])
//! .unwrap();
//!
//! let engine = MatchingEngine::default();
//! let report = engine
//!     .solve(&Instance::IntegerMatrix(costs), SolverKind::Auto, false)
//!     .unwrap();
//!
//! assert_eq!(report.cost.to_string(), "5");
//! assert_eq!(report.matching.pairs(), &[(0, 3), (1, 2)]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Cost matrices, points, instances, and matchings
//! - [`solver`]: The solvers, the oracle boundary, and the engine that picks between them
//! - [`parsing`]: Readers and writers for matrix, point, and JSON instance files
//! - [`generate`]: Seeded random instances
//! - [`catalog`]: Reference instances with known optimal costs
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod generate;
pub mod parsing;
pub mod solver;
pub mod utils;

// Re-export commonly used types for convenience
pub use catalog::store::{InstanceCatalog, ReferenceInstance};
pub use core::cost::{Cost, CostMatrix, ModelError};
pub use core::instance::Instance;
pub use core::matching::{Matching, Solution};
pub use core::point::{Point, PointSet};
pub use solver::oracle::{BlossomAdapter, BlossomBackend, MatchingOracle, OracleError, WeightedEdge};
pub use solver::{
    BitmaskDp, BruteForce, IntervalDp, MatchError, MatchingEngine, MatchingSolver, SolveReport,
    SolverConfig, SolverKind,
};
