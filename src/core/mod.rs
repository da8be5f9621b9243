//! Core data types shared by every solver.
//!
//! - [`CostMatrix`]: A validated symmetric cost table over `n` vertices
//! - [`Cost`]: The numeric cost abstraction (`i64` for exact costs, `f64` for Euclidean)
//! - [`Point`], [`PointSet`]: Planar coordinates in canonical `(x, then y)` order
//! - [`Matching`], [`Solution`]: Vertex pairings and the optimum a solver returns
//! - [`Instance`]: One input in any of the accepted shapes
//!
//! ## Invariants
//!
//! | Type | Enforced on construction |
//! |------|--------------------------|
//! | `CostMatrix` | square, symmetric, zero diagonal, finite non-negative entries |
//! | `PointSet` | finite coordinates, sorted by `(x, y)` |
//! | `Matching` | pairs normalized as `(low, high)` and sorted |
//!
//! Evenness of the vertex count is not a model invariant. Each solver checks it
//! before allocating any table.
//!
//! [`CostMatrix`]: cost::CostMatrix
//! [`Cost`]: cost::Cost
//! [`Point`]: point::Point
//! [`PointSet`]: point::PointSet
//! [`Matching`]: matching::Matching
//! [`Solution`]: matching::Solution
//! [`Instance`]: instance::Instance

pub mod cost;
pub mod instance;
pub mod matching;
pub mod point;
