use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Errors raised while building the cost model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Cost matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("Cost matrix is not symmetric: cost[{i}][{j}] != cost[{j}][{i}]")]
    Asymmetric { i: usize, j: usize },

    #[error("Cost matrix has a non-zero diagonal entry at index {0}")]
    NonZeroDiagonal(usize),

    #[error("Invalid cost at [{i}][{j}]: costs must be finite and non-negative")]
    InvalidCost { i: usize, j: usize },

    #[error("Point {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    #[error("Points are not sorted by (x, y): point {index} precedes its predecessor")]
    Unsorted { index: usize },
}

/// Numeric cost carried by a [`CostMatrix`].
///
/// Implemented for `i64` (exact integer costs) and `f64` (Euclidean costs).
pub trait Cost: Copy + PartialOrd + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Additive identity, the cost of the empty matching
    const ZERO: Self;

    /// Add two costs, returning `None` when the sum cannot be represented
    fn checked_sum(self, rhs: Self) -> Option<Self>;

    /// Finite and non-negative
    fn is_valid(self) -> bool;

    fn as_f64(self) -> f64;

    /// Compare two costs. Integer costs ignore the tolerance.
    fn approx_eq(self, other: Self, tolerance: f64) -> bool;
}

impl Cost for i64 {
    const ZERO: Self = 0;

    fn checked_sum(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }

    fn is_valid(self) -> bool {
        self >= 0
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        self as f64
    }

    fn approx_eq(self, other: Self, _tolerance: f64) -> bool {
        self == other
    }
}

impl Cost for f64 {
    const ZERO: Self = 0.0;

    fn checked_sum(self, rhs: Self) -> Option<Self> {
        let sum = self + rhs;
        sum.is_finite().then_some(sum)
    }

    fn is_valid(self) -> bool {
        self.is_finite() && self >= 0.0
    }

    fn as_f64(self) -> f64 {
        self
    }

    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        let scale = self.abs().max(other.abs()).max(1.0);
        (self - other).abs() <= tolerance * scale
    }
}

/// A validated, immutable n x n cost matrix.
///
/// Invariants enforced on construction: square, symmetric, zero diagonal, and every
/// entry a valid (finite, non-negative) cost. An odd `n` is representable; evenness
/// is checked by each solver before it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix<C: Cost> {
    n: usize,
    costs: Vec<C>,
}

impl<C: Cost> CostMatrix<C> {
    /// Build a matrix from its rows.
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the rows violate any matrix invariant.
    pub fn from_rows(rows: Vec<Vec<C>>) -> Result<Self, ModelError> {
        let n = rows.len();
        let mut costs = Vec::with_capacity(n * n);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != n {
                return Err(ModelError::NotSquare {
                    row,
                    len: values.len(),
                    expected: n,
                });
            }
            costs.extend(values);
        }
        Self::from_flat(n, costs)
    }

    /// Build a matrix from a pairwise cost function evaluated on `i < j`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCost`] if the function yields an invalid cost.
    pub fn from_fn<F>(n: usize, mut cost: F) -> Result<Self, ModelError>
    where
        F: FnMut(usize, usize) -> C,
    {
        let mut costs = vec![C::ZERO; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let c = cost(i, j);
                if !c.is_valid() {
                    return Err(ModelError::InvalidCost { i, j });
                }
                costs[i * n + j] = c;
                costs[j * n + i] = c;
            }
        }
        Ok(Self { n, costs })
    }

    fn from_flat(n: usize, costs: Vec<C>) -> Result<Self, ModelError> {
        for i in 0..n {
            if costs[i * n + i] != C::ZERO {
                return Err(ModelError::NonZeroDiagonal(i));
            }
            for j in (i + 1)..n {
                let c = costs[i * n + j];
                if !c.is_valid() {
                    return Err(ModelError::InvalidCost { i, j });
                }
                if c != costs[j * n + i] {
                    return Err(ModelError::Asymmetric { i, j });
                }
            }
        }
        Ok(Self { n, costs })
    }

    /// Number of vertices
    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of pairing `i` with `j`
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> C {
        self.costs[i * self.n + j]
    }

    /// Largest off-diagonal cost, or zero for matrices with fewer than two vertices
    #[must_use]
    pub fn max_cost(&self) -> C {
        self.costs
            .iter()
            .copied()
            .fold(C::ZERO, |acc, c| if c > acc { c } else { acc })
    }

    /// Copy the matrix back out as rows
    #[must_use]
    pub fn to_rows(&self) -> Vec<Vec<C>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.costs.chunks(self.n).map(<[C]>::to_vec).collect()
    }

    /// Find a triple violating `cost(i, k) <= cost(i, j) + cost(j, k)`.
    ///
    /// Runs in O(n^3). Returns `(i, j, k)` for the first violation found.
    #[must_use]
    pub fn triangle_violation(&self, tolerance: f64) -> Option<(usize, usize, usize)> {
        let n = self.n;
        for i in 0..n {
            for k in (i + 1)..n {
                let direct = self.get(i, k).as_f64();
                for j in 0..n {
                    if j == i || j == k {
                        continue;
                    }
                    let detour = self.get(i, j).as_f64() + self.get(j, k).as_f64();
                    if direct > detour + tolerance * detour.max(1.0) {
                        return Some((i, j, k));
                    }
                }
            }
        }
        None
    }
}

impl<C: Cost> TryFrom<Vec<Vec<C>>> for CostMatrix<C> {
    type Error = ModelError;

    fn try_from(rows: Vec<Vec<C>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl<C: Cost + Serialize> Serialize for CostMatrix<C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_rows().serialize(serializer)
    }
}

impl<'de, C: Cost + Deserialize<'de>> Deserialize<'de> for CostMatrix<C> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<C>>::deserialize(deserializer)?;
        Self::from_rows(rows).map_err(D::Error::custom)
    }
}
