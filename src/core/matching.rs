use serde::{Deserialize, Serialize};

use crate::core::cost::{Cost, CostMatrix};

/// A set of disjoint vertex pairs.
///
/// Pairs are stored normalized: the smaller index first, sorted by that index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matching {
    pairs: Vec<(usize, usize)>,
}

impl Matching {
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut pairs: Vec<(usize, usize)> = pairs
            .into_iter()
            .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
            .collect();
        pairs.sort_unstable();
        Self { pairs }
    }

    #[must_use]
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// True if every index in `0..n` appears in exactly one pair
    #[must_use]
    pub fn is_perfect(&self, n: usize) -> bool {
        if self.pairs.len() * 2 != n {
            return false;
        }
        let mut seen = vec![false; n];
        for &(a, b) in &self.pairs {
            if a == b || a >= n || b >= n || seen[a] || seen[b] {
                return false;
            }
            seen[a] = true;
            seen[b] = true;
        }
        true
    }

    /// The vertex paired with `vertex`, if any
    #[must_use]
    pub fn partner_of(&self, vertex: usize) -> Option<usize> {
        self.pairs.iter().find_map(|&(a, b)| {
            if a == vertex {
                Some(b)
            } else if b == vertex {
                Some(a)
            } else {
                None
            }
        })
    }

    /// Total cost of the pairs under `costs`, or `None` on overflow or out-of-range indices
    #[must_use]
    pub fn cost<C: Cost>(&self, costs: &CostMatrix<C>) -> Option<C> {
        self.pairs.iter().try_fold(C::ZERO, |acc, &(a, b)| {
            if a >= costs.len() || b >= costs.len() {
                return None;
            }
            acc.checked_sum(costs.get(a, b))
        })
    }
}

/// The optimum found by a solver: its cost and a matching that achieves it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution<C: Cost> {
    pub cost: C,
    pub matching: Matching,
}

impl<C: Cost> Solution<C> {
    /// The empty matching of zero vertices
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cost: C::ZERO,
            matching: Matching::default(),
        }
    }
}
