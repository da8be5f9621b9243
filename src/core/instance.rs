use serde::{Deserialize, Serialize};

use crate::core::cost::CostMatrix;
use crate::core::point::PointSet;

/// A matching problem in one of the shapes the solvers accept
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instance {
    /// Arbitrary symmetric integer costs
    IntegerMatrix(CostMatrix<i64>),
    /// Arbitrary symmetric real costs
    RealMatrix(CostMatrix<f64>),
    /// Planar points with Euclidean costs
    Points(PointSet),
}

impl Instance {
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        match self {
            Self::IntegerMatrix(m) => m.len(),
            Self::RealMatrix(m) => m.len(),
            Self::Points(p) => p.len(),
        }
    }

    /// Short label for output
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IntegerMatrix(_) => "integer_matrix",
            Self::RealMatrix(_) => "real_matrix",
            Self::Points(_) => "points",
        }
    }
}

impl From<CostMatrix<i64>> for Instance {
    fn from(m: CostMatrix<i64>) -> Self {
        Self::IntegerMatrix(m)
    }
}

impl From<CostMatrix<f64>> for Instance {
    fn from(m: CostMatrix<f64>) -> Self {
        Self::RealMatrix(m)
    }
}

impl From<PointSet> for Instance {
    fn from(p: PointSet) -> Self {
        Self::Points(p)
    }
}
