use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::core::cost::{CostMatrix, ModelError};

/// A point in the plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`
    #[must_use]
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Canonical order: by x, then by y
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Point) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Points held in canonical `(x, then y)` order.
///
/// The interval solver's optimality argument depends on this order, so the only
/// ways to build a `PointSet` either sort the input or verify it is already sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PointSet {
    points: Vec<Point>,
}

impl PointSet {
    /// Sort `points` into canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::NonFiniteCoordinate`] if any coordinate is NaN or infinite.
    pub fn new(mut points: Vec<Point>) -> Result<Self, ModelError> {
        check_finite(&points)?;
        points.sort_by(Point::lexicographic_cmp);
        Ok(Self { points })
    }

    /// Accept points that are already in canonical order.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Unsorted`] naming the first out-of-order point, or
    /// [`ModelError::NonFiniteCoordinate`] for NaN or infinite coordinates.
    pub fn from_sorted(points: Vec<Point>) -> Result<Self, ModelError> {
        check_finite(&points)?;
        if let Some(index) = first_unsorted(&points) {
            return Err(ModelError::Unsorted { index });
        }
        Ok(Self { points })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// True when every point lies on one straight line.
    ///
    /// Sorted collinear points are in line order, where the interval solver is exact.
    #[must_use]
    pub fn is_collinear(&self) -> bool {
        let Some(a) = self.points.first() else {
            return true;
        };
        let Some(b) = self.points.iter().find(|p| *p != a) else {
            return true;
        };
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        self.points.iter().all(|p| {
            let (px, py) = (p.x - a.x, p.y - a.y);
            let cross = dx * py - dy * px;
            cross.abs() <= 1e-12 * ((dx * py).abs() + (dy * px).abs())
        })
    }

    /// Pairwise Euclidean distances
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCost`] if a distance overflows to infinity.
    pub fn distance_matrix(&self) -> Result<CostMatrix<f64>, ModelError> {
        let points = &self.points;
        CostMatrix::from_fn(points.len(), |i, j| points[i].distance(&points[j]))
    }

    /// Pairwise distances multiplied by `scale` and truncated toward zero.
    ///
    /// Truncation breaks the triangle inequality by at most one unit per edge, so the
    /// resulting matrix suits the integer solvers rather than the interval solver.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidCost`] if `scale` is negative or not finite.
    #[allow(clippy::cast_possible_truncation)]
    pub fn integer_distance_matrix(&self, scale: f64) -> Result<CostMatrix<i64>, ModelError> {
        let points = &self.points;
        let valid_scale = scale.is_finite() && scale >= 0.0;
        CostMatrix::from_fn(points.len(), |i, j| {
            if valid_scale {
                (points[i].distance(&points[j]) * scale).trunc() as i64
            } else {
                -1
            }
        })
    }
}

impl<'de> Deserialize<'de> for PointSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let points = Vec::<Point>::deserialize(deserializer)?;
        Self::new(points).map_err(serde::de::Error::custom)
    }
}

fn check_finite(points: &[Point]) -> Result<(), ModelError> {
    match points.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(ModelError::NonFiniteCoordinate { index }),
        None => Ok(()),
    }
}

fn first_unsorted(points: &[Point]) -> Option<usize> {
    points
        .windows(2)
        .position(|w| w[0].lexicographic_cmp(&w[1]) == Ordering::Greater)
        .map(|i| i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_collinear() {
        let line = |pts: &[(f64, f64)]| {
            PointSet::new(pts.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
        };
        assert!(line(&[]).is_collinear());
        assert!(line(&[(1.0, 1.0), (1.0, 1.0)]).is_collinear());
        assert!(line(&[(0.0, 0.0), (5.0, 0.0), (2.0, 0.0)]).is_collinear());
        assert!(line(&[(0.0, 0.0), (1.0, 2.0), (3.0, 6.0)]).is_collinear());
        assert!(!line(&[(0.0, 0.0), (1.0, 10.0), (2.0, 0.0), (3.0, 10.0)]).is_collinear());
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_new_sorts_lexicographically() {
        let set = PointSet::new(vec![
            Point::new(1.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap();
        assert_eq!(
            set.points(),
            &[
                Point::new(0.0, 1.0),
                Point::new(0.0, 2.0),
                Point::new(1.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_from_sorted_rejects_unsorted() {
        let err = PointSet::from_sorted(vec![
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(1.0, 5.0),
        ])
        .unwrap_err();
        assert_eq!(err, ModelError::Unsorted { index: 2 });

        // Equal x, descending y
        let err = PointSet::from_sorted(vec![Point::new(0.0, 1.0), Point::new(0.0, 0.0)])
            .unwrap_err();
        assert_eq!(err, ModelError::Unsorted { index: 1 });
    }

    #[test]
    fn test_rejects_non_finite() {
        let err = PointSet::new(vec![Point::new(0.0, 0.0), Point::new(f64::NAN, 1.0)]).unwrap_err();
        assert_eq!(err, ModelError::NonFiniteCoordinate { index: 1 });
    }

    #[test]
    fn test_distance_matrices() {
        let set = PointSet::new(vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)]).unwrap();
        let real = set.distance_matrix().unwrap();
        assert!((real.get(0, 1) - 5.0).abs() < 1e-12);

        let scaled = set.integer_distance_matrix(10.5).unwrap();
        assert!(set.integer_distance_matrix(-1.0).is_err());
        assert_eq!(scaled.get(0, 1), 52);
        assert_eq!(scaled.get(1, 0), 52);
    }

    #[test]
    fn test_deserialize_sorts() {
        let set: PointSet =
            serde_json::from_str(r#"[{"x": 2.0, "y": 0.0}, {"x": 1.0, "y": 0.0}]"#).unwrap();
        assert_eq!(set.points()[0], Point::new(1.0, 0.0));
    }
}
