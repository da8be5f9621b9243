use serde::{Deserialize, Serialize};

use crate::core::cost::CostMatrix;
use crate::core::instance::Instance;
use crate::core::point::{Point, PointSet};
use crate::parsing::ParseError;
use crate::utils::validation::MAX_VERTICES;

/// The JSON shape of an instance: exactly one of `costs` or `points`.
///
/// Shared by instance files and catalog entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub costs: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
}

impl InstanceData {
    /// Build the instance, reading `costs` as integers when every entry is an integer.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` unless exactly one field is set,
    /// `ParseError::TooManyVertices` above the vertex limit, or
    /// `ParseError::Json`/`ParseError::Model` for invalid contents.
    pub fn into_instance(self) -> Result<Instance, ParseError> {
        match (self.costs, self.points) {
            (Some(costs), None) => {
                if let Some(rows) = costs.as_array() {
                    if rows.len() > MAX_VERTICES {
                        return Err(ParseError::TooManyVertices(rows.len()));
                    }
                }
                match serde_json::from_value::<CostMatrix<i64>>(costs.clone()) {
                    Ok(m) => Ok(Instance::IntegerMatrix(m)),
                    Err(_) => Ok(Instance::RealMatrix(serde_json::from_value(costs)?)),
                }
            }
            (None, Some(points)) => {
                if points.len() > MAX_VERTICES {
                    return Err(ParseError::TooManyVertices(points.len()));
                }
                Ok(Instance::Points(PointSet::new(points)?))
            }
            (Some(_), Some(_)) => Err(ParseError::InvalidFormat(
                "Instance has both 'costs' and 'points'".to_string(),
            )),
            (None, None) => Err(ParseError::InvalidFormat(
                "Instance needs 'costs' or 'points'".to_string(),
            )),
        }
    }
}

impl From<&Instance> for InstanceData {
    fn from(instance: &Instance) -> Self {
        match instance {
            Instance::IntegerMatrix(m) => Self {
                costs: Some(serde_json::json!(m.to_rows())),
                points: None,
            },
            Instance::RealMatrix(m) => Self {
                costs: Some(serde_json::json!(m.to_rows())),
                points: None,
            },
            Instance::Points(p) => Self {
                costs: None,
                points: Some(p.points().to_vec()),
            },
        }
    }
}

/// Parse a JSON instance document.
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON, or the errors of
/// [`InstanceData::into_instance`].
pub fn parse_instance_json(content: &str) -> Result<Instance, ParseError> {
    let data: InstanceData = serde_json::from_str(content)?;
    data.into_instance()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cost::ModelError;

    #[test]
    fn test_integer_costs() {
        let instance = parse_instance_json(r#"{"costs": [[0, 4], [4, 0]]}"#).unwrap();
        match instance {
            Instance::IntegerMatrix(m) => assert_eq!(m.get(0, 1), 4),
            other => panic!("unexpected instance: {other:?}"),
        }
    }

    #[test]
    fn test_real_costs() {
        let instance = parse_instance_json(r#"{"costs": [[0, 0.5], [0.5, 0]]}"#).unwrap();
        assert!(matches!(instance, Instance::RealMatrix(_)));
    }

    #[test]
    fn test_points_are_sorted() {
        let instance =
            parse_instance_json(r#"{"points": [{"x": 2, "y": 0}, {"x": 0, "y": 0}]}"#).unwrap();
        match instance {
            Instance::Points(p) => assert_eq!(p.points()[0], Point::new(0.0, 0.0)),
            other => panic!("unexpected instance: {other:?}"),
        }
    }

    #[test]
    fn test_exactly_one_shape() {
        assert!(matches!(
            parse_instance_json("{}"),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_instance_json(r#"{"costs": [], "points": []}"#),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_invalid_matrix() {
        let err = parse_instance_json(r#"{"costs": [[0, 1], [1]]}"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
        assert!(parse_instance_json("not json").is_err());
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let data = InstanceData {
            costs: None,
            points: Some(vec![Point::new(f64::NAN, 0.0)]),
        };
        assert!(matches!(
            data.into_instance(),
            Err(ParseError::Model(ModelError::NonFiniteCoordinate { .. }))
        ));
    }

    #[test]
    fn test_from_instance() {
        let instance = parse_instance_json(r#"{"costs": [[0, 4], [4, 0]]}"#).unwrap();
        let data = InstanceData::from(&instance);
        assert_eq!(data.into_instance().unwrap(), instance);
    }
}
