use std::fmt::Write as _;

use crate::core::point::{Point, PointSet};
use crate::parsing::ParseError;
use crate::utils::validation::{check_vertex_limit, is_skippable, split_fields};

/// Parse point text: one `x y` pair per line.
///
/// A first data line whose leading field is not a number is treated as a column
/// header and skipped. Points are returned in file order; build a [`PointSet`] to sort them.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` for lines without exactly two fields,
/// `ParseError::InvalidNumber` for unparsable coordinates, or
/// `ParseError::TooManyVertices` if the limit is exceeded.
pub fn parse_points_text(text: &str, delimiter: Option<char>) -> Result<Vec<Point>, ParseError> {
    let mut points = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        if is_skippable(line) {
            continue;
        }
        let line_num = i + 1;
        let fields = split_fields(line.trim(), delimiter);

        if first_data_line {
            first_data_line = false;
            if fields.first().is_some_and(|f| f.parse::<f64>().is_err()) {
                continue;
            }
        }

        if fields.len() != 2 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num}: expected 2 coordinates, found {}",
                fields.len()
            )));
        }

        if check_vertex_limit(points.len()).is_some() {
            return Err(ParseError::TooManyVertices(points.len()));
        }

        let coord = |token: &str| {
            token.parse::<f64>().map_err(|_| ParseError::InvalidNumber {
                line: line_num,
                token: token.to_string(),
            })
        };
        points.push(Point::new(coord(fields[0])?, coord(fields[1])?));
    }

    Ok(points)
}

/// Write points with an `x`/`y` header, in the order of the set.
#[must_use]
pub fn format_points(points: &PointSet, delimiter: char) -> String {
    let mut out = format!("x{delimiter}y\n");
    for p in points.points() {
        let _ = writeln!(out, "{}{delimiter}{}", p.x, p.y);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_header() {
        let points = parse_points_text("x\ty\n0\t0\n1.5\t2\n", None).unwrap();
        assert_eq!(points, vec![Point::new(0.0, 0.0), Point::new(1.5, 2.0)]);
    }

    #[test]
    fn test_parse_csv_keeps_file_order() {
        let points = parse_points_text("# pts\n3,1\n1,2\n", Some(',')).unwrap();
        assert_eq!(points[0], Point::new(3.0, 1.0));
        assert_eq!(points[1], Point::new(1.0, 2.0));
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_points_text("1 2 3\n", None).unwrap_err();
        assert!(matches!(err, ParseError::InvalidFormat(_)));
    }

    #[test]
    fn test_invalid_coordinate() {
        let err = parse_points_text("0 0\n1 y\n", None).unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 2, .. }));
    }

    #[test]
    fn test_empty_text() {
        assert!(parse_points_text("", None).unwrap().is_empty());
    }

    #[test]
    fn test_format_sorted() {
        let set = PointSet::new(vec![Point::new(2.0, 0.0), Point::new(0.0, 1.0)]).unwrap();
        assert_eq!(format_points(&set, '\t'), "x\ty\n0\t1\n2\t0\n");
        let reparsed = parse_points_text(&format_points(&set, ','), Some(',')).unwrap();
        assert_eq!(reparsed, set.points());
    }
}
