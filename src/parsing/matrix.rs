use std::fmt::Write as _;
use std::str::FromStr;

use crate::core::cost::{Cost, CostMatrix};
use crate::core::instance::Instance;
use crate::parsing::ParseError;
use crate::utils::validation::{check_vertex_limit, is_skippable, split_fields};

/// Parse cost matrix text into a matrix of `C`.
///
/// One row per line. A first data line holding a single value is read as the
/// vertex count and must match the number of rows that follow, so a one-vertex
/// matrix is written `1` then `0`.
///
/// # Errors
///
/// Returns `ParseError::InvalidNumber` for unparsable entries,
/// `ParseError::InvalidFormat` if the declared size does not match,
/// `ParseError::TooManyVertices` if the limit is exceeded, or
/// `ParseError::Model` if the rows do not form a valid cost matrix.
pub fn parse_matrix_text<C>(text: &str, delimiter: Option<char>) -> Result<CostMatrix<C>, ParseError>
where
    C: Cost + FromStr,
{
    let mut declared: Option<usize> = None;
    let mut rows: Vec<Vec<C>> = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        if is_skippable(line) {
            continue;
        }
        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;
        let fields = split_fields(line.trim(), delimiter);

        if first_data_line {
            first_data_line = false;
            if fields.len() == 1 {
                let n = fields[0].parse::<usize>().map_err(|_| ParseError::InvalidNumber {
                    line: line_num,
                    token: fields[0].to_string(),
                })?;
                declared = Some(n);
                continue;
            }
        }

        if check_vertex_limit(rows.len()).is_some() {
            return Err(ParseError::TooManyVertices(rows.len()));
        }

        let row = fields
            .iter()
            .map(|token| {
                token.parse::<C>().map_err(|_| ParseError::InvalidNumber {
                    line: line_num,
                    token: (*token).to_string(),
                })
            })
            .collect::<Result<Vec<C>, _>>()?;
        rows.push(row);
    }

    if let Some(n) = declared {
        if n != rows.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Header declares {n} vertices but {} rows follow",
                rows.len()
            )));
        }
    } else if rows.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No matrix rows found (write 0 for an empty instance)".to_string(),
        ));
    }

    Ok(CostMatrix::from_rows(rows)?)
}

/// Parse matrix text as integer costs when every entry is an integer, otherwise as real costs.
///
/// # Errors
///
/// Returns the same errors as [`parse_matrix_text`].
pub fn parse_matrix_instance(text: &str, delimiter: Option<char>) -> Result<Instance, ParseError> {
    match parse_matrix_text::<i64>(text, delimiter) {
        Ok(matrix) => Ok(Instance::IntegerMatrix(matrix)),
        Err(ParseError::InvalidNumber { .. }) => {
            Ok(Instance::RealMatrix(parse_matrix_text::<f64>(text, delimiter)?))
        }
        Err(e) => Err(e),
    }
}

/// Write a matrix in the layout [`parse_matrix_text`] reads: size line, then rows.
#[must_use]
pub fn format_matrix<C: Cost>(matrix: &CostMatrix<C>, delimiter: char) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", matrix.len());
    for row in matrix.to_rows() {
        let line = row
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(&delimiter.to_string());
        let _ = writeln!(out, "{line}");
    }
    out
}
