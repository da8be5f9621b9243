//! Parsers for matching instances stored in files.
//!
//! This module provides parsers for:
//!
//! - **Cost matrix text** (`.tsv`, `.txt`, `.csv`): one row per line
//! - **Point text** (`.tsv`, `.txt`, `.csv`): one `x y` pair per line
//! - **JSON instances** (`.json`): `{"costs": [[...]]}` or `{"points": [{"x": .., "y": ..}]}`
//!
//! Text formats ignore blank lines and `#` comments. Columns are separated by commas in
//! `.csv` files and by any whitespace otherwise.
//!
//! ## Example
//!
//! ```rust
//! use pair_solver::core::instance::Instance;
//! use pair_solver::parsing::matrix::parse_matrix_instance;
//!
//! let text = "# three pairs\n4\n0 1 4 3\n1 0 2 5\n4 2 0 6\n3 5 6 0\n";
//! let instance = parse_matrix_instance(text, None).unwrap();
//! assert!(matches!(instance, Instance::IntegerMatrix(_)));
//! assert_eq!(instance.vertex_count(), 4);
//! ```

use std::path::Path;

use thiserror::Error;

use crate::core::cost::ModelError;
use crate::core::instance::Instance;
use crate::core::point::PointSet;

pub mod json;
pub mod matrix;
pub mod points;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid instance format: {0}")]
    InvalidFormat(String),

    #[error("Invalid number on line {line}: '{token}'")]
    InvalidNumber { line: usize, token: String },

    #[error("Too many vertices: {0} exceeds maximum allowed (10000)")]
    TooManyVertices(usize),

    #[error("Invalid instance: {0}")]
    Model(#[from] ModelError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load an instance, choosing the parser from the file extension.
///
/// `.json` files carry their own shape. Text files are read as cost matrices unless
/// `as_points` is set.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or the parser's error for
/// malformed content.
pub fn load_instance(path: &Path, as_points: bool) -> Result<Instance, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    let delimiter = match ext.as_deref() {
        Some("json") => return json::parse_instance_json(&content),
        Some("csv") => Some(','),
        _ => None,
    };

    if as_points {
        let points = points::parse_points_text(&content, delimiter)?;
        Ok(Instance::Points(PointSet::new(points)?))
    } else {
        matrix::parse_matrix_instance(&content, delimiter)
    }
}
