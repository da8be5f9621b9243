//! Centralized limits and input checks.

/// Maximum number of vertices accepted from a single input file (DOS protection)
pub const MAX_VERTICES: usize = 10_000;

/// Brute force enumerates `(n - 1)!` sequences: 11! is about 40 million
pub const DEFAULT_BRUTE_FORCE_LIMIT: usize = 12;

/// Bitmask DP allocates `2^n` states
pub const DEFAULT_BITMASK_LIMIT: usize = 24;

/// Widest state mask the bitmask DP will ever allocate, regardless of configuration
pub const BITMASK_HARD_LIMIT: usize = 30;

/// Interval DP allocates `n^2` cells and runs in `n^3`
pub const DEFAULT_INTERVAL_LIMIT: usize = 4096;

/// Relative tolerance for comparing real-valued costs
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Check if adding another vertex would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new vertex.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```
/// use pair_solver::utils::validation::{check_vertex_limit, MAX_VERTICES};
///
/// assert!(check_vertex_limit(0).is_none());
/// assert!(check_vertex_limit(MAX_VERTICES).is_some());
/// ```
#[must_use]
pub fn check_vertex_limit(count: usize) -> Option<String> {
    if count >= MAX_VERTICES {
        Some(format!(
            "Too many vertices: adding another would exceed maximum of {MAX_VERTICES}"
        ))
    } else {
        None
    }
}

/// Split a data line on `delimiter`, or on any whitespace when no delimiter is given.
#[must_use]
pub fn split_fields(line: &str, delimiter: Option<char>) -> Vec<&str> {
    match delimiter {
        Some(d) => line.split(d).map(str::trim).collect(),
        None => line.split_whitespace().collect(),
    }
}

/// True for lines the text parsers skip: blank lines and `#` comments
#[must_use]
pub fn is_skippable(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with('#')
}
