use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::core::cost::{Cost, CostMatrix};
use crate::core::instance::Instance;
use crate::core::matching::{Matching, Solution};
use crate::solver::{BitmaskDp, BruteForce, IntervalDp, MatchError, MatchingSolver};
use crate::utils::validation::{
    DEFAULT_BITMASK_LIMIT, DEFAULT_BRUTE_FORCE_LIMIT, DEFAULT_INTERVAL_LIMIT, DEFAULT_TOLERANCE,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Solver limits and numeric settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Largest vertex count handed to the brute-force enumerator
    pub brute_force_limit: usize,
    /// Largest vertex count handed to the bitmask DP
    pub bitmask_limit: usize,
    /// Largest vertex count handed to the interval DP
    pub interval_limit: usize,
    /// Relative tolerance when comparing real-valued costs
    pub tolerance: f64,
    /// Check the triangle inequality before running the interval DP on a matrix
    pub check_metric: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            brute_force_limit: DEFAULT_BRUTE_FORCE_LIMIT,
            bitmask_limit: DEFAULT_BITMASK_LIMIT,
            interval_limit: DEFAULT_INTERVAL_LIMIT,
            tolerance: DEFAULT_TOLERANCE,
            check_metric: true,
        }
    }
}

impl SolverConfig {
    /// Load a config from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadError` if the file cannot be read or
    /// `ConfigError::ParseError` if it is not valid JSON.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if the JSON is invalid.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Which solver to run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SolverKind {
    /// Pick from the input's shape and size
    Auto,
    BruteForce,
    Bitmask,
    Interval,
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::BruteForce => write!(f, "brute-force"),
            Self::Bitmask => write!(f, "bitmask"),
            Self::Interval => write!(f, "interval"),
        }
    }
}

/// A minimum cost in the input's own numeric type
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CostValue {
    Integer(i64),
    Real(f64),
}

impl CostValue {
    #[must_use]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Integer(v) => v.as_f64(),
            Self::Real(v) => v,
        }
    }

    /// Exact for two integers, relative tolerance otherwise
    #[must_use]
    pub fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (a, b) => a.as_f64().approx_eq(b.as_f64(), tolerance),
        }
    }
}

impl fmt::Display for CostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v:.6}"),
        }
    }
}

impl From<i64> for CostValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for CostValue {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

/// Result of one solver run, independent of the cost type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolveReport {
    pub solver: SolverKind,
    pub vertices: usize,
    pub cost: CostValue,
    pub matching: Matching,
    /// False when `cost` is only an upper bound on the optimum: the interval solver
    /// on points that are not collinear, or on a matrix the caller declared metric
    pub exact: bool,
}

impl SolveReport {
    fn new<C: Cost + Into<CostValue>>(
        solver: SolverKind,
        vertices: usize,
        solution: Solution<C>,
        exact: bool,
    ) -> Self {
        Self {
            solver,
            vertices,
            cost: solution.cost.into(),
            matching: solution.matching,
            exact,
        }
    }
}

/// Outcome of running every applicable solver on one instance
#[derive(Debug, Clone)]
pub struct CrossValidation {
    pub runs: Vec<(SolverKind, Result<SolveReport, MatchError>)>,
}

impl CrossValidation {
    fn successes(&self) -> impl Iterator<Item = &SolveReport> {
        self.runs.iter().filter_map(|(_, run)| run.as_ref().ok())
    }

    /// The shared cost when at least one exact solver succeeded and all exact successes agree
    #[must_use]
    pub fn consensus(&self, tolerance: f64) -> Option<CostValue> {
        let mut costs = self.successes().filter(|r| r.exact).map(|r| r.cost);
        let first = costs.next()?;
        costs
            .all(|c| c.approx_eq(first, tolerance))
            .then_some(first)
    }

    /// Exact solvers agree and no upper bound falls below their optimum
    #[must_use]
    pub fn agree(&self, tolerance: f64) -> bool {
        let Some(optimum) = self.consensus(tolerance) else {
            return false;
        };
        self.successes()
            .filter(|r| !r.exact)
            .all(|r| r.cost.as_f64() >= optimum.as_f64() || r.cost.approx_eq(optimum, tolerance))
    }
}

/// Picks and runs solvers according to a [`SolverConfig`]
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: SolverConfig,
}

impl MatchingEngine {
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    fn brute_force(&self) -> BruteForce {
        BruteForce::new().with_max_vertices(self.config.brute_force_limit)
    }

    fn bitmask(&self) -> BitmaskDp {
        BitmaskDp::new().with_max_vertices(self.config.bitmask_limit)
    }

    fn interval(&self) -> IntervalDp {
        IntervalDp::new()
            .with_max_vertices(self.config.interval_limit)
            .with_metric_check(self.config.check_metric, self.config.tolerance)
    }

    /// Resolve [`SolverKind::Auto`] for an instance.
    ///
    /// Any instance within the bitmask ceiling goes to the exact bitmask DP. Beyond it,
    /// points go to the interval DP, and matrices do only when the caller vouches the
    /// costs are metric in the given order. Interval results on anything but collinear
    /// points are reported as upper bounds.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::TooManyVertices`] if no exact solver fits the input.
    pub fn select(
        &self,
        instance: &Instance,
        requested: SolverKind,
        assume_metric: bool,
    ) -> Result<SolverKind, MatchError> {
        if requested != SolverKind::Auto {
            return Ok(requested);
        }
        let n = instance.vertex_count();
        let selected = match instance {
            _ if n <= self.config.bitmask_limit => SolverKind::Bitmask,
            Instance::Points(_) => SolverKind::Interval,
            _ if assume_metric => SolverKind::Interval,
            _ => {
                return Err(MatchError::TooManyVertices {
                    solver: "bitmask-dp",
                    vertices: n,
                    limit: self.config.bitmask_limit,
                })
            }
        };
        debug!(vertices = n, solver = %selected, "selected solver");
        Ok(selected)
    }

    /// Solve an instance with the requested solver.
    ///
    /// # Errors
    ///
    /// Returns the [`MatchError`] of the selected solver.
    pub fn solve(
        &self,
        instance: &Instance,
        requested: SolverKind,
        assume_metric: bool,
    ) -> Result<SolveReport, MatchError> {
        let kind = self.select(instance, requested, assume_metric)?;
        let n = instance.vertex_count();
        let exact = match instance {
            _ if kind != SolverKind::Interval => true,
            Instance::Points(points) => points.is_collinear(),
            _ => false,
        };
        if !exact {
            debug!(vertices = n, "interval dp result is an upper bound on the optimum");
        }
        match instance {
            Instance::IntegerMatrix(costs) => {
                Ok(SolveReport::new(kind, n, self.run(kind, costs)?, exact))
            }
            Instance::RealMatrix(costs) => {
                Ok(SolveReport::new(kind, n, self.run(kind, costs)?, exact))
            }
            Instance::Points(points) => {
                let solution = if kind == SolverKind::Interval {
                    self.interval().solve_points(points)?
                } else {
                    self.run(kind, &points.distance_matrix()?)?
                };
                Ok(SolveReport::new(kind, n, solution, exact))
            }
        }
    }

    fn run<C: Cost>(&self, kind: SolverKind, costs: &CostMatrix<C>) -> Result<Solution<C>, MatchError> {
        match kind {
            SolverKind::BruteForce => self.brute_force().solve(costs),
            SolverKind::Bitmask | SolverKind::Auto => self.bitmask().solve(costs),
            SolverKind::Interval => self.interval().solve(costs),
        }
    }

    /// Solvers whose assumptions and ceilings fit the instance.
    ///
    /// Odd instances still list the solvers so that each reports its own failure.
    #[must_use]
    pub fn applicable(&self, instance: &Instance) -> Vec<SolverKind> {
        let n = instance.vertex_count();
        let mut kinds = Vec::new();
        if n <= self.config.brute_force_limit {
            kinds.push(SolverKind::BruteForce);
        }
        if n <= self.config.bitmask_limit {
            kinds.push(SolverKind::Bitmask);
        }
        if matches!(instance, Instance::Points(_)) {
            kinds.push(SolverKind::Interval);
        }
        kinds
    }

    /// Run every applicable solver on the same instance
    #[must_use]
    pub fn cross_validate(&self, instance: &Instance) -> CrossValidation {
        let runs = self
            .applicable(instance)
            .into_iter()
            .map(|kind| (kind, self.solve(instance, kind, false)))
            .collect();
        CrossValidation { runs }
    }
}
