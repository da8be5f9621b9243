//! Agreement between independent solvers on shared random instances.

use pair_solver::generate::{collinear_points, random_cost_matrix, random_points, seeded_rng};
use pair_solver::{
    BitmaskDp, BlossomAdapter, BlossomBackend, BruteForce, Cost, CostMatrix, Instance,
    IntervalDp, MatchError, MatchingEngine, MatchingOracle, MatchingSolver, SolverKind,
    WeightedEdge,
};

const TOLERANCE: f64 = 1e-9;

/// Edmonds' blossom algorithm from the `mwmatching` crate behind the backend trait
struct MwMatchingBackend;

impl BlossomBackend for MwMatchingBackend {
    fn max_weight_matching(&self, vertex_count: usize, edges: &[WeightedEdge]) -> Vec<Option<usize>> {
        let edges: mwmatching::Edges = edges
            .iter()
            .map(|e| {
                let weight = i32::try_from(e.weight).expect("test weights fit in i32");
                (e.u, e.v, weight)
            })
            .collect();
        let mut mate = mwmatching::Matching::new(edges).max_cardinality().solve();
        mate.resize(vertex_count, mwmatching::SENTINEL);
        mate.into_iter()
            .map(|v| (v != mwmatching::SENTINEL).then_some(v))
            .collect()
    }
}

#[test]
fn test_exact_solvers_and_oracle_agree_on_random_matrices() {
    let oracle = BlossomAdapter::new(MwMatchingBackend);
    for n in (0..=10).step_by(2) {
        for seed in 0..4 {
            let costs = random_cost_matrix(n, 50, &mut seeded_rng(seed)).unwrap();

            let brute = BruteForce::default().solve(&costs).unwrap();
            let bitmask = BitmaskDp::default().solve(&costs).unwrap();
            let expected = oracle.min_cost_perfect_matching(&costs).unwrap();

            assert_eq!(brute.cost, expected, "brute force, n={n} seed={seed}");
            assert_eq!(bitmask.cost, expected, "bitmask, n={n} seed={seed}");

            for solution in [&brute, &bitmask] {
                assert!(solution.matching.is_perfect(n));
                assert_eq!(solution.matching.cost(&costs), Some(solution.cost));
            }
        }
    }
}

#[test]
fn test_oracle_on_four_vertex_example() {
    let costs = CostMatrix::from_rows(vec![
        vec![0, 1, 4, 3],
        vec![1, 0, 2, 5],
        vec![4, 2, 0, 6],
        vec![3, 5, 6, 0],
    ])
    .unwrap();
    let solution = BlossomAdapter::new(MwMatchingBackend).solve_matching(&costs).unwrap();
    assert_eq!(solution.cost, 5);
    assert_eq!(solution.matching.pairs(), &[(0, 3), (1, 2)]);
}

#[test]
fn test_oracle_as_solver_reports_odd_input() {
    let oracle = BlossomAdapter::new(MwMatchingBackend);
    let costs = CostMatrix::from_rows(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]]).unwrap();
    assert_eq!(oracle.solve(&costs), Err(MatchError::OddVertexCount(3)));
}

#[test]
fn test_interval_exact_on_collinear_points() {
    for n in (2..=14).step_by(2) {
        for seed in 0..3 {
            let points = collinear_points(n, 10, &mut seeded_rng(seed)).unwrap();
            let interval = IntervalDp::default().solve_points(&points).unwrap();
            let bitmask = BitmaskDp::default()
                .solve(&points.distance_matrix().unwrap())
                .unwrap();
            assert!(
                interval.cost.approx_eq(bitmask.cost, TOLERANCE),
                "n={n} seed={seed}: interval {} vs bitmask {}",
                interval.cost,
                bitmask.cost
            );
        }
    }
}

#[test]
fn test_interval_never_below_optimum_on_plane() {
    for seed in 0..8 {
        let points = random_points(10, 100.0, &mut seeded_rng(seed)).unwrap();
        let distances = points.distance_matrix().unwrap();

        let interval = IntervalDp::default().solve_points(&points).unwrap();
        let optimum = BitmaskDp::default().solve(&distances).unwrap();

        assert!(interval.matching.is_perfect(10));
        let recomputed = interval.matching.cost(&distances).unwrap();
        assert!(recomputed.approx_eq(interval.cost, TOLERANCE));
        assert!(interval.cost >= optimum.cost - 1e-6, "seed={seed}");
    }
}

#[test]
fn test_raising_a_cost_never_lowers_the_optimum() {
    let costs = random_cost_matrix(8, 20, &mut seeded_rng(11)).unwrap();
    let base = BitmaskDp::default().solve(&costs).unwrap().cost;

    for (a, b) in [(0, 1), (2, 7), (3, 4)] {
        let raised = CostMatrix::from_fn(8, |i, j| {
            costs.get(i, j) + if (i, j) == (a, b) { 15 } else { 0 }
        })
        .unwrap();
        assert!(BitmaskDp::default().solve(&raised).unwrap().cost >= base);
    }
}

#[test]
fn test_raising_an_unused_cost_keeps_the_optimum() {
    let costs = random_cost_matrix(8, 20, &mut seeded_rng(11)).unwrap();
    let optimum = BitmaskDp::default().solve(&costs).unwrap();

    let mut raised_edges = 0;
    for a in 0..8 {
        for b in (a + 1)..8 {
            if optimum.matching.partner_of(a) == Some(b) {
                continue;
            }
            let raised = CostMatrix::from_fn(8, |i, j| {
                costs.get(i, j) + if (i, j) == (a, b) { 50 } else { 0 }
            })
            .unwrap();
            assert_eq!(
                BitmaskDp::default().solve(&raised).unwrap().cost,
                optimum.cost,
                "raising unused edge ({a}, {b})"
            );
            raised_edges += 1;
        }
    }
    assert_eq!(raised_edges, 28 - 4);
}

#[test]
fn test_constant_shift_adds_half_n_times_constant() {
    let n = 8;
    let costs = random_cost_matrix(n, 30, &mut seeded_rng(5)).unwrap();
    let shifted = CostMatrix::from_fn(n, |i, j| costs.get(i, j) + 100).unwrap();

    let base = BitmaskDp::default().solve(&costs).unwrap().cost;
    let after = BitmaskDp::default().solve(&shifted).unwrap().cost;
    assert_eq!(after, base + 100 * 4);
}

#[test]
fn test_solving_twice_is_identical() {
    let costs = random_cost_matrix(12, 100, &mut seeded_rng(3)).unwrap();
    let first = BitmaskDp::default().solve(&costs).unwrap();
    let second = BitmaskDp::default().solve(&costs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_brute_force_twelve_matches_bitmask() {
    let costs = random_cost_matrix(12, 100, &mut seeded_rng(1)).unwrap();
    let brute = BruteForce::default().solve(&costs).unwrap();
    let bitmask = BitmaskDp::default().solve(&costs).unwrap();
    assert_eq!(brute.cost, bitmask.cost);
    assert!(brute.matching.is_perfect(12));
}

#[test]
fn test_bitmask_handles_twenty_two_vertices() {
    let costs = random_cost_matrix(22, 1000, &mut seeded_rng(21)).unwrap();
    let solution = BitmaskDp::default().solve(&costs).unwrap();
    assert!(solution.matching.is_perfect(22));
    assert_eq!(solution.matching.cost(&costs), Some(solution.cost));
    assert!(solution.cost >= 11);
}

#[test]
fn test_interval_scales_to_a_thousand_points() {
    let points = random_points(1000, 1000.0, &mut seeded_rng(8)).unwrap();
    let solution = IntervalDp::default().solve_points(&points).unwrap();
    assert!(solution.cost.is_finite());
    assert!(solution.cost >= 0.0);
    assert!(solution.matching.is_perfect(1000));
}

#[test]
fn test_engine_cross_validation_agrees() {
    let engine = MatchingEngine::default();
    for seed in 0..3 {
        let costs = random_cost_matrix(8, 40, &mut seeded_rng(seed)).unwrap();
        let validation = engine.cross_validate(&Instance::IntegerMatrix(costs));
        assert_eq!(validation.runs.len(), 2);
        assert!(validation.agree(TOLERANCE));
    }

    let line = Instance::Points(collinear_points(10, 5, &mut seeded_rng(4)).unwrap());
    let validation = engine.cross_validate(&line);
    assert_eq!(validation.runs.len(), 3);
    assert!(validation.agree(TOLERANCE));
}

#[test]
fn test_engine_auto_uses_interval_beyond_bitmask_limit() {
    let engine = MatchingEngine::default();
    let points = Instance::Points(random_points(100, 50.0, &mut seeded_rng(2)).unwrap());
    let report = engine.solve(&points, SolverKind::Auto, false).unwrap();
    assert_eq!(report.solver, SolverKind::Interval);
    assert!(!report.exact);
    assert_eq!(report.matching.len(), 50);

    let costs = Instance::IntegerMatrix(random_cost_matrix(26, 10, &mut seeded_rng(2)).unwrap());
    assert!(matches!(
        engine.solve(&costs, SolverKind::Auto, false),
        Err(MatchError::TooManyVertices { .. })
    ));
}
