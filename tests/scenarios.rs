//! End-to-end scenarios on small hand-checked instances.

use u_tourlm::construct::Construction;
use u_tourlm::instance::Instance;
use u_tourlm::lm::{LmConfig, LmRunner, ScanMode};
use u_tourlm::moves::MoveSet;
use u_tourlm::restart::{RestartConfig, RestartRunner};
use u_tourlm::tour::{evaluate, Tour};

fn square() -> Instance {
    Instance::parse("0;0;0\n10;0;0\n10;10;0\n0;10;0\n").unwrap()
}

fn permutations(items: &[usize]) -> Vec<Vec<usize>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut out = Vec::new();
    for (i, &head) in items.iter().enumerate() {
        let mut rest = items.to_vec();
        rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head);
            out.push(tail);
        }
    }
    out
}

/// Twenty nodes on a jittered 5x4 grid.
fn field(cost: impl Fn(usize) -> i64) -> Instance {
    let rows = (0..20)
        .map(|i| {
            let (r, c) = ((i / 4) as i64, (i % 4) as i64);
            [c * 30 + (r * 7) % 11, r * 25 + (c * 5) % 9, cost(i)]
        })
        .collect();
    Instance::from_rows(rows)
}

#[test]
fn test_square_converges_from_every_permutation() {
    let instance = square();
    let perms = permutations(&[0, 1, 2, 3]);
    assert_eq!(perms.len(), 24);
    for scan in [ScanMode::Incremental, ScanMode::Full] {
        let config = LmConfig::default().with_scan(scan);
        for perm in &perms {
            let result = LmRunner::run(&instance, Tour::new(perm.clone(), 4), &config);
            assert_eq!(result.cost, 40, "start {perm:?} under {scan:?} ended at {}", result.cost);
            assert_eq!(result.tour.len(), 4);
            assert_eq!(evaluate(&instance, result.tour.nodes()), 40);
        }
    }
}

#[test]
fn test_two_nodes_one_visited() {
    let instance = Instance::from_rows(vec![[0, 0, 5], [3, 4, 9]]);
    assert_eq!(instance.default_tour_size(), 1);

    for node in 0..2 {
        let result = LmRunner::run(&instance, Tour::new(vec![node], 2), &LmConfig::default());
        assert_eq!(result.tour.nodes(), &[node]);
        assert_eq!(result.cost, instance.cost(node));
    }

    let config = RestartConfig::default()
        .with_runs(2)
        .with_construction(Construction::GreedyInsertion)
        .with_seed(0);
    let result = RestartRunner::run(&instance, &config);
    assert_eq!(result.best.nodes(), &[0]);
    assert_eq!(result.best_cost, 5);
    assert_eq!(result.worst_cost, 9);
    assert!((result.average_cost - 7.0).abs() < 1e-9);
}

#[test]
fn test_identical_large_costs_full_tour_is_plain_two_opt() {
    // every node visited: there is nothing to swap in
    let instance = field(|_| 1_000_000);
    let start: Vec<usize> = (0..20)
        .rev()
        .step_by(3)
        .chain((0..20).filter(|i| (19 - i) % 3 != 0))
        .collect();
    let tour = Tour::new(start, 20);

    let mixed = LmRunner::run(&instance, tour.clone(), &LmConfig::default());
    let plain = LmRunner::run(
        &instance,
        tour,
        &LmConfig::default().with_move_set(MoveSet::TwoOpt),
    );
    assert_eq!(mixed.replacement_moves, 0);
    assert_eq!(mixed.tour, plain.tour);
    assert_eq!(mixed.cost, plain.cost);
    assert_eq!(mixed.applied_moves, plain.applied_moves);
    assert!(mixed.cost < mixed.initial_cost);
}

#[test]
fn test_identical_large_costs_keep_cost_term_fixed() {
    // replacements can still shorten the cycle; the visit-cost sum never moves
    let instance = field(|_| 1_000_000);
    let tour = Tour::new(vec![0, 5, 10, 15, 19, 14, 9, 4, 3, 7], 20);
    let result = LmRunner::run(&instance, tour, &LmConfig::default());
    let visit: i64 = result.tour.nodes().iter().map(|&v| instance.cost(v)).sum();
    assert_eq!(visit, 10 * 1_000_000);
    assert!(result.cost <= result.initial_cost);
}

#[test]
fn test_expensive_node_is_swapped_out() {
    let mut rows = vec![[0, 0, 1], [10, 0, 1], [10, 10, 1], [0, 10, 1]];
    rows.extend([[5, 5, 500], [6, 4, 1], [50, 50, 1], [60, 60, 1]]);
    let instance = Instance::from_rows(rows);
    let result = LmRunner::run(&instance, Tour::new(vec![0, 1, 2, 4], 8), &LmConfig::default());
    assert!(!result.tour.contains(4));
    assert!(result.replacement_moves >= 1);
    assert_eq!(result.cost, evaluate(&instance, result.tour.nodes()));
}

#[test]
fn test_segment_reversal_round_trip() {
    let mut tour = Tour::new(vec![3, 7, 1, 9, 4, 0, 6], 10);
    let original = tour.clone();
    for (from, to) in [(1, 4), (5, 2), (0, 6), (6, 0), (3, 3)] {
        tour.reverse_segment(from, to);
        assert!(tour.is_consistent());
        tour.reverse_segment(from, to);
        assert_eq!(tour, original, "reversal {from}..={to} did not undo");
    }
}

#[test]
fn test_seeded_restarts_are_deterministic() {
    let instance = field(|i| ((i * 37) % 23) as i64);
    for construction in [
        Construction::Random,
        Construction::GreedyInsertion,
        Construction::GreedyRegret,
    ] {
        let config = RestartConfig::default()
            .with_runs(15)
            .with_construction(construction)
            .with_seed(2024);
        let a = RestartRunner::run(&instance, &config);
        let b = RestartRunner::run(&instance, &config);
        assert_eq!(a.costs, b.costs, "{construction:?} restarts diverged");
        assert_eq!(a.best, b.best);
        assert_eq!(a.best.len(), 10);
        assert!(a.best_cost <= a.worst_cost);
    }
}

#[test]
fn test_incremental_matches_full_scan_quality_on_square() {
    let instance = square();
    let start = Tour::new(vec![0, 2, 1, 3], 4);
    let incremental = LmRunner::run(&instance, start.clone(), &LmConfig::default());
    let full = LmRunner::run(
        &instance,
        start,
        &LmConfig::default().with_scan(ScanMode::Full),
    );
    assert_eq!(incremental.cost, full.cost);
}
