//! Multi-start execution.

use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::config::RestartConfig;
use crate::instance::Instance;
use crate::lm::{LmResult, LmSearch};
use crate::moves::CandidateLists;
use crate::tour::Tour;

/// Aggregate outcome of a multi-start run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestartResult {
    /// Best tour over all completed restarts (earliest restart on ties).
    pub best: Tour,

    /// Objective of `best`.
    pub best_cost: i64,

    /// Largest final objective among completed restarts.
    pub worst_cost: i64,

    /// Mean final objective among completed restarts.
    pub average_cost: f64,

    /// Restarts that ran before the time limit.
    pub runs_completed: usize,

    /// Final objective of each completed restart, in restart order.
    pub costs: Vec<i64>,

    /// Whether the time limit cut the run short.
    pub timed_out: bool,
}

impl RestartResult {
    fn empty(node_count: usize, timed_out: bool) -> Self {
        Self {
            best: Tour::empty(node_count),
            best_cost: 0,
            worst_cost: 0,
            average_cost: 0.0,
            runs_completed: 0,
            costs: Vec::new(),
            timed_out,
        }
    }
}

/// Runs independent restarts and aggregates their local optima.
pub struct RestartRunner;

impl RestartRunner {
    /// Executes `config.runs` restarts on `instance`.
    ///
    /// Restart `r` seeds its own RNG with `seed + r`, which drives both the
    /// construction and first-improvement choices; greedy constructors start
    /// from node `r % n`. An empty instance yields an empty result.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tourlm::instance::Instance;
    /// use u_tourlm::restart::{RestartConfig, RestartRunner};
    ///
    /// let instance = Instance::from_rows(vec![
    ///     [0, 0, 3], [10, 0, 1], [10, 10, 4], [0, 10, 1], [5, 20, 5], [20, 5, 9],
    /// ]);
    /// let config = RestartConfig::default().with_runs(10).with_seed(1);
    /// let result = RestartRunner::run(&instance, &config);
    /// assert_eq!(result.runs_completed, 10);
    /// assert_eq!(result.best.len(), 3);
    /// assert!(result.best_cost <= result.worst_cost);
    /// ```
    pub fn run(instance: &Instance, config: &RestartConfig) -> RestartResult {
        config.validate().expect("invalid RestartConfig");

        let n = instance.len();
        if n == 0 {
            return RestartResult::empty(0, false);
        }
        let size = config
            .tour_size
            .unwrap_or_else(|| instance.default_tour_size())
            .min(n);
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let candidates = config
            .search
            .candidate_neighbors
            .map(|k| CandidateLists::build(instance, k));
        let deadline = config
            .time_limit_ms
            .map(|ms| Instant::now() + Duration::from_millis(ms));

        let single = |run: usize| -> Option<LmResult> {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                return None;
            }
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(run as u64));
            let start = if config.construction.uses_start_node() {
                run % n
            } else {
                0
            };
            let tour = config.construction.build(instance, size, start, &mut rng);
            let search =
                LmSearch::with_candidates(instance, tour, &config.search, candidates.as_ref());
            Some(search.run_with(&mut rng, None))
        };

        let outcomes = collect_runs(config.runs, config.parallel, single);
        let timed_out = outcomes.iter().any(Option::is_none);
        let result = aggregate(n, outcomes.into_iter().flatten(), timed_out);

        debug!(
            "restart: done runs={} best={} worst={} avg={:.1} timed_out={}",
            result.runs_completed,
            result.best_cost,
            result.worst_cost,
            result.average_cost,
            result.timed_out
        );
        result
    }
}

#[cfg(feature = "parallel")]
fn collect_runs<F>(runs: usize, parallel: bool, single: F) -> Vec<Option<LmResult>>
where
    F: Fn(usize) -> Option<LmResult> + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        (0..runs).into_par_iter().map(&single).collect()
    } else {
        (0..runs).map(single).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn collect_runs<F>(runs: usize, _parallel: bool, single: F) -> Vec<Option<LmResult>>
where
    F: Fn(usize) -> Option<LmResult>,
{
    (0..runs).map(single).collect()
}

fn aggregate<I>(node_count: usize, results: I, timed_out: bool) -> RestartResult
where
    I: Iterator<Item = LmResult>,
{
    let mut best: Option<Tour> = None;
    let mut best_cost = i64::MAX;
    let mut worst_cost = i64::MIN;
    let mut total: i64 = 0;
    let mut costs = Vec::new();

    for result in results {
        total += result.cost;
        costs.push(result.cost);
        worst_cost = worst_cost.max(result.cost);
        if result.cost < best_cost {
            best_cost = result.cost;
            best = Some(result.tour);
        }
    }

    let Some(best) = best else {
        return RestartResult::empty(node_count, timed_out);
    };
    RestartResult {
        best,
        best_cost,
        worst_cost,
        average_cost: total as f64 / costs.len() as f64,
        runs_completed: costs.len(),
        costs,
        timed_out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::Construction;
    use crate::lm::{Descent, LmConfig};
    use crate::moves::MoveSet;

    fn grid() -> Instance {
        let mut rows = Vec::new();
        for i in 0..5 {
            for j in 0..4 {
                rows.push([i * 17 + (j % 2) * 3, j * 23 - (i % 3) * 4, (i * 31 + j * 7) % 29]);
            }
        }
        Instance::from_rows(rows)
    }

    #[test]
    fn test_restart_statistics() {
        let instance = grid();
        let config = RestartConfig::default().with_runs(12).with_seed(5);
        let result = RestartRunner::run(&instance, &config);

        assert_eq!(result.runs_completed, 12);
        assert_eq!(result.costs.len(), 12);
        assert!(!result.timed_out);
        assert_eq!(result.best.len(), 10);
        assert!(result.best.is_consistent());
        assert_eq!(result.best_cost, result.best.cost(&instance));
        assert_eq!(result.best_cost, *result.costs.iter().min().unwrap());
        assert_eq!(result.worst_cost, *result.costs.iter().max().unwrap());
        let mean = result.costs.iter().sum::<i64>() as f64 / 12.0;
        assert!((result.average_cost - mean).abs() < 1e-9);
    }

    #[test]
    fn test_restart_seeded_reproducible() {
        let instance = grid();
        let config = RestartConfig::default().with_runs(6).with_seed(11);
        let a = RestartRunner::run(&instance, &config);
        let b = RestartRunner::run(&instance, &config);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_greedy_restarts_cycle_start_nodes() {
        let instance = grid();
        let config = RestartConfig::default()
            .with_runs(instance.len() * 2)
            .with_construction(Construction::GreedyInsertion)
            .with_seed(0);
        let result = RestartRunner::run(&instance, &config);
        // start node r % n: the second sweep repeats the first
        let (first, second) = result.costs.split_at(instance.len());
        assert_eq!(first, second);
    }

    #[test]
    fn test_restart_respects_tour_size() {
        let instance = grid();
        let config = RestartConfig::default()
            .with_runs(3)
            .with_tour_size(50)
            .with_search(LmConfig::default().with_move_set(MoveSet::TwoOpt))
            .with_seed(2);
        let result = RestartRunner::run(&instance, &config);
        assert_eq!(result.best.len(), instance.len());
    }

    #[test]
    fn test_restart_empty_instance() {
        let instance = Instance::new(Vec::new());
        let result = RestartRunner::run(&instance, &RestartConfig::default().with_runs(3));
        assert!(result.best.is_empty());
        assert_eq!(result.runs_completed, 0);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_restart_expired_deadline() {
        let instance = grid();
        let config = RestartConfig::default()
            .with_runs(5)
            .with_seed(1)
            .with_time_limit_ms(0);
        let result = RestartRunner::run(&instance, &config);
        assert!(result.timed_out);
        assert_eq!(result.runs_completed, 0);
        assert!(result.best.is_empty());
    }

    #[test]
    fn test_restart_with_candidates() {
        let instance = grid();
        let config = RestartConfig::default()
            .with_runs(4)
            .with_seed(3)
            .with_search(LmConfig::default().with_candidate_neighbors(5));
        let result = RestartRunner::run(&instance, &config);
        assert_eq!(result.runs_completed, 4);
        assert_eq!(result.best_cost, result.best.cost(&instance));
    }

    #[test]
    fn test_first_improvement_restarts_reproducible() {
        let instance = grid();
        let config = RestartConfig::default()
            .with_runs(5)
            .with_seed(8)
            .with_search(
                LmConfig::default()
                    .with_descent(Descent::FirstImprovement)
                    .with_move_set(MoveSet::All),
            );
        let a = RestartRunner::run(&instance, &config);
        let b = RestartRunner::run(&instance, &config);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.best, b.best);
        assert_eq!(a.best_cost, a.best.cost(&instance));
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_serial() {
        let instance = grid();
        let serial = RestartConfig::default().with_runs(8).with_seed(21);
        let parallel = serial.clone().with_parallel(true);
        let a = RestartRunner::run(&instance, &serial);
        let b = RestartRunner::run(&instance, &parallel);
        assert_eq!(a.costs, b.costs);
        assert_eq!(a.best, b.best);
    }

    #[test]
    #[should_panic(expected = "invalid RestartConfig")]
    fn test_invalid_config_panics() {
        RestartRunner::run(&grid(), &RestartConfig::default().with_runs(0));
    }
}
