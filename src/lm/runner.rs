//! List-of-moves local search loop.
//!
//! # Algorithm
//!
//! 1. Seed the move list with a full scan of the starting tour, sorted by
//!    delta.
//! 2. Walk the list best-first. Each move is re-checked before use:
//!    a. 2-opt: both recorded edges must still exist. If either is gone the
//!    move is dropped; if they are traversed in opposite directions the move
//!    is skipped but kept.
//!    b. Replacement: the removed node must still be visited and the inserted
//!    one unvisited, and the delta recomputed against the current neighbours
//!    must still be negative; otherwise the move is dropped.
//! 3. Apply the first move that passes, then merge in moves re-derived around
//!    the nodes it touched (or rescan everything under [`ScanMode::Full`]).
//! 4. Stop when a pass applies nothing. With `confirm_with_full_scan`, one
//!    full scan runs first and the search continues if it finds moves.
//!
//! Node exchanges are re-checked like replacements: both nodes must still be
//! visited and the delta against their current neighbours must be negative.
//!
//! Under [`Descent::FirstImprovement`] no list is kept: every iteration runs
//! a full scan and applies one of its moves chosen uniformly at random.
//!
//! Every applied move strictly lowers the objective, so the loop terminates.

use std::borrow::Cow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, trace};
use rand::Rng;

use super::config::{Descent, LmConfig, ScanMode};
use super::list::{MoveList, Verdict};
use crate::instance::Instance;
use crate::moves::{node_exchange_delta, replacement_delta, CandidateLists, Move, MoveGenerator};
use crate::tour::{Orientation, Tour};

/// Result of a local search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LmResult {
    /// The locally optimal tour.
    pub tour: Tour,

    /// Objective of `tour`.
    pub cost: i64,

    /// Objective of the starting tour.
    pub initial_cost: i64,

    /// Total moves applied.
    pub applied_moves: usize,

    /// Applied 2-opt moves.
    pub two_opt_moves: usize,

    /// Applied replacement moves.
    pub replacement_moves: usize,

    /// Applied node exchanges.
    pub exchange_moves: usize,

    /// Listed moves discarded as stale or no longer improving.
    pub dropped_moves: usize,

    /// Times a listed 2-opt move was passed over for mismatched edge
    /// directions.
    pub skipped_moves: usize,

    /// Full neighbourhood scans performed, including the seed.
    pub full_scans: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Objective after each applied move.
    pub cost_history: Vec<i64>,
}

/// A move applied by [`LmSearch::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    /// The move, carrying the delta it was applied with.
    pub mv: Move,
    /// Objective after the move.
    pub cost: i64,
}

/// One in-flight local search: the tour, its move list and counters.
///
/// [`LmSearch::step`] applies a single move, which lets callers inspect
/// the tour between moves. [`LmRunner`] drives it to a local optimum.
///
/// # Examples
///
/// ```
/// use u_tourlm::instance::Instance;
/// use u_tourlm::lm::{LmConfig, LmSearch};
/// use u_tourlm::tour::Tour;
///
/// let instance = Instance::from_rows(vec![[0, 0, 0], [10, 0, 0], [10, 10, 0], [0, 10, 0]]);
/// let mut search = LmSearch::new(&instance, Tour::new(vec![0, 2, 1, 3], 4), &LmConfig::default());
/// while let Some(applied) = search.step() {
///     assert!(applied.mv.delta() < 0);
///     assert!(search.tour().is_consistent());
/// }
/// assert_eq!(search.cost(), 40);
/// ```
pub struct LmSearch<'a> {
    instance: &'a Instance,
    config: LmConfig,
    candidates: Option<Cow<'a, CandidateLists>>,
    tour: Tour,
    list: MoveList,
    cost: i64,
    initial_cost: i64,
    two_opt_moves: usize,
    replacement_moves: usize,
    exchange_moves: usize,
    dropped_moves: usize,
    skipped_moves: usize,
    full_scans: usize,
    cancelled: bool,
    cost_history: Vec<i64>,
}

impl<'a> LmSearch<'a> {
    /// Starts a search from `tour`, building candidate lists if configured.
    ///
    /// # Panics
    ///
    /// Panics if `config` fails validation or the tour was built for a
    /// different node count.
    pub fn new(instance: &'a Instance, tour: Tour, config: &LmConfig) -> Self {
        let candidates = config
            .candidate_neighbors
            .map(|k| Cow::Owned(CandidateLists::build(instance, k)));
        Self::start(instance, tour, config, candidates)
    }

    /// Starts a search reusing prebuilt candidate lists.
    ///
    /// `config.candidate_neighbors` is ignored; `candidates` decides.
    pub fn with_candidates(
        instance: &'a Instance,
        tour: Tour,
        config: &LmConfig,
        candidates: Option<&'a CandidateLists>,
    ) -> Self {
        Self::start(instance, tour, config, candidates.map(Cow::Borrowed))
    }

    fn start(
        instance: &'a Instance,
        tour: Tour,
        config: &LmConfig,
        candidates: Option<Cow<'a, CandidateLists>>,
    ) -> Self {
        config.validate().expect("invalid LmConfig");
        assert_eq!(
            tour.node_count(),
            instance.len(),
            "tour and instance disagree on node count"
        );
        let cost = tour.cost(instance);
        let mut search = Self {
            instance,
            config: config.clone(),
            candidates,
            tour,
            list: MoveList::new(),
            cost,
            initial_cost: cost,
            two_opt_moves: 0,
            replacement_moves: 0,
            exchange_moves: 0,
            dropped_moves: 0,
            skipped_moves: 0,
            full_scans: 0,
            cancelled: false,
            cost_history: Vec::new(),
        };
        if search.tour.len() > 1 && config.descent == Descent::Steepest {
            search.list = MoveList::from_moves(search.generator().full_scan(&search.tour));
            search.full_scans += 1;
        }
        debug!(
            "lm.search: start n={} k={} descent={:?} cost={} seeded_moves={}",
            instance.len(),
            search.tour.len(),
            config.descent,
            cost,
            search.list.len()
        );
        search
    }

    pub fn tour(&self) -> &Tour {
        &self.tour
    }

    /// Objective of the current tour.
    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn applied_moves(&self) -> usize {
        self.two_opt_moves + self.replacement_moves + self.exchange_moves
    }

    fn generator(&self) -> MoveGenerator<'_> {
        MoveGenerator::new(self.instance, self.config.move_set)
            .with_candidates(self.candidates.as_deref())
    }

    /// Applies one improving move, drawing any randomness from the thread
    /// RNG.
    ///
    /// Returns `None` at a local optimum, or once `max_iterations` moves
    /// have been applied.
    pub fn step(&mut self) -> Option<AppliedMove> {
        self.step_with_rng(&mut rand::rng())
    }

    /// Applies one improving move, drawing any randomness from `rng`.
    ///
    /// Steepest descent never reads `rng`.
    pub fn step_with_rng<R: Rng>(&mut self, rng: &mut R) -> Option<AppliedMove> {
        if self.tour.len() <= 1 {
            return None;
        }
        if self.config.max_iterations > 0 && self.applied_moves() >= self.config.max_iterations {
            return None;
        }
        match self.config.descent {
            Descent::Steepest => self.step_steepest(),
            Descent::FirstImprovement => self.step_first_improvement(rng),
        }
    }

    fn step_first_improvement<R: Rng>(&mut self, rng: &mut R) -> Option<AppliedMove> {
        let moves = self.generator().full_scan(&self.tour);
        self.full_scans += 1;
        if moves.is_empty() {
            return None;
        }
        let mv = moves[rng.random_range(0..moves.len())];
        Some(self.apply(mv))
    }

    fn step_steepest(&mut self) -> Option<AppliedMove> {
        let mut confirmed = false;
        loop {
            if let Some(mv) = self.take_valid() {
                return Some(self.apply(mv));
            }
            let may_confirm = self.config.scan == ScanMode::Incremental
                && self.config.confirm_with_full_scan
                && !confirmed;
            if !may_confirm {
                return None;
            }
            confirmed = true;
            let fresh = self.generator().full_scan(&self.tour);
            self.full_scans += 1;
            trace!("lm.search: confirm scan found={}", fresh.len());
            if fresh.is_empty() {
                return None;
            }
            self.list.merge(fresh);
        }
    }

    /// Runs to a local optimum.
    pub fn run(self) -> LmResult {
        self.run_with(&mut rand::rng(), None)
    }

    /// Runs to a local optimum, checking `cancel` between moves.
    pub fn run_with_cancel(self, cancel: Option<Arc<AtomicBool>>) -> LmResult {
        self.run_with(&mut rand::rng(), cancel)
    }

    /// Runs to a local optimum with an explicit RNG and optional cancel
    /// flag.
    pub fn run_with<R: Rng>(mut self, rng: &mut R, cancel: Option<Arc<AtomicBool>>) -> LmResult {
        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    self.cancelled = true;
                    break;
                }
            }
            if self.step_with_rng(rng).is_none() {
                break;
            }
        }
        self.into_result()
    }

    pub fn into_result(self) -> LmResult {
        debug!(
            "lm.search: done cost={} initial={} applied={} dropped={} full_scans={}",
            self.cost,
            self.initial_cost,
            self.applied_moves(),
            self.dropped_moves,
            self.full_scans
        );
        LmResult {
            applied_moves: self.applied_moves(),
            tour: self.tour,
            cost: self.cost,
            initial_cost: self.initial_cost,
            two_opt_moves: self.two_opt_moves,
            replacement_moves: self.replacement_moves,
            exchange_moves: self.exchange_moves,
            dropped_moves: self.dropped_moves,
            skipped_moves: self.skipped_moves,
            full_scans: self.full_scans,
            cancelled: self.cancelled,
            cost_history: self.cost_history,
        }
    }

    /// One pass over the list; removes and returns the first valid move.
    fn take_valid(&mut self) -> Option<Move> {
        let instance = self.instance;
        let tour = &self.tour;
        let (taken, stats) = self.list.take_first(|mv| judge(instance, tour, mv));
        self.dropped_moves += stats.dropped;
        self.skipped_moves += stats.kept;
        taken
    }

    fn apply(&mut self, mv: Move) -> AppliedMove {
        let changed = match mv {
            Move::TwoOpt {
                u,
                u_next,
                v,
                v_next,
                ..
            } => {
                let (from, to) = match self.tour.orientation(u, u_next) {
                    Some(Orientation::Reversed) => (u, v_next),
                    _ => (u_next, v),
                };
                let from = self.position(from);
                let to = self.position(to);
                self.tour.reverse_segment(from, to);
                self.two_opt_moves += 1;
                vec![u, u_next, v, v_next]
            }
            Move::Replace { remove, insert, .. } => {
                let idx = self.position(remove);
                let prev = self.tour.prev_of(idx);
                let next = self.tour.next_of(idx);
                self.tour.replace(idx, insert);
                self.replacement_moves += 1;
                vec![insert, prev, next, remove]
            }
            Move::Exchange { a, b, .. } => {
                let (i, j) = (self.position(a), self.position(b));
                let touched = vec![
                    a,
                    b,
                    self.tour.prev_of(i),
                    self.tour.next_of(i),
                    self.tour.prev_of(j),
                    self.tour.next_of(j),
                ];
                self.tour.swap(i, j);
                self.exchange_moves += 1;
                touched
            }
        };

        self.cost += mv.delta();
        self.cost_history.push(self.cost);
        debug_assert_eq!(self.cost, self.tour.cost(self.instance));
        trace!(
            "lm.search: applied {:?} cost={} pending={}",
            mv,
            self.cost,
            self.list.len()
        );

        if self.config.descent == Descent::FirstImprovement {
            return AppliedMove {
                mv,
                cost: self.cost,
            };
        }
        match self.config.scan {
            ScanMode::Incremental => {
                let fresh = self.generator().incremental_scan(&self.tour, &changed);
                self.list.merge(fresh);
            }
            ScanMode::Full => {
                let fresh = self.generator().full_scan(&self.tour);
                self.list = MoveList::from_moves(fresh);
                self.full_scans += 1;
            }
        }

        AppliedMove {
            mv,
            cost: self.cost,
        }
    }

    /// Position of a node known to be visited.
    fn position(&self, node: usize) -> usize {
        match self.tour.position(node) {
            Some(idx) => idx,
            None => unreachable!("validated move references unvisited node {node}"),
        }
    }
}

/// Re-checks a listed move against the current tour.
fn judge(instance: &Instance, tour: &Tour, mv: &Move) -> Verdict {
    match *mv {
        Move::TwoOpt {
            delta,
            u,
            u_next,
            v,
            v_next,
        } => match (tour.orientation(u, u_next), tour.orientation(v, v_next)) {
            (Some(a), Some(b)) if a == b => Verdict::Apply(delta),
            (Some(_), Some(_)) => Verdict::Keep,
            _ => Verdict::Drop,
        },
        Move::Replace { remove, insert, .. } => {
            let Some(idx) = tour.position(remove) else {
                return Verdict::Drop;
            };
            if tour.contains(insert) {
                return Verdict::Drop;
            }
            let delta = replacement_delta(instance, tour, idx, insert);
            if delta < 0 {
                Verdict::Apply(delta)
            } else {
                Verdict::Drop
            }
        }
        Move::Exchange { a, b, .. } => {
            let (Some(i), Some(j)) = (tour.position(a), tour.position(b)) else {
                return Verdict::Drop;
            };
            let delta = node_exchange_delta(instance, tour, i, j);
            if delta < 0 {
                Verdict::Apply(delta)
            } else {
                Verdict::Drop
            }
        }
    }
}

/// Runs list-of-moves local search.
pub struct LmRunner;

impl LmRunner {
    /// Optimizes `tour` to a local optimum.
    ///
    /// Tours with fewer than two nodes are returned unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tourlm::instance::Instance;
    /// use u_tourlm::lm::{LmConfig, LmRunner};
    /// use u_tourlm::tour::Tour;
    ///
    /// let instance = Instance::from_rows(vec![
    ///     [0, 0, 1], [10, 0, 1], [10, 10, 1], [0, 10, 1], [5, 5, 100],
    /// ]);
    /// let result = LmRunner::run(&instance, Tour::new(vec![0, 2, 4], 5), &LmConfig::default());
    /// assert!(result.cost < result.initial_cost);
    /// assert!(!result.tour.contains(4));
    /// ```
    pub fn run(instance: &Instance, tour: Tour, config: &LmConfig) -> LmResult {
        Self::run_with_cancel(instance, tour, config, None)
    }

    /// Optimizes `tour`, stopping early once `cancel` is set.
    pub fn run_with_cancel(
        instance: &Instance,
        tour: Tour,
        config: &LmConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> LmResult {
        LmSearch::new(instance, tour, config).run_with_cancel(cancel)
    }

    /// Optimizes `tour`, drawing first-improvement choices from `rng`.
    pub fn run_with_rng<R: Rng>(
        instance: &Instance,
        tour: Tour,
        config: &LmConfig,
        rng: &mut R,
    ) -> LmResult {
        LmSearch::new(instance, tour, config).run_with(rng, None)
    }
}
