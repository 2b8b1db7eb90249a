//! Improving-move enumeration.
//!
//! The full scan looks at every pair of non-adjacent tour edges, every pair
//! of visited nodes and every (visited, unvisited) node pair. The incremental scan only re-derives
//! moves involving a handful of changed nodes, which bounds the work per
//! applied move to O(n). It can miss moves that became improving without
//! touching a changed node; the optimizer compensates with lazy
//! re-validation and an optional confirming full scan.

use super::candidates::CandidateLists;
use super::types::{Move, MoveSet};
use crate::instance::Instance;
use crate::tour::Tour;

/// Delta of exchanging `(u, u_next), (v, v_next)` for `(u, v), (u_next, v_next)`.
#[inline]
pub fn two_opt_delta(instance: &Instance, u: usize, u_next: usize, v: usize, v_next: usize) -> i64 {
    instance.distance(u, v) + instance.distance(u_next, v_next)
        - instance.distance(u, u_next)
        - instance.distance(v, v_next)
}

/// Delta of putting `insert` at sequence index `idx` of `tour`, against the
/// node's current neighbours.
#[inline]
pub fn replacement_delta(instance: &Instance, tour: &Tour, idx: usize, insert: usize) -> i64 {
    let remove = tour.at(idx);
    if tour.len() == 1 {
        return instance.cost(insert) - instance.cost(remove);
    }
    let prev = tour.prev_of(idx);
    let next = tour.next_of(idx);
    (instance.distance(prev, insert) + instance.distance(insert, next) + instance.cost(insert))
        - (instance.distance(prev, remove) + instance.distance(remove, next) + instance.cost(remove))
}

/// Delta of swapping the nodes at sequence indices `i` and `j` of `tour`.
///
/// Visit costs are unchanged, so only the edges around both positions
/// count. On tours of three nodes or fewer every swap is a reflection of
/// the cycle and the delta is zero.
#[inline]
pub fn node_exchange_delta(instance: &Instance, tour: &Tour, i: usize, j: usize) -> i64 {
    let k = tour.len();
    if i == j || k <= 3 {
        return 0;
    }
    let d = |x: usize, y: usize| instance.distance(x, y);
    let (a, b) = (tour.at(i), tour.at(j));
    if (i + 1) % k == j {
        let (p, n) = (tour.prev_of(i), tour.next_of(j));
        return d(p, b) + d(a, n) - d(p, a) - d(b, n);
    }
    if (j + 1) % k == i {
        let (p, n) = (tour.prev_of(j), tour.next_of(i));
        return d(p, a) + d(b, n) - d(p, b) - d(a, n);
    }
    let (pa, na) = (tour.prev_of(i), tour.next_of(i));
    let (pb, nb) = (tour.prev_of(j), tour.next_of(j));
    d(pa, b) + d(b, na) + d(pb, a) + d(a, nb) - d(pa, a) - d(a, na) - d(pb, b) - d(b, nb)
}

/// Enumerates strictly improving moves for a tour.
///
/// # Examples
///
/// ```
/// use u_tourlm::instance::Instance;
/// use u_tourlm::moves::{MoveGenerator, MoveSet};
/// use u_tourlm::tour::Tour;
///
/// // a crossed square
/// let instance = Instance::from_rows(vec![[0, 0, 0], [10, 0, 0], [10, 10, 0], [0, 10, 0]]);
/// let tour = Tour::new(vec![0, 2, 1, 3], 4);
/// let moves = MoveGenerator::new(&instance, MoveSet::TwoOpt).full_scan(&tour);
/// assert_eq!(moves.len(), 1);
/// assert_eq!(moves[0].delta(), -8);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct MoveGenerator<'a> {
    instance: &'a Instance,
    move_set: MoveSet,
    candidates: Option<&'a CandidateLists>,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(instance: &'a Instance, move_set: MoveSet) -> Self {
        Self {
            instance,
            move_set,
            candidates: None,
        }
    }

    /// Restricts generation to moves that add at least one candidate edge.
    pub fn with_candidates(mut self, candidates: Option<&'a CandidateLists>) -> Self {
        self.candidates = candidates;
        self
    }

    /// Full scan when `changed` is `None`, incremental scan otherwise.
    pub fn generate(&self, tour: &Tour, changed: Option<&[usize]>) -> Vec<Move> {
        match changed {
            None => self.full_scan(tour),
            Some(nodes) => self.incremental_scan(tour, nodes),
        }
    }

    /// Every improving move of the configured move set.
    pub fn full_scan(&self, tour: &Tour) -> Vec<Move> {
        let k = tour.len();
        let mut out = Vec::new();
        if k >= 4 && self.move_set.allows_two_opt() {
            for i in 0..k {
                for j in (i + 2)..k {
                    // edges 0 and k-1 share the wrap-around node
                    if i == 0 && j == k - 1 {
                        continue;
                    }
                    self.push_two_opt(tour, i, j, &mut out);
                }
            }
        }
        if k >= 4 && self.move_set.allows_exchange() {
            for i in 0..k {
                for j in (i + 1)..k {
                    self.push_exchange(tour, i, j, &mut out);
                }
            }
        }
        if self.move_set.allows_replacement() {
            for idx in 0..k {
                self.push_removals(tour, idx, &mut out);
            }
        }
        out
    }

    /// Improving moves involving at least one of `changed`.
    ///
    /// A visited node contributes 2-opt moves pairing each of its two tour
    /// edges with every non-adjacent edge, exchanges with every other
    /// visited node, plus replacements removing it.
    /// An unvisited node contributes replacements inserting it at every
    /// position. Duplicate ids in `changed` are scanned once.
    pub fn incremental_scan(&self, tour: &Tour, changed: &[usize]) -> Vec<Move> {
        let k = tour.len();
        let mut out = Vec::new();
        if k == 0 {
            return out;
        }
        for (i, &node) in changed.iter().enumerate() {
            if changed[..i].contains(&node) {
                continue;
            }
            match tour.position(node) {
                Some(idx) => {
                    if k >= 4 && self.move_set.allows_two_opt() {
                        for edge in [(idx + k - 1) % k, idx] {
                            for other in 0..k {
                                if adjacent(edge, other, k) {
                                    continue;
                                }
                                self.push_two_opt(tour, edge, other, &mut out);
                            }
                        }
                    }
                    if k >= 4 && self.move_set.allows_exchange() {
                        for other in (0..k).filter(|&other| other != idx) {
                            self.push_exchange(tour, idx, other, &mut out);
                        }
                    }
                    if self.move_set.allows_replacement() {
                        self.push_removals(tour, idx, &mut out);
                    }
                }
                None => {
                    if self.move_set.allows_replacement() {
                        for idx in 0..k {
                            self.push_replacement(tour, idx, node, &mut out);
                        }
                    }
                }
            }
        }
        out
    }

    /// 2-opt between the edges starting at sequence indices `i` and `j`.
    fn push_two_opt(&self, tour: &Tour, i: usize, j: usize, out: &mut Vec<Move>) {
        let (u, u_next) = (tour.at(i), tour.next_of(i));
        let (v, v_next) = (tour.at(j), tour.next_of(j));
        let delta = two_opt_delta(self.instance, u, u_next, v, v_next);
        if delta >= 0 {
            return;
        }
        if let Some(lists) = self.candidates {
            if !lists.is_candidate_edge(u, v) && !lists.is_candidate_edge(u_next, v_next) {
                return;
            }
        }
        out.push(Move::TwoOpt {
            delta,
            u,
            u_next,
            v,
            v_next,
        });
    }

    /// Swap of the nodes at indices `i` and `j`.
    fn push_exchange(&self, tour: &Tour, i: usize, j: usize, out: &mut Vec<Move>) {
        let delta = node_exchange_delta(self.instance, tour, i, j);
        if delta >= 0 {
            return;
        }
        let (a, b) = (tour.at(i), tour.at(j));
        if let Some(lists) = self.candidates {
            let admissible = lists.is_candidate_edge(tour.prev_of(i), b)
                || lists.is_candidate_edge(tour.next_of(i), b)
                || lists.is_candidate_edge(tour.prev_of(j), a)
                || lists.is_candidate_edge(tour.next_of(j), a);
            if !admissible {
                return;
            }
        }
        out.push(Move::Exchange { delta, a, b });
    }

    /// Replacements of the node at `idx` by every unvisited node.
    fn push_removals(&self, tour: &Tour, idx: usize, out: &mut Vec<Move>) {
        for insert in 0..self.instance.len() {
            if !tour.contains(insert) {
                self.push_replacement(tour, idx, insert, out);
            }
        }
    }

    fn push_replacement(&self, tour: &Tour, idx: usize, insert: usize, out: &mut Vec<Move>) {
        let delta = replacement_delta(self.instance, tour, idx, insert);
        if delta >= 0 {
            return;
        }
        let prev = tour.prev_of(idx);
        let next = tour.next_of(idx);
        if let Some(lists) = self.candidates {
            if !lists.contains(prev, insert) && !lists.contains(next, insert) {
                return;
            }
        }
        out.push(Move::Replace {
            delta,
            remove: tour.at(idx),
            insert,
            prev,
            next,
        });
    }
}

/// Whether the tour edges starting at `a` and `b` share a node.
#[inline]
fn adjacent(a: usize, b: usize, k: usize) -> bool {
    a == b || (a + 1) % k == b || (b + 1) % k == a
}
