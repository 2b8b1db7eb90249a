//! Tour builders.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::instance::Instance;
use crate::tour::Tour;

/// Shuffles all node ids and keeps the first `size`.
pub fn random_tour<R: Rng>(instance: &Instance, size: usize, rng: &mut R) -> Tour {
    let n = instance.len();
    let mut nodes: Vec<usize> = (0..n).collect();
    nodes.shuffle(rng);
    nodes.truncate(size.min(n));
    Tour::new(nodes, n)
}

/// Nearest-node greedy construction with cheapest linear insertion.
///
/// Starting from `start`, repeatedly picks the unused node with the smallest
/// distance to any current member (ties by cost, then id) and inserts it at
/// the position `0..=len` minimizing `added - removed + cost`. Positions are
/// linear: the ends only add one edge.
///
/// # Panics
///
/// Panics if `start >= n` while `size > 0`.
pub fn greedy_insertion(instance: &Instance, size: usize, start: usize) -> Tour {
    let n = instance.len();
    let size = size.min(n);
    if size == 0 {
        return Tour::empty(n);
    }
    assert!(start < n, "start node {start} out of range for {n} nodes");

    let mut route = Vec::with_capacity(size);
    route.push(start);
    let mut used = vec![false; n];
    used[start] = true;
    let mut nearest: Vec<i64> = (0..n).map(|v| instance.distance(v, start)).collect();

    while route.len() < size {
        let Some(chosen) = (0..n)
            .filter(|&v| !used[v])
            .min_by_key(|&v| (nearest[v], instance.cost(v), v))
        else {
            break;
        };

        let (pos, _) = best_insertions(instance, &route, chosen).0;
        route.insert(pos, chosen);
        used[chosen] = true;
        for v in 0..n {
            nearest[v] = nearest[v].min(instance.distance(v, chosen));
        }
    }

    Tour::new(route, n)
}

/// Greedy 2-regret construction.
///
/// Starting from `start`, every unused node is scored by the difference
/// between its second-best and best linear insertion costs. The node with
/// the largest regret is inserted at its best position; ties go to the
/// smaller best insertion cost, then the smaller id.
///
/// # Panics
///
/// Panics if `start >= n` while `size > 0`.
pub fn greedy_regret(instance: &Instance, size: usize, start: usize) -> Tour {
    let n = instance.len();
    let size = size.min(n);
    if size == 0 {
        return Tour::empty(n);
    }
    assert!(start < n, "start node {start} out of range for {n} nodes");

    let mut route = Vec::with_capacity(size);
    route.push(start);
    let mut used = vec![false; n];
    used[start] = true;

    while route.len() < size {
        let mut chosen: Option<(usize, usize)> = None;
        let mut max_regret = i64::MIN;
        let mut chosen_cost = i64::MAX;

        for v in (0..n).filter(|&v| !used[v]) {
            let ((pos, best), second) = best_insertions(instance, &route, v);
            let regret = second.map_or(best, |s| s - best);
            if regret > max_regret || (regret == max_regret && best < chosen_cost) {
                max_regret = regret;
                chosen_cost = best;
                chosen = Some((v, pos));
            }
        }

        let Some((v, pos)) = chosen else {
            break;
        };
        route.insert(pos, v);
        used[v] = true;
    }

    Tour::new(route, n)
}

/// Cost of inserting `node` before index `pos` of the open path `route`.
fn insertion_cost(instance: &Instance, route: &[usize], pos: usize, node: usize) -> i64 {
    let mut added = 0;
    let mut removed = 0;
    if pos > 0 {
        added += instance.distance(route[pos - 1], node);
    }
    if pos < route.len() {
        added += instance.distance(node, route[pos]);
    }
    if pos > 0 && pos < route.len() {
        removed = instance.distance(route[pos - 1], route[pos]);
    }
    instance.cost(node) + added - removed
}

/// Best `(position, cost)` for `node` and the second-best cost, if any.
///
/// Ties keep the lowest position.
fn best_insertions(
    instance: &Instance,
    route: &[usize],
    node: usize,
) -> ((usize, i64), Option<i64>) {
    let mut best = (0, i64::MAX);
    let mut second: Option<i64> = None;
    for pos in 0..=route.len() {
        let cost = insertion_cost(instance, route, pos, node);
        if cost < best.1 {
            if best.1 != i64::MAX {
                second = Some(best.1);
            }
            best = (pos, cost);
        } else if second.is_none_or(|s| cost < s) {
            second = Some(cost);
        }
    }
    (best, second)
}
