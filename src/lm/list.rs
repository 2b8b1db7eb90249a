//! The sorted list of known improving moves.

use crate::moves::Move;

/// Outcome of re-checking a listed move against the current tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The move no longer applies; remove it.
    Drop,
    /// Not applicable right now but may become so; leave it in place.
    Keep,
    /// Apply the move with this (possibly refreshed) delta.
    Apply(i64),
}

/// Counters from one [`MoveList::take_first`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub dropped: usize,
    pub kept: usize,
}

/// Moves in ascending delta order (best first).
///
/// Ordering is stable: among equal deltas, moves already in the list come
/// before merged ones, and merged moves keep their generation order.
#[derive(Debug, Clone, Default)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from unsorted moves.
    pub fn from_moves(mut moves: Vec<Move>) -> Self {
        moves.sort_by_key(Move::delta);
        Self { moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Sorts `incoming` and merges it in, keeping the whole list ordered.
    pub fn merge(&mut self, mut incoming: Vec<Move>) {
        if incoming.is_empty() {
            return;
        }
        incoming.sort_by_key(Move::delta);
        if self.moves.is_empty() {
            self.moves = incoming;
            return;
        }

        let old = std::mem::take(&mut self.moves);
        let mut merged = Vec::with_capacity(old.len() + incoming.len());
        let mut a = old.into_iter().peekable();
        let mut b = incoming.into_iter().peekable();
        loop {
            let take_old = match (a.peek(), b.peek()) {
                (Some(x), Some(y)) => x.delta() <= y.delta(),
                (Some(_), None) => true,
                (None, Some(_)) => false,
                (None, None) => break,
            };
            let next = if take_old { a.next() } else { b.next() };
            merged.extend(next);
        }
        self.moves = merged;
    }

    /// Walks the list best-first, judging each move with `judge`.
    ///
    /// Dropped moves are removed, kept moves stay in order, and the first
    /// move judged [`Verdict::Apply`] is removed and returned with its
    /// refreshed delta. Moves after it are not examined.
    pub fn take_first<F>(&mut self, mut judge: F) -> (Option<Move>, PassStats)
    where
        F: FnMut(&Move) -> Verdict,
    {
        let mut stats = PassStats::default();
        let mut taken = None;
        let mut write = 0;
        let mut read = 0;

        while read < self.moves.len() {
            let mv = self.moves[read];
            read += 1;
            match judge(&mv) {
                Verdict::Drop => stats.dropped += 1,
                Verdict::Keep => {
                    stats.kept += 1;
                    self.moves[write] = mv;
                    write += 1;
                }
                Verdict::Apply(delta) => {
                    taken = Some(mv.with_delta(delta));
                    break;
                }
            }
        }

        self.moves.drain(write..read);
        (taken, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swap(delta: i64, tag: usize) -> Move {
        Move::Replace {
            delta,
            remove: tag,
            insert: tag + 100,
            prev: 0,
            next: 0,
        }
    }

    fn tags(list: &MoveList) -> Vec<usize> {
        list.as_slice()
            .iter()
            .map(|m| match *m {
                Move::Replace { remove, .. } => remove,
                Move::TwoOpt { u, .. } => u,
                Move::Exchange { a, .. } => a,
            })
            .collect()
    }

    #[test]
    fn test_from_moves_sorted_stable() {
        let list = MoveList::from_moves(vec![swap(-1, 1), swap(-5, 2), swap(-1, 3), swap(-5, 4)]);
        assert_eq!(tags(&list), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_merge_keeps_order_old_first_on_ties() {
        let mut list = MoveList::from_moves(vec![swap(-7, 1), swap(-3, 2), swap(-1, 3)]);
        list.merge(vec![swap(-3, 10), swap(-9, 11), swap(0, 12)]);
        assert_eq!(tags(&list), vec![11, 1, 2, 10, 3, 12]);
        let deltas: Vec<i64> = list.as_slice().iter().map(Move::delta).collect();
        assert!(deltas.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_merge_into_empty() {
        let mut list = MoveList::new();
        list.merge(vec![swap(-1, 1), swap(-2, 2)]);
        assert_eq!(tags(&list), vec![2, 1]);
        list.merge(Vec::new());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_take_first_drops_keeps_and_applies() {
        let mut list = MoveList::from_moves(vec![
            swap(-9, 1),
            swap(-8, 2),
            swap(-7, 3),
            swap(-6, 4),
            swap(-5, 5),
        ]);
        let (taken, stats) = list.take_first(|m| match *m {
            Move::Replace { remove: 1, .. } => Verdict::Drop,
            Move::Replace { remove: 2, .. } => Verdict::Keep,
            Move::Replace { remove: 3, .. } => Verdict::Apply(-4),
            _ => panic!("moves after the applied one must not be judged"),
        });
        assert_eq!(taken.map(|m| m.delta()), Some(-4));
        assert_eq!(stats, PassStats { dropped: 1, kept: 1 });
        assert_eq!(tags(&list), vec![2, 4, 5]);
    }

    #[test]
    fn test_take_first_exhausts_without_apply() {
        let mut list = MoveList::from_moves(vec![swap(-3, 1), swap(-2, 2), swap(-1, 3)]);
        let (taken, stats) = list.take_first(|m| match *m {
            Move::Replace { remove: 2, .. } => Verdict::Keep,
            _ => Verdict::Drop,
        });
        assert!(taken.is_none());
        assert_eq!(stats, PassStats { dropped: 2, kept: 1 });
        assert_eq!(tags(&list), vec![2]);
    }
}
