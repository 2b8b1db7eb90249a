//! Move representation.

/// Which move kinds the search may use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveSet {
    /// 2-opt edge exchanges only; the visited subset never changes.
    TwoOpt,
    /// 2-opt edge exchanges and in/out node replacements.
    #[default]
    TwoOptAndReplacement,
    /// Swaps of two visited nodes' positions and in/out node replacements.
    ExchangeAndReplacement,
    /// Every move kind.
    All,
}

impl MoveSet {
    pub fn allows_two_opt(&self) -> bool {
        !matches!(self, MoveSet::ExchangeAndReplacement)
    }

    pub fn allows_exchange(&self) -> bool {
        matches!(self, MoveSet::ExchangeAndReplacement | MoveSet::All)
    }

    pub fn allows_replacement(&self) -> bool {
        !matches!(self, MoveSet::TwoOpt)
    }
}

/// A proposed tour modification with its delta at generation time.
///
/// Negative deltas improve the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Move {
    /// Break `(u, u_next)` and `(v, v_next)`, both recorded in forward
    /// direction; add `(u, v)` and `(u_next, v_next)`.
    TwoOpt {
        delta: i64,
        u: usize,
        u_next: usize,
        v: usize,
        v_next: usize,
    },
    /// Put `insert` where `remove` is. `prev` and `next` are the neighbours
    /// of `remove` when the move was generated.
    Replace {
        delta: i64,
        remove: usize,
        insert: usize,
        prev: usize,
        next: usize,
    },
    /// Swap the tour positions of visited nodes `a` and `b`.
    Exchange { delta: i64, a: usize, b: usize },
}

impl Move {
    #[inline]
    pub fn delta(&self) -> i64 {
        match *self {
            Move::TwoOpt { delta, .. }
            | Move::Replace { delta, .. }
            | Move::Exchange { delta, .. } => delta,
        }
    }

    /// Same move with a refreshed delta.
    pub fn with_delta(self, new_delta: i64) -> Self {
        match self {
            Move::TwoOpt {
                u,
                u_next,
                v,
                v_next,
                ..
            } => Move::TwoOpt {
                delta: new_delta,
                u,
                u_next,
                v,
                v_next,
            },
            Move::Replace {
                remove,
                insert,
                prev,
                next,
                ..
            } => Move::Replace {
                delta: new_delta,
                remove,
                insert,
                prev,
                next,
            },
            Move::Exchange { a, b, .. } => Move::Exchange {
                delta: new_delta,
                a,
                b,
            },
        }
    }

    pub fn is_two_opt(&self) -> bool {
        matches!(self, Move::TwoOpt { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_set_default() {
        assert_eq!(MoveSet::default(), MoveSet::TwoOptAndReplacement);
        assert!(MoveSet::TwoOptAndReplacement.allows_replacement());
        assert!(!MoveSet::TwoOpt.allows_replacement());
        assert!(MoveSet::TwoOpt.allows_two_opt());
        assert!(!MoveSet::TwoOpt.allows_exchange());
    }

    #[test]
    fn test_move_set_exchange_variants() {
        let exchange = MoveSet::ExchangeAndReplacement;
        assert!(!exchange.allows_two_opt());
        assert!(exchange.allows_exchange());
        assert!(exchange.allows_replacement());
        let all = MoveSet::All;
        assert!(all.allows_two_opt() && all.allows_exchange() && all.allows_replacement());
    }

    #[test]
    fn test_with_delta_keeps_nodes() {
        let mv = Move::Replace {
            delta: -5,
            remove: 1,
            insert: 7,
            prev: 0,
            next: 2,
        };
        let refreshed = mv.with_delta(-2);
        assert_eq!(refreshed.delta(), -2);
        assert_eq!(
            refreshed,
            Move::Replace {
                delta: -2,
                remove: 1,
                insert: 7,
                prev: 0,
                next: 2
            }
        );
        assert!(!refreshed.is_two_opt());

        let two_opt = Move::TwoOpt {
            delta: -1,
            u: 0,
            u_next: 1,
            v: 3,
            v_next: 4,
        };
        assert_eq!(two_opt.with_delta(-9).delta(), -9);
        assert!(two_opt.is_two_opt());

        let exchange = Move::Exchange { delta: -4, a: 2, b: 6 };
        assert_eq!(exchange.with_delta(-1), Move::Exchange { delta: -1, a: 2, b: 6 });
    }
}
