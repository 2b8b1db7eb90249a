//! Construction strategy selection.

use rand::Rng;

use super::builders::{greedy_insertion, greedy_regret, random_tour};
use crate::instance::Instance;
use crate::tour::Tour;

/// Which builder produces the starting tour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// Uniformly random subset in random order.
    #[default]
    Random,
    /// Nearest-node selection with cheapest linear insertion.
    GreedyInsertion,
    /// Greedy 2-regret insertion.
    GreedyRegret,
}

impl Construction {
    /// Whether the builder depends on a start node rather than the RNG.
    pub fn uses_start_node(&self) -> bool {
        !matches!(self, Construction::Random)
    }

    /// Builds a tour of `size` nodes.
    ///
    /// `start` is only read by the greedy builders; `rng` only by
    /// [`Construction::Random`].
    pub fn build<R: Rng>(
        &self,
        instance: &Instance,
        size: usize,
        start: usize,
        rng: &mut R,
    ) -> Tour {
        match self {
            Construction::Random => random_tour(instance, size, rng),
            Construction::GreedyInsertion => greedy_insertion(instance, size, start),
            Construction::GreedyRegret => greedy_regret(instance, size, start),
        }
    }
}
