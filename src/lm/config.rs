//! List-of-moves search configuration.

use crate::moves::MoveSet;

/// How the move list is refreshed after a move is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScanMode {
    /// Merge in moves re-derived around the changed nodes.
    #[default]
    Incremental,
    /// Rebuild the list from a full neighbourhood scan (plain steepest
    /// descent).
    Full,
}

/// Which improving move each iteration applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Descent {
    /// Best listed move first, driven by the sorted move list.
    #[default]
    Steepest,
    /// A uniformly random improving move from a fresh full scan.
    ///
    /// Equivalent to browsing the neighbourhood in shuffled order and
    /// taking the first improvement. Ignores `scan` and
    /// `confirm_with_full_scan`; draws from the RNG handed to the search.
    FirstImprovement,
}

/// Configuration for the list-of-moves local search.
///
/// # Examples
///
/// ```
/// use u_tourlm::lm::{LmConfig, ScanMode};
/// use u_tourlm::moves::MoveSet;
///
/// let config = LmConfig::default()
///     .with_move_set(MoveSet::TwoOpt)
///     .with_scan(ScanMode::Full)
///     .with_candidate_neighbors(10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LmConfig {
    /// Move kinds the search may apply.
    pub move_set: MoveSet,

    /// Steepest or first-improvement move choice.
    pub descent: Descent,

    /// List refresh strategy after each applied move.
    pub scan: ScanMode,

    /// When the incremental list runs dry, run one full scan before
    /// declaring a local optimum.
    ///
    /// Without it the result is only approximately locally optimal: the
    /// incremental scan can miss moves that never touch a changed node.
    pub confirm_with_full_scan: bool,

    /// Keep only moves that add an edge to one of the `k` nearest
    /// (distance + cost) neighbours. `None` disables the filter.
    pub candidate_neighbors: Option<usize>,

    /// Maximum number of applied moves. 0 = no limit.
    pub max_iterations: usize,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            move_set: MoveSet::default(),
            descent: Descent::default(),
            scan: ScanMode::default(),
            confirm_with_full_scan: true,
            candidate_neighbors: None,
            max_iterations: 0,
        }
    }
}

impl LmConfig {
    pub fn with_move_set(mut self, move_set: MoveSet) -> Self {
        self.move_set = move_set;
        self
    }

    pub fn with_descent(mut self, descent: Descent) -> Self {
        self.descent = descent;
        self
    }

    pub fn with_scan(mut self, scan: ScanMode) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_confirm_with_full_scan(mut self, confirm: bool) -> Self {
        self.confirm_with_full_scan = confirm;
        self
    }

    pub fn with_candidate_neighbors(mut self, k: usize) -> Self {
        self.candidate_neighbors = Some(k);
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.candidate_neighbors == Some(0) {
            return Err("candidate_neighbors must be at least 1".into());
        }
        Ok(())
    }
}
