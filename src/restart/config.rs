//! Multi-start configuration.

use crate::construct::Construction;
use crate::lm::LmConfig;

/// Configuration for repeated construct-then-optimize runs.
///
/// # Examples
///
/// ```
/// use u_tourlm::construct::Construction;
/// use u_tourlm::restart::RestartConfig;
///
/// let config = RestartConfig::default()
///     .with_runs(50)
///     .with_construction(Construction::GreedyInsertion)
///     .with_seed(7);
/// assert_eq!(config.runs, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestartConfig {
    /// Number of independent restarts.
    pub runs: usize,

    /// Builder for each restart's starting tour.
    pub construction: Construction,

    /// Nodes per tour. `None` visits `ceil(n / 2)`; larger values are
    /// clamped to `n`.
    pub tour_size: Option<usize>,

    /// Local search settings shared by every restart.
    pub search: LmConfig,

    /// Base random seed; restart `r` uses `seed + r`. `None` draws one.
    pub seed: Option<u64>,

    /// Distribute restarts over the rayon pool.
    ///
    /// Only honoured with the `parallel` feature.
    pub parallel: bool,

    /// Wall-clock budget in milliseconds, checked before each restart.
    pub time_limit_ms: Option<u64>,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            runs: 200,
            construction: Construction::default(),
            tour_size: None,
            search: LmConfig::default(),
            seed: None,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl RestartConfig {
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    pub fn with_construction(mut self, construction: Construction) -> Self {
        self.construction = construction;
        self
    }

    pub fn with_tour_size(mut self, size: usize) -> Self {
        self.tour_size = Some(size);
        self
    }

    pub fn with_search(mut self, search: LmConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.runs == 0 {
            return Err("runs must be positive".into());
        }
        if self.tour_size == Some(0) {
            return Err("tour_size must be positive".into());
        }
        self.search.validate()
    }
}
