//! Local search for the selective travelling salesman problem.
//!
//! Given `n` nodes with planar coordinates and visit costs, find a closed
//! tour over exactly `k` of them (by default `ceil(n / 2)`) minimizing the
//! sum of visit costs plus tour length.
//!
//! - **instance**: nodes, the rounded Euclidean distance matrix and a
//!   `;`-separated text loader.
//! - **tour**: the visiting sequence with a node position index, and the
//!   objective evaluator.
//! - **construct**: random, greedy insertion and greedy 2-regret starting
//!   tours.
//! - **moves**: 2-opt, node replacement and node exchange moves, their
//!   deltas, full and incremental neighbourhood scans, and optional
//!   candidate lists.
//! - **lm**: list-of-moves steepest descent that reuses improving moves
//!   between iterations, or randomized first-improvement descent.
//! - **restart**: a multi-start harness with best/worst/average statistics.
//!
//! # Example
//!
//! ```
//! use u_tourlm::construct::Construction;
//! use u_tourlm::instance::Instance;
//! use u_tourlm::restart::{RestartConfig, RestartRunner};
//!
//! let instance = Instance::parse("0;0;5\n10;0;1\n10;10;2\n0;10;8\n").unwrap();
//! let config = RestartConfig::default()
//!     .with_runs(4)
//!     .with_construction(Construction::GreedyInsertion)
//!     .with_seed(42);
//! let result = RestartRunner::run(&instance, &config);
//! assert_eq!(result.best.len(), 2);
//! assert_eq!(result.best_cost, result.best.cost(&instance));
//! ```

pub mod construct;
pub mod instance;
pub mod lm;
pub mod moves;
pub mod restart;
pub mod tour;
