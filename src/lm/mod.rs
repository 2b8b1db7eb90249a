//! List-of-moves (LM) local search.
//!
//! A steepest-descent variant that keeps every known improving move in a
//! list sorted by delta instead of rescanning the whole neighbourhood
//! after each step. Listed moves can go stale as the tour changes, so each
//! one is re-checked against the current tour before it is applied. After
//! a move, only the neighbourhood around the nodes it touched is rescanned
//! and merged back into the list.
//!
//! [`Descent::FirstImprovement`] replaces the list with a fresh scan per
//! iteration and applies a random improving move instead of the best one.
//!
//! # References
//!
//! - Croes (1958), "A Method for Solving Traveling-Salesman Problems"
//! - Bentley (1992), "Fast Algorithms for Geometric Traveling Salesman Problems"

mod config;
mod list;
mod runner;

pub use config::{Descent, LmConfig, ScanMode};
pub use list::{MoveList, PassStats, Verdict};
pub use runner::{AppliedMove, LmResult, LmRunner, LmSearch};
