//! Initial tour construction.
//!
//! Three strategies produce the starting point of a local search run:
//!
//! - **Random**: shuffle all node ids and keep the first `k`.
//! - **Greedy insertion**: grow from a start node, always taking the
//!   unused node closest to the partial tour and inserting it where it is
//!   cheapest.
//! - **Greedy 2-regret**: grow from a start node, always taking the node
//!   whose best insertion is most clearly better than its second best.
//!
//! Every builder returns a [`Tour`](crate::tour::Tour) of exactly
//! `min(k, n)` distinct nodes, or an empty tour when `k` or `n` is zero.

mod builders;
mod config;

pub use builders::{greedy_insertion, greedy_regret, random_tour};
pub use config::Construction;
