//! Multi-start harness.
//!
//! Runs many independent construct-then-optimize restarts and keeps the
//! best, worst and average objective. Restarts share only the read-only
//! [`Instance`](crate::instance::Instance) and candidate lists, so with the
//! `parallel` feature they run on the rayon pool with identical results.

mod config;
mod runner;

pub use config::RestartConfig;
pub use runner::{RestartResult, RestartRunner};
