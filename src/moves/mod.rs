//! Local-search moves and their generation.
//!
//! Three move kinds are supported:
//!
//! - **2-opt edge exchange**: drop edges `(u, u_next)` and `(v, v_next)`,
//!   reconnect as `(u, v)` and `(u_next, v_next)`, reversing the segment
//!   between them.
//! - **Node replacement**: swap a visited node for an unvisited one at the
//!   same position.
//! - **Node exchange**: swap the positions of two visited nodes.
//!
//! A [`Move`] records the nodes it touches and its objective delta at the
//! time it was generated. It is a proposal only: once other moves have
//! been applied it may be stale, and the optimizer re-checks it before use.
//!
//! [`MoveGenerator`] produces improving moves either by scanning the whole
//! neighbourhood or only the part around a set of recently changed nodes.
//! [`CandidateLists`] optionally narrow both scans to moves that create at
//! least one short edge.

mod candidates;
mod generator;
mod types;

pub use candidates::CandidateLists;
pub use generator::{node_exchange_delta, replacement_delta, two_opt_delta, MoveGenerator};
pub use types::{Move, MoveSet};
