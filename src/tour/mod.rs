//! Tours: ordered, duplicate-free node subsets read as closed cycles.
//!
//! A [`Tour`] keeps the visiting sequence together with a position index
//! (`node -> index in the sequence`, or absent). Every mutation goes
//! through methods that update both, so the index never drifts from the
//! sequence.
//!
//! The objective of a tour is the sum of its nodes' visit costs plus the
//! length of the closed cycle. The wrap-around edge from the last node back
//! to the first is always counted; for a single-node tour it is the
//! self-distance, zero.

mod evaluate;
mod types;

pub use evaluate::evaluate;
pub use types::{Orientation, Tour};
