//! Problem instances: node coordinates, visit costs and the derived
//! distance matrix.
//!
//! An [`Instance`] is built once and then only read. Every other module
//! borrows it; the search never mutates it.
//!
//! Distances are Euclidean distances between integer coordinates, rounded
//! to the nearest integer. The matrix is symmetric with a zero diagonal.

mod loader;
mod types;

pub use loader::InstanceError;
pub use types::{Instance, Node};
