//! The tour representation and its structural operations.

use crate::instance::Instance;

use super::evaluate::evaluate;

const ABSENT: usize = usize::MAX;

/// Direction in which an edge `(a, b)` is traversed by the current tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// `b` directly follows `a`.
    Forward,
    /// `b` directly precedes `a`.
    Reversed,
}

/// A closed cycle over a subset of an instance's nodes.
///
/// # Examples
///
/// ```
/// use u_tourlm::tour::{Orientation, Tour};
///
/// let mut tour = Tour::new(vec![4, 0, 2], 5);
/// assert_eq!(tour.position(2), Some(2));
/// assert_eq!(tour.position(1), None);
/// assert_eq!(tour.orientation(2, 4), Some(Orientation::Forward));
///
/// let removed = tour.replace(1, 3);
/// assert_eq!(removed, 0);
/// assert_eq!(tour.nodes(), &[4, 3, 2]);
/// assert!(tour.is_consistent());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    nodes: Vec<usize>,
    positions: Vec<usize>,
}

impl Tour {
    /// Creates a tour visiting `nodes` in order, out of `node_count` nodes.
    ///
    /// # Panics
    ///
    /// Panics if a node id is `>= node_count` or appears twice.
    pub fn new(nodes: Vec<usize>, node_count: usize) -> Self {
        let mut positions = vec![ABSENT; node_count];
        for (idx, &node) in nodes.iter().enumerate() {
            assert!(
                node < node_count,
                "node {node} out of range for {node_count} nodes"
            );
            assert!(positions[node] == ABSENT, "node {node} appears twice");
            positions[node] = idx;
        }
        Self { nodes, positions }
    }

    /// An empty tour over `node_count` nodes.
    pub fn empty(node_count: usize) -> Self {
        Self {
            nodes: Vec::new(),
            positions: vec![ABSENT; node_count],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes in the instance this tour draws from.
    pub fn node_count(&self) -> usize {
        self.positions.len()
    }

    pub fn nodes(&self) -> &[usize] {
        &self.nodes
    }

    /// Node at sequence index `idx`.
    #[inline]
    pub fn at(&self, idx: usize) -> usize {
        self.nodes[idx]
    }

    /// Node following sequence index `idx` around the cycle.
    #[inline]
    pub fn next_of(&self, idx: usize) -> usize {
        self.nodes[(idx + 1) % self.nodes.len()]
    }

    /// Node preceding sequence index `idx` around the cycle.
    #[inline]
    pub fn prev_of(&self, idx: usize) -> usize {
        let k = self.nodes.len();
        self.nodes[(idx + k - 1) % k]
    }

    /// Sequence index of `node`, or `None` when it is not visited.
    #[inline]
    pub fn position(&self, node: usize) -> Option<usize> {
        match self.positions[node] {
            ABSENT => None,
            idx => Some(idx),
        }
    }

    #[inline]
    pub fn contains(&self, node: usize) -> bool {
        self.positions[node] != ABSENT
    }

    /// How the current cycle traverses the edge `{a, b}`, or `None` when the
    /// edge does not exist.
    pub fn orientation(&self, a: usize, b: usize) -> Option<Orientation> {
        let (ia, ib) = (self.position(a)?, self.position(b)?);
        let k = self.nodes.len();
        if (ia + 1) % k == ib {
            Some(Orientation::Forward)
        } else if (ib + 1) % k == ia {
            Some(Orientation::Reversed)
        } else {
            None
        }
    }

    /// Reverses the circular segment running forward from index `from` to
    /// index `to` (both inclusive, wrapping past the end if `from > to`).
    pub fn reverse_segment(&mut self, from: usize, to: usize) {
        let k = self.nodes.len();
        if k == 0 {
            return;
        }
        let (mut i, mut j) = (from % k, to % k);
        let span = if i <= j { j - i + 1 } else { k - i + j + 1 };
        for _ in 0..span / 2 {
            self.nodes.swap(i, j);
            self.positions[self.nodes[i]] = i;
            self.positions[self.nodes[j]] = j;
            i = (i + 1) % k;
            j = (j + k - 1) % k;
        }
    }

    /// Puts `node` at index `idx` and returns the node it displaced.
    ///
    /// # Panics
    ///
    /// Panics if `node` is already in the tour.
    pub fn replace(&mut self, idx: usize, node: usize) -> usize {
        assert!(!self.contains(node), "node {node} already in tour");
        let removed = std::mem::replace(&mut self.nodes[idx], node);
        self.positions[removed] = ABSENT;
        self.positions[node] = idx;
        removed
    }

    /// Exchanges the nodes at indices `i` and `j`.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.nodes.swap(i, j);
        self.positions[self.nodes[i]] = i;
        self.positions[self.nodes[j]] = j;
    }

    /// Objective value of this tour.
    pub fn cost(&self, instance: &Instance) -> i64 {
        evaluate(instance, &self.nodes)
    }

    /// Checks that the position index matches the sequence exactly.
    pub fn is_consistent(&self) -> bool {
        let indexed = self.nodes.iter().enumerate().all(|(idx, &node)| {
            node < self.positions.len() && self.positions[node] == idx
        });
        let visited = self.positions.iter().filter(|&&p| p != ABSENT).count();
        indexed && visited == self.nodes.len()
    }
}
