//! Node and instance data.

/// A point to visit: integer coordinates plus the cost of visiting it.
///
/// The node's identity is its index in the owning [`Instance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub x: i64,
    pub y: i64,
    pub cost: i64,
}

impl Node {
    pub fn new(x: i64, y: i64, cost: i64) -> Self {
        Self { x, y, cost }
    }

    /// Euclidean distance to `other`, rounded to the nearest integer.
    pub fn distance_to(&self, other: &Node) -> i64 {
        let dx = self.x as f64 - other.x as f64;
        let dy = self.y as f64 - other.y as f64;
        (dx * dx + dy * dy).sqrt().round() as i64
    }
}

/// Immutable distance matrix and cost vector for `n` nodes.
///
/// The matrix lives in one contiguous buffer indexed by `i * n + j`.
///
/// # Examples
///
/// ```
/// use u_tourlm::instance::{Instance, Node};
///
/// let instance = Instance::new(vec![
///     Node::new(0, 0, 5),
///     Node::new(3, 4, 7),
/// ]);
/// assert_eq!(instance.len(), 2);
/// assert_eq!(instance.distance(0, 1), 5);
/// assert_eq!(instance.cost(1), 7);
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    n: usize,
    distances: Vec<i64>,
    costs: Vec<i64>,
}

impl Instance {
    /// Builds the instance from its nodes, consuming them.
    pub fn new(nodes: Vec<Node>) -> Self {
        let n = nodes.len();
        let mut distances = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = nodes[i].distance_to(&nodes[j]);
                distances[i * n + j] = d;
                distances[j * n + i] = d;
            }
        }
        let costs = nodes.into_iter().map(|node| node.cost).collect();
        Self {
            n,
            distances,
            costs,
        }
    }

    /// Builds the instance from `[x, y, cost]` rows; row index is node id.
    pub fn from_rows(rows: Vec<[i64; 3]>) -> Self {
        Self::new(
            rows.into_iter()
                .map(|[x, y, cost]| Node::new(x, y, cost))
                .collect(),
        )
    }

    /// Builds an instance from an explicit matrix and cost vector.
    ///
    /// # Panics
    ///
    /// Panics if `distances.len() != costs.len()^2`.
    pub fn from_matrix(distances: Vec<i64>, costs: Vec<i64>) -> Self {
        let n = costs.len();
        assert_eq!(
            distances.len(),
            n * n,
            "distance buffer must hold n*n entries"
        );
        Self {
            n,
            distances,
            costs,
        }
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    pub fn distance(&self, i: usize, j: usize) -> i64 {
        self.distances[i * self.n + j]
    }

    #[inline]
    pub fn cost(&self, i: usize) -> i64 {
        self.costs[i]
    }

    pub fn costs(&self) -> &[i64] {
        &self.costs
    }

    /// The default number of nodes a tour visits: `ceil(n / 2)`.
    pub fn default_tour_size(&self) -> usize {
        self.n.div_ceil(2)
    }
}
