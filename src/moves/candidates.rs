//! Candidate neighbour lists.

use crate::instance::Instance;

/// For each node, the `k` other nodes with the smallest
/// `distance(u, v) + cost(v)`.
///
/// # Examples
///
/// ```
/// use u_tourlm::instance::Instance;
/// use u_tourlm::moves::CandidateLists;
///
/// let instance = Instance::from_rows(vec![[0, 0, 0], [1, 0, 0], [50, 0, 0]]);
/// let lists = CandidateLists::build(&instance, 1);
/// assert_eq!(lists.neighbors(0), &[1]);
/// assert!(lists.contains(2, 1));
/// assert!(!lists.contains(0, 2));
/// ```
#[derive(Debug, Clone)]
pub struct CandidateLists {
    n: usize,
    k: usize,
    lists: Vec<usize>,
    member: Vec<bool>,
}

impl CandidateLists {
    /// Builds lists of length `min(k, n - 1)`; ties are broken by node id.
    pub fn build(instance: &Instance, k: usize) -> Self {
        let n = instance.len();
        let k = k.min(n.saturating_sub(1));
        let mut lists = Vec::with_capacity(n * k);
        let mut member = vec![false; n * n];
        let mut scratch: Vec<(i64, usize)> = Vec::with_capacity(n);

        for u in 0..n {
            scratch.clear();
            scratch.extend(
                (0..n)
                    .filter(|&v| v != u)
                    .map(|v| (instance.distance(u, v) + instance.cost(v), v)),
            );
            scratch.sort_unstable();
            for &(_, v) in &scratch[..k] {
                lists.push(v);
                member[u * n + v] = true;
            }
        }

        Self {
            n,
            k,
            lists,
            member,
        }
    }

    /// List length actually used.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn neighbors(&self, u: usize) -> &[usize] {
        &self.lists[u * self.k..(u + 1) * self.k]
    }

    /// Whether `v` is on `u`'s list.
    #[inline]
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.member[u * self.n + v]
    }

    /// Whether `{a, b}` is a candidate edge from either side.
    #[inline]
    pub fn is_candidate_edge(&self, a: usize, b: usize) -> bool {
        self.contains(a, b) || self.contains(b, a)
    }
}
