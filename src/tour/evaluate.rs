//! Objective evaluation.

use crate::instance::Instance;

/// Total objective of `nodes` read as a closed cycle.
///
/// `sum(cost(s[i]) + d(s[i], s[(i + 1) % k]))`. An empty sequence costs 0.
///
/// # Examples
///
/// ```
/// use u_tourlm::instance::Instance;
/// use u_tourlm::tour::evaluate;
///
/// let instance = Instance::from_rows(vec![[0, 0, 1], [0, 10, 2]]);
/// // 1 + 2 + 10 there + 10 back
/// assert_eq!(evaluate(&instance, &[0, 1]), 23);
/// assert_eq!(evaluate(&instance, &[1]), 2);
/// ```
pub fn evaluate(instance: &Instance, nodes: &[usize]) -> i64 {
    let k = nodes.len();
    (0..k)
        .map(|i| instance.cost(nodes[i]) + instance.distance(nodes[i], nodes[(i + 1) % k]))
        .sum()
}
