use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use crate::algo::{searchable, trace_back, AugmentingPath};
use crate::capacity::Capacity;
use crate::node::NodeId;
use crate::residual::ResidualGraph;

/// Depth-first search over an explicit stack.
///
/// The most recently discovered node is extended first and the first path that reaches
/// the target is returned, with no guarantee on its length or capacity. On adversarial
/// networks with large capacities the driver may need a number of iterations
/// proportional to the flow value itself; this is inherent to plain Ford-Fulkerson.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl AugmentingPath for DepthFirst {
    fn find_path<C: Capacity>(
        &self,
        residual: &ResidualGraph<C>,
        source: NodeId,
        target: NodeId,
    ) -> Option<Vec<NodeId>> {
        if !searchable(residual, source, target) {
            return None;
        }

        let mut prev = BTreeMap::new();
        let mut visited = BTreeSet::new();
        let mut stack = alloc::vec![(source, source)];

        while let Some((u, parent)) = stack.pop() {
            if !visited.insert(u) {
                continue;
            }
            if u != source {
                prev.insert(u, parent);
            }
            if u == target {
                return Some(trace_back(&prev, source, target));
            }
            stack.extend(
                residual
                    .successors(u)
                    .filter(|v| !visited.contains(v))
                    .map(|v| (v, u)),
            );
        }
        None
    }
}
