use alloc::collections::{BTreeMap, BTreeSet, VecDeque};
use alloc::vec::Vec;

use crate::algo::{searchable, trace_back, AugmentingPath};
use crate::capacity::Capacity;
use crate::node::NodeId;
use crate::residual::ResidualGraph;

/// Breadth-first search, i.e. Edmonds-Karp.
///
/// Always returns a path with the fewest hops. The hop distance from source to target
/// never decreases between iterations, which bounds the number of augmentations by
/// `O(V * E)` regardless of the capacities.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl AugmentingPath for BreadthFirst {
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
        let mut seen = BTreeSet::from([source]);
        let mut queue = VecDeque::from([source]);

        while let Some(u) = queue.pop_front() {
            for v in residual.successors(u) {
                if !seen.insert(v) {
                    continue;
                }
                prev.insert(v, u);
                if v == target {
                    return Some(trace_back(&prev, source, target));
                }
                queue.push_back(v);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FlowNetwork;

    #[test]
    fn prefers_fewest_hops() {
        let mut net = FlowNetwork::new();
        net.add_edge(1, 2, 100).unwrap();
        net.add_edge(2, 3, 100).unwrap();
        net.add_edge(3, 5, 100).unwrap();
        net.add_edge(1, 4, 1).unwrap();
        net.add_edge(4, 5, 1).unwrap();

        let r = ResidualGraph::build(&net);
        assert_eq!(BreadthFirst.find_path(&r, 1, 5), Some(vec![1, 4, 5]));
    }
}
