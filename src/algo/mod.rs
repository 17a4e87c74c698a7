use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use displaydoc::Display;
use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;
use crate::node::NodeId;
use crate::residual::ResidualGraph;

pub mod breadth_first;
pub mod depth_first;
pub mod dijkstra;

pub use breadth_first::BreadthFirst;
pub use depth_first::DepthFirst;
pub use dijkstra::{ShortestResidual, WidestPath};

/// A way of picking the next augmenting path in a residual graph.
///
/// A returned path starts at `source`, ends at `target`, visits no node twice and only
/// follows residual edges. `None` means `target` cannot be reached from `source`.
pub trait AugmentingPath {
    fn find_path<C: Capacity>(
        &self,
        residual: &ResidualGraph<C>,
        source: NodeId,
        target: NodeId,
    ) -> Option<Vec<NodeId>>;
}

/// The built-in path-finding strategies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// breadth-first (Edmonds-Karp)
    #[default]
    BreadthFirst,
    /// depth-first
    DepthFirst,
    /// Dijkstra shortest residual weight
    ShortestResidual,
    /// Dijkstra widest path
    WidestPath,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::BreadthFirst,
        Strategy::DepthFirst,
        Strategy::ShortestResidual,
        Strategy::WidestPath,
    ];
}

impl AugmentingPath for Strategy {
    fn find_path<C: Capacity>(
        &self,
        residual: &ResidualGraph<C>,
        source: NodeId,
        target: NodeId,
    ) -> Option<Vec<NodeId>> {
        match self {
            Strategy::BreadthFirst => BreadthFirst.find_path(residual, source, target),
            Strategy::DepthFirst => DepthFirst.find_path(residual, source, target),
            Strategy::ShortestResidual => ShortestResidual.find_path(residual, source, target),
            Strategy::WidestPath => WidestPath.find_path(residual, source, target),
        }
    }
}

fn searchable<C: Capacity>(residual: &ResidualGraph<C>, source: NodeId, target: NodeId) -> bool {
    source != target && residual.contains(source) && residual.contains(target)
}

/// Walks the predecessor map back from `target`.
fn trace_back(prev: &BTreeMap<NodeId, NodeId>, source: NodeId, target: NodeId) -> Vec<NodeId> {
    let mut path = alloc::vec![target];
    let mut at = target;
    while at != source {
        match prev.get(&at) {
            Some(p) => {
                at = *p;
                path.push(at);
            }
            None => break,
        }
    }
    path.reverse();
    path
}
