use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::network::FlowNetwork;
use crate::node::NodeId;
use crate::residual::ResidualGraph;

/// An s-t cut read off the residual graph of a network.
///
/// Once no augmenting path remains the cut is minimum and its capacity equals the flow
/// value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MinCut<C> {
    source_side: BTreeSet<NodeId>,
    edges: Vec<(NodeId, NodeId)>,
    capacity: C,
}

impl<C: Capacity> MinCut<C> {
    pub fn from_network(network: &FlowNetwork<C>, source: NodeId) -> Result<Self> {
        if !network.contains(source) {
            return Err(Error::UnknownNode(source));
        }
        let source_side = ResidualGraph::build(network).reachable_from(source);

        let crossing = network
            .edges()
            .filter(|e| source_side.contains(&e.from()) && !source_side.contains(&e.to()))
            .collect::<Vec<_>>();
        let capacity = crossing.iter().try_fold(C::zero(), |acc, e| {
            acc.checked_add(&e.capacity())
                .ok_or(Error::ArithmeticOverflow)
        })?;
        let mut edges = crossing
            .into_iter()
            .map(|e| (e.from(), e.to()))
            .collect::<Vec<_>>();
        edges.sort_unstable();

        Ok(Self {
            source_side,
            edges,
            capacity,
        })
    }

    pub fn source_side(&self) -> &BTreeSet<NodeId> {
        &self.source_side
    }

    /// Edges leaving the source side, sorted.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }
}
