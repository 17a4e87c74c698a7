use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use itertools::Itertools;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::Serialize;

use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::network::FlowNetwork;
use crate::node::NodeId;

/// Which side of a capacitated edge a residual edge stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum ResidualKind {
    /// Unused capacity of `from -> to`.
    Forward,
    /// Flow on `to -> from` that can be sent back.
    Backward,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResidualEdge<C> {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: C,
    pub kind: ResidualKind,
}

/// The residual view of a [`FlowNetwork`] at one point in time.
///
/// It is derived from the network in full and never updated afterwards; build a new one
/// whenever the network's flow changes.
#[derive(Clone, Debug)]
pub struct ResidualGraph<C> {
    graph: DiGraph<NodeId, ResidualEdge<C>>,
    index: BTreeMap<NodeId, NodeIndex>,
}

impl<C: Capacity> ResidualGraph<C> {
    pub fn build(network: &FlowNetwork<C>) -> Self {
        let mut graph = DiGraph::new();
        let index = network
            .node_ids()
            .map(|id| (id, graph.add_node(id)))
            .collect::<BTreeMap<_, _>>();

        for e in network.edges() {
            let (u, v) = (index[&e.from()], index[&e.to()]);
            let residual = e.residual();
            if residual > C::zero() {
                graph.add_edge(
                    u,
                    v,
                    ResidualEdge {
                        from: e.from(),
                        to: e.to(),
                        weight: residual,
                        kind: ResidualKind::Forward,
                    },
                );
            }
            if e.flow() > C::zero() {
                graph.add_edge(
                    v,
                    u,
                    ResidualEdge {
                        from: e.to(),
                        to: e.from(),
                        weight: e.flow(),
                        kind: ResidualKind::Backward,
                    },
                );
            }
        }

        Self { graph, index }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    pub fn edges(&self) -> impl Iterator<Item = &ResidualEdge<C>> + '_ {
        self.graph.edge_weights()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Residual edges leaving `id`; empty for an unknown node.
    pub fn out_edges(&self, id: NodeId) -> impl Iterator<Item = &ResidualEdge<C>> + '_ {
        self.index
            .get(&id)
            .into_iter()
            .flat_map(move |ix| self.graph.edges(*ix))
            .map(|e| e.weight())
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.out_edges(id).map(|e| e.to)
    }

    /// Total residual capacity from `u` to `v`, summed over forward and backward edges.
    pub fn residual_capacity(&self, u: NodeId, v: NodeId) -> Option<C> {
        self.out_edges(u)
            .filter(|e| e.to == v)
            .map(|e| e.weight)
            .fold(None, |acc, w| {
                Some(acc.map_or(w, |a: C| a.checked_add(&w).unwrap_or_else(C::max_value)))
            })
    }

    /// Smallest residual capacity over the hops of `path`.
    pub fn bottleneck_of(&self, path: &[NodeId]) -> Result<C> {
        if path.len() < 2 {
            return Err(Error::DegeneratePath);
        }
        path.iter()
            .tuple_windows()
            .map(|(&u, &v)| {
                self.residual_capacity(u, v)
                    .ok_or(Error::MissingResidualEdge { from: u, to: v })
            })
            .fold_ok(C::max_value(), |b, w| b.min(w))
    }

    pub fn augmentation(&self, path: Vec<NodeId>) -> Result<Augmentation<C>> {
        let bottleneck = self.bottleneck_of(&path)?;
        Ok(Augmentation { path, bottleneck })
    }

    /// Every node reachable from `source` over residual edges, `source` included.
    pub fn reachable_from(&self, source: NodeId) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        if let Some(start) = self.index.get(&source) {
            let mut bfs = Bfs::new(&self.graph, *start);
            while let Some(nx) = bfs.next(&self.graph) {
                seen.insert(self.graph[nx]);
            }
        }
        seen
    }

    pub fn has_path(&self, source: NodeId, target: NodeId) -> bool {
        self.reachable_from(source).contains(&target)
    }
}

/// An augmenting path together with the amount of flow it carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Augmentation<C> {
    path: Vec<NodeId>,
    bottleneck: C,
}

impl<C: Copy> Augmentation<C> {
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn bottleneck(&self) -> C {
        self.bottleneck
    }

    pub fn hops(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.path.iter().copied().tuple_windows()
    }

    pub fn contains_hop(&self, from: NodeId, to: NodeId) -> bool {
        self.hops().any(|hop| hop == (from, to))
    }
}
