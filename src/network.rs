use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use itertools::Itertools;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::Direction;

use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::flow_edge::FlowEdge;
use crate::node::{NodeId, NodeRecord};

/// A directed graph of capacitated edges with at most one edge per ordered node pair.
///
/// Nodes live in the graph's arena and are addressed by their [`NodeId`]; edges refer to
/// them by arena index only.
#[derive(Clone, Debug)]
pub struct FlowNetwork<C> {
    graph: DiGraph<NodeRecord, FlowEdge<C>>,
    index: BTreeMap<NodeId, NodeIndex>,
}

impl<C> Default for FlowNetwork<C> {
    fn default() -> Self {
        Self {
            graph: DiGraph::new(),
            index: BTreeMap::new(),
        }
    }
}

/// How a single hop of an augmenting path changes the network.
struct HopUpdate<C> {
    forward: Option<(EdgeIndex, C)>,
    backward: Option<(EdgeIndex, C)>,
}

impl<C: Capacity> FlowNetwork<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or returns the existing one.
    pub fn add_node(&mut self, id: NodeId) -> Result<()> {
        self.node_index_or_insert(id).map(|_| ())
    }

    pub fn add_named_node(&mut self, id: NodeId, name: impl Into<String>) -> Result<()> {
        let ix = self.node_index_or_insert(id)?;
        self.graph[ix].set_name(name.into());
        Ok(())
    }

    fn node_index_or_insert(&mut self, id: NodeId) -> Result<NodeIndex> {
        if let Some(ix) = self.index.get(&id) {
            return Ok(*ix);
        }
        let ix = self.graph.add_node(NodeRecord::new(id, None)?);
        self.index.insert(id, ix);
        Ok(ix)
    }

    /// Inserts an edge with zero flow, creating missing endpoints.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, capacity: C) -> Result<()> {
        self.insert(FlowEdge::new(from, to, capacity)?)
    }

    pub fn add_edge_with_flow(
        &mut self,
        from: NodeId,
        to: NodeId,
        capacity: C,
        flow: C,
    ) -> Result<()> {
        self.insert(FlowEdge::with_flow(from, to, capacity, flow)?)
    }

    pub fn insert(&mut self, edge: FlowEdge<C>) -> Result<()> {
        let (from, to) = (edge.from(), edge.to());
        if self.find_edge(from, to).is_some() {
            return Err(Error::ParallelEdge { from, to });
        }
        let a = self.node_index_or_insert(from)?;
        let b = self.node_index_or_insert(to)?;
        self.graph.add_edge(a, b, edge);
        Ok(())
    }

    fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeIndex> {
        let a = self.index.get(&from)?;
        let b = self.index.get(&to)?;
        self.graph.find_edge(*a, *b)
    }

    pub fn edge(&self, from: NodeId, to: NodeId) -> Option<&FlowEdge<C>> {
        self.find_edge(from, to).map(|e| &self.graph[e])
    }

    pub fn edges(&self) -> impl Iterator<Item = &FlowEdge<C>> + '_ {
        self.graph.edge_weights()
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeRecord> {
        self.index.get(&id).map(|ix| &self.graph[*ix])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Node ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn smallest_node_id(&self) -> Option<NodeId> {
        self.index.keys().next().copied()
    }

    pub fn largest_node_id(&self) -> Option<NodeId> {
        self.index.keys().next_back().copied()
    }

    /// The conventional (source, target) pair: smallest and largest node id.
    pub fn terminals(&self) -> Option<(NodeId, NodeId)> {
        Some((self.smallest_node_id()?, self.largest_node_id()?))
    }

    /// Pushes `delta` units along `path`.
    ///
    /// For every hop `(u, v)` the forward edge `u -> v` takes as much of `delta` as its
    /// unused capacity allows and the rest cancels flow on `v -> u`. Every hop is checked
    /// before any flow changes, so on error the network is left untouched.
    pub fn add_flow(&mut self, path: &[NodeId], delta: C) -> Result<()> {
        if delta.is_negative() {
            return Err(Error::NegativeDelta);
        }
        let updates = path
            .iter()
            .tuple_windows()
            .map(|(&u, &v)| self.plan_hop(u, v, delta))
            .collect::<Result<Vec<_>>>()?;

        for HopUpdate { forward, backward } in updates {
            if let Some((e, amount)) = forward {
                self.graph[e].push(amount);
            }
            if let Some((e, amount)) = backward {
                self.graph[e].cancel(amount);
            }
        }
        Ok(())
    }

    fn plan_hop(&self, u: NodeId, v: NodeId, delta: C) -> Result<HopUpdate<C>> {
        let forward = self.find_edge(u, v);
        let backward = self.find_edge(v, u);
        if forward.is_none() && backward.is_none() {
            return Err(Error::MissingEdge { from: u, to: v });
        }

        let pushed = forward.map_or(C::zero(), |e| self.graph[e].residual().min(delta));
        let cancelled = delta - pushed;
        let cancellable = backward.map_or(C::zero(), |e| self.graph[e].flow());
        if cancelled > cancellable {
            return Err(Error::InsufficientResidual { from: u, to: v });
        }

        log::trace!("hop {u} -> {v}: push {pushed}, cancel {cancelled}");
        Ok(HopUpdate {
            forward: forward.map(|e| (e, pushed)),
            backward: backward.map(|e| (e, cancelled)),
        })
    }

    fn total(&self, id: NodeId, dir: Direction) -> Result<C> {
        self.index.get(&id).map_or(Ok(C::zero()), |ix| {
            self.graph
                .edges_directed(*ix, dir)
                .try_fold(C::zero(), |acc, e| {
                    acc.checked_add(&e.weight().flow())
                        .ok_or(Error::ArithmeticOverflow)
                })
        })
    }

    /// Sum of flow over the outgoing edges of `id`.
    pub fn total_outflow(&self, id: NodeId) -> Result<C> {
        self.total(id, Direction::Outgoing)
    }

    /// Sum of flow over the incoming edges of `id`.
    pub fn total_inflow(&self, id: NodeId) -> Result<C> {
        self.total(id, Direction::Incoming)
    }

    /// Net flow leaving `source`, floored at zero.
    ///
    /// This is the outflow of `source` minus its inflow. It equals [`total_outflow`] unless
    /// an initial flow enters `source`, in which case that flow does not count towards the
    /// value.
    ///
    /// [`total_outflow`]: FlowNetwork::total_outflow
    pub fn value(&self, source: NodeId) -> Result<C> {
        let (out, inflow) = (self.total_outflow(source)?, self.total_inflow(source)?);
        Ok(if out >= inflow {
            out - inflow
        } else {
            C::zero()
        })
    }

    /// Sets the flow of every edge back to zero.
    pub fn reset_flow(&mut self) {
        self.graph.edge_weights_mut().for_each(FlowEdge::clear);
    }
}
