//! Graphviz DOT rendering of flow networks and residual graphs, and parsing of the
//! flow network form back into a [`FlowNetwork`].

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use itertools::Itertools;

use crate::capacity::Capacity;
use crate::error::{Error, Result};
use crate::network::FlowNetwork;
use crate::node::NodeId;
use crate::residual::{Augmentation, ResidualGraph};

/// Displays a flow network with its value measured at `source`.
///
/// The value caption is left out when the value does not fit the capacity type.
pub struct NetworkDot<'a, C> {
    network: &'a FlowNetwork<C>,
    source: NodeId,
}

pub fn network_dot<C>(network: &FlowNetwork<C>, source: NodeId) -> NetworkDot<'_, C> {
    NetworkDot { network, source }
}

impl<C: Capacity> fmt::Display for NetworkDot<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph FlowNetwork {{")?;
        writeln!(f, "\trankdir=\"LR\";")?;
        if let Ok(value) = self.network.value(self.source) {
            writeln!(f, "\tlabel=\"Value: {value}\";")?;
        }
        for e in self
            .network
            .edges()
            .sorted_by_key(|e| (e.from(), e.to()))
        {
            write!(f, "\t{} -> {} [label=\"", e.from(), e.to())?;
            if e.flow() != C::zero() {
                write!(f, "{}/{}", e.flow(), e.capacity())?;
            } else {
                write!(f, "{}", e.capacity())?;
            }
            writeln!(f, "\", len={}];", e.capacity())?;
        }
        writeln!(f, "}}")
    }
}

/// Displays a residual graph, highlighting `augmentation` when given.
pub struct ResidualDot<'a, C> {
    residual: &'a ResidualGraph<C>,
    augmentation: Option<&'a Augmentation<C>>,
}

pub fn residual_dot<'a, C>(
    residual: &'a ResidualGraph<C>,
    augmentation: Option<&'a Augmentation<C>>,
) -> ResidualDot<'a, C> {
    ResidualDot {
        residual,
        augmentation,
    }
}

impl<C: Capacity> fmt::Display for ResidualDot<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "digraph residualGraph {{")?;
        writeln!(f, "\trankdir=\"LR\";")?;
        if let Some(aug) = self.augmentation {
            writeln!(
                f,
                "\tlabel=\"Residual graph.\\nAugmenting path: [{}].\\nResidual capacity: {}\";",
                aug.path().iter().join(", "),
                aug.bottleneck()
            )?;
        }
        for e in self.residual.edges() {
            write!(
                f,
                "\t{} -> {} [label={}, len={}",
                e.from, e.to, e.weight, e.weight
            )?;
            let in_path = self
                .augmentation
                .map_or(false, |aug| aug.contains_hop(e.from, e.to));
            if in_path {
                write!(f, ", penwidth=3, color=\"blue\"")?;
                if self.augmentation.map(Augmentation::bottleneck) == Some(e.weight) {
                    write!(f, ", fontcolor=\"red\"")?;
                }
            }
            writeln!(f, "];")?;
        }
        writeln!(f, "}}")
    }
}

struct EdgeLine<'a> {
    from: &'a str,
    to: &'a str,
    attributes: Option<&'a str>,
}

fn is_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn is_number(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Splits `a -> b [attrs]` (or `a -- b`); anything else is not an edge line.
fn edge_line(line: &str) -> Option<EdgeLine<'_>> {
    let (at, arrow) = line.match_indices("->").chain(line.match_indices("--")).min()?;
    let from = line[..at].trim();
    let rest = line[at + arrow.len()..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let (to, rest) = rest.split_at(end);
    if !is_name(from) || !is_name(to) {
        return None;
    }
    let attributes = rest
        .trim_start()
        .strip_prefix('[')
        .and_then(|a| a.rfind(']').map(|close| &a[..close]));
    Some(EdgeLine {
        from,
        to,
        attributes,
    })
}

/// Reads `label="flow/capacity"` or `label="capacity"` out of an attribute list.
fn label_values(attributes: &str) -> Option<(&str, Option<&str>)> {
    let rest = &attributes[attributes.find("label")? + "label".len()..];
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '/'))
        .unwrap_or(rest.len());
    match rest[..end].split_once('/') {
        Some((flow, capacity)) if is_number(flow) && is_number(capacity) => {
            Some((capacity, Some(flow)))
        }
        None if is_number(&rest[..end]) => Some((&rest[..end], None)),
        _ => None,
    }
}

fn parse_value<C: Capacity>(line: usize, s: &str) -> Result<C> {
    s.parse().map_err(|_| Error::Parse {
        line,
        reason: format!("`{s}` is not a valid capacity"),
    })
}

/// Builds a flow network from its DOT form.
///
/// Numeric node names are used as ids. Other names are given the smallest unused positive
/// ids in order of first appearance and are kept as node names. An edge without a label
/// has zero capacity.
pub fn parse_flow_network<C: Capacity>(text: &str) -> Result<FlowNetwork<C>> {
    let mut edges = Vec::new();
    for (no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', '{', '}']) {
            continue;
        }
        if let Some(edge) = edge_line(line) {
            edges.push((no + 1, edge));
        }
    }

    let names = edges
        .iter()
        .flat_map(|(_, e)| [e.from, e.to])
        .unique()
        .collect::<Vec<_>>();
    let mut ids = BTreeMap::new();
    for name in names.iter().filter(|n| is_number(n)) {
        let id = name.parse::<NodeId>().map_err(|_| Error::Parse {
            line: 0,
            reason: format!("node id `{name}` is out of range"),
        })?;
        ids.insert(*name, id);
    }
    let mut used = ids.values().copied().collect::<BTreeSet<_>>();
    let mut next = 1;
    let mut network = FlowNetwork::new();
    for name in names.iter().filter(|n| !is_number(n)) {
        while used.contains(&next) {
            next += 1;
        }
        used.insert(next);
        ids.insert(*name, next);
        network.add_named_node(next, name.to_string())?;
    }

    for (no, e) in edges {
        let (capacity, flow) = match e.attributes {
            Some(attributes) if attributes.contains("label") => {
                let (capacity, flow) = label_values(attributes).ok_or_else(|| Error::Parse {
                    line: no,
                    reason: "malformed label".to_string(),
                })?;
                let flow = flow.map_or(Ok(C::zero()), |f| parse_value(no, f))?;
                (parse_value(no, capacity)?, flow)
            }
            _ => (C::zero(), C::zero()),
        };
        network.add_edge_with_flow(ids[e.from], ids[e.to], capacity, flow)?;
    }

    log::debug!(
        "parsed flow network with {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

/// Renders `network` as DOT; shorthand for [`network_dot`].
pub fn network_to_dot<C: Capacity>(network: &FlowNetwork<C>, source: NodeId) -> String {
    network_dot(network, source).to_string()
}

pub fn residual_to_dot<C: Capacity>(
    residual: &ResidualGraph<C>,
    augmentation: Option<&Augmentation<C>>,
) -> String {
    residual_dot(residual, augmentation).to_string()
}
