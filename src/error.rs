use alloc::string::String;

use displaydoc::Display;

use crate::node::NodeId;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Error {
    /// Invalid node id `{0}`, expected a positive value
    InvalidNodeId(NodeId),
    /// Invalid edge {from} -> {to}: capacity is missing
    MissingCapacity { from: NodeId, to: NodeId },
    /// Invalid edge {from} -> {to}: flow is missing
    MissingFlow { from: NodeId, to: NodeId },
    /// Invalid edge {from} -> {to}: capacity must not be negative
    NegativeCapacity { from: NodeId, to: NodeId },
    /// Invalid edge {from} -> {to}: flow must not be negative
    NegativeFlow { from: NodeId, to: NodeId },
    /// Invalid edge {from} -> {to}: flow exceeds capacity
    FlowExceedsCapacity { from: NodeId, to: NodeId },
    /// An edge {from} -> {to} already exists
    ParallelEdge { from: NodeId, to: NodeId },
    /// Node {0} is not part of the network
    UnknownNode(NodeId),
    /// Source and target are the same node ({0})
    SourceIsTarget(NodeId),
    /// The network has no nodes
    EmptyNetwork,
    /// Flow increment must not be negative
    NegativeDelta,
    /// No edge between {from} and {to} in either direction
    MissingEdge { from: NodeId, to: NodeId },
    /// Hop {from} -> {to} cannot absorb the requested flow
    InsufficientResidual { from: NodeId, to: NodeId },
    /// No residual edge backs hop {from} -> {to}
    MissingResidualEdge { from: NodeId, to: NodeId },
    /// A path needs at least two nodes
    DegeneratePath,
    /// Arithmetic overflow while summing flow
    ArithmeticOverflow,
    /// Edge {from} -> {to} violates 0 <= flow <= capacity
    CapacityViolated { from: NodeId, to: NodeId },
    /// Flow is not conserved at node {0}
    ConservationViolated(NodeId),
    /// An augmenting path from {source} to {target} still exists
    ResidualPathRemains { source: NodeId, target: NodeId },
    /// Parse error on line {line}: {reason}
    Parse { line: usize, reason: String },
}

impl core::error::Error for Error {}
