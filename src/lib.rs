#![cfg_attr(not(test), no_std)]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod capacity;
pub mod cut;
pub mod dot;
pub mod error;
pub mod flow_edge;
pub mod impls;
pub mod network;
pub mod node;
pub mod residual;

pub use algo::{AugmentingPath, Strategy};
pub use capacity::Capacity;
pub use cut::MinCut;
pub use error::{Error, Result};
pub use flow_edge::{FlowEdge, RawFlowEdge};
pub use impls::ford_fulkerson::{DriverState, FlowSummary, FordFulkerson, Step};
pub use network::FlowNetwork;
pub use node::{NodeId, NodeRecord};
pub use residual::{Augmentation, ResidualEdge, ResidualGraph, ResidualKind};

/// A maximum flow algorithm over a mutable network.
pub trait MaxFlow {
    type Capacity;
    type Network;
    type Summary;
    type Error;

    /// Augment the flow in `network` until it is maximum between `source` and `target`.
    fn run(
        &mut self,
        network: &mut Self::Network,
        source: NodeId,
        target: NodeId,
    ) -> core::result::Result<Self::Summary, Self::Error>;

    /// Verify that the flow in `network` is feasible and maximum.
    fn check(
        &self,
        network: &Self::Network,
        source: NodeId,
        target: NodeId,
    ) -> core::result::Result<(), Self::Error>;
}
