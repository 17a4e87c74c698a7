use serde::{Deserialize, Serialize};

use crate::capacity::Capacity;
use crate::error::Error;
use crate::node::{check_id, NodeId};

/// A directed edge decorated with a capacity and its current flow.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(
    try_from = "RawFlowEdge<C>",
    into = "RawFlowEdge<C>",
    bound(
        deserialize = "C: Capacity + Deserialize<'de>",
        serialize = "C: Capacity + Serialize"
    )
)]
pub struct FlowEdge<C> {
    from: NodeId,
    to: NodeId,
    capacity: C,
    flow: C,
}

impl<C: Capacity> FlowEdge<C> {
    pub fn new(from: NodeId, to: NodeId, capacity: C) -> Result<Self, Error> {
        Self::with_flow(from, to, capacity, C::zero())
    }

    pub fn with_flow(from: NodeId, to: NodeId, capacity: C, flow: C) -> Result<Self, Error> {
        check_id(from)?;
        check_id(to)?;
        if capacity.is_negative() {
            Err(Error::NegativeCapacity { from, to })
        } else if flow.is_negative() {
            Err(Error::NegativeFlow { from, to })
        } else if flow > capacity {
            Err(Error::FlowExceedsCapacity { from, to })
        } else {
            Ok(Self {
                from,
                to,
                capacity,
                flow,
            })
        }
    }

    pub fn from(&self) -> NodeId {
        self.from
    }

    pub fn to(&self) -> NodeId {
        self.to
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }

    pub fn flow(&self) -> C {
        self.flow
    }

    /// Unused forward capacity.
    pub fn residual(&self) -> C {
        self.capacity - self.flow
    }

    pub(crate) fn push(&mut self, amount: C) {
        debug_assert!(amount <= self.residual());
        self.flow += amount;
    }

    pub(crate) fn cancel(&mut self, amount: C) {
        debug_assert!(amount <= self.flow);
        self.flow -= amount;
    }

    pub(crate) fn clear(&mut self) {
        self.flow = C::zero();
    }
}

/// Unvalidated edge as read from external input, where any value may be absent.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawFlowEdge<C> {
    pub from: NodeId,
    pub to: NodeId,
    pub capacity: Option<C>,
    pub flow: Option<C>,
}

impl<C: Capacity> TryFrom<RawFlowEdge<C>> for FlowEdge<C> {
    type Error = Error;

    fn try_from(e: RawFlowEdge<C>) -> Result<Self, Self::Error> {
        let (from, to) = (e.from, e.to);
        let capacity = e.capacity.ok_or(Error::MissingCapacity { from, to })?;
        let flow = e.flow.ok_or(Error::MissingFlow { from, to })?;
        Self::with_flow(from, to, capacity, flow)
    }
}

impl<C> From<FlowEdge<C>> for RawFlowEdge<C> {
    fn from(e: FlowEdge<C>) -> Self {
        Self {
            from: e.from,
            to: e.to,
            capacity: Some(e.capacity),
            flow: Some(e.flow),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            FlowEdge::new(1, 2, -1),
            Err(Error::NegativeCapacity { from: 1, to: 2 })
        );
        assert_eq!(
            FlowEdge::with_flow(1, 2, 4, -2),
            Err(Error::NegativeFlow { from: 1, to: 2 })
        );
        assert_eq!(
            FlowEdge::with_flow(1, 2, 4, 5),
            Err(Error::FlowExceedsCapacity { from: 1, to: 2 })
        );
        assert_eq!(FlowEdge::new(0, 2, 4), Err(Error::InvalidNodeId(0)));
    }

    #[test]
    fn raw_edge_requires_every_value() {
        let raw = RawFlowEdge {
            from: 3,
            to: 4,
            capacity: None,
            flow: Some(0),
        };
        assert_eq!(
            FlowEdge::<i32>::try_from(raw),
            Err(Error::MissingCapacity { from: 3, to: 4 })
        );

        let raw = RawFlowEdge {
            from: 3,
            to: 4,
            capacity: Some(7),
            flow: None,
        };
        assert_eq!(
            FlowEdge::<i32>::try_from(raw),
            Err(Error::MissingFlow { from: 3, to: 4 })
        );

        let raw = RawFlowEdge {
            from: 3,
            to: 4,
            capacity: Some(7),
            flow: Some(2),
        };
        let edge = FlowEdge::<i32>::try_from(raw).unwrap();
        assert_eq!(edge.residual(), 5);
    }
}
