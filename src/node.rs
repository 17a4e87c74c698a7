use alloc::string::String;
use core::fmt;

use serde::Serialize;

use crate::error::{Error, Result};

/// Identifier of a node; always strictly positive.
pub type NodeId = u32;

pub(crate) fn check_id(id: NodeId) -> Result<NodeId> {
    if id == 0 {
        Err(Error::InvalidNodeId(id))
    } else {
        Ok(id)
    }
}

/// A node stored in a network's node arena.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct NodeRecord {
    id: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

impl NodeRecord {
    pub fn new(id: NodeId, name: Option<String>) -> Result<Self> {
        Ok(Self {
            id: check_id(id)?,
            name,
        })
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }
}

impl fmt::Display for NodeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
