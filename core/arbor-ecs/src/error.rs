use std::fmt;

use hecs::Entity;
use thiserror::Error;

/// Stable handle of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Entity);

impl NodeId {
    pub fn entity(&self) -> Entity {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0.id())
    }
}

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("tree construction failed: {message} [{}]", format_nodes(.nodes))]
    Construction { message: String, nodes: Vec<NodeId> },

    #[error("no such node: {0}")]
    NoSuchNode(NodeId),
}

impl TreeError {
    pub(crate) fn construction(message: impl Into<String>, nodes: Vec<NodeId>) -> Self {
        TreeError::Construction {
            message: message.into(),
            nodes,
        }
    }
}

fn format_nodes(nodes: &[NodeId]) -> String {
    nodes.iter().map(|n| n.to_string()).collect::<Vec<_>>().join(", ")
}
