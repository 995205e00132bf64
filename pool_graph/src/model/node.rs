use serde::{Deserialize, Serialize};

use super::EdgeIdx;

/// Role of a state in the automaton.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Where assemblies begin.
    Start,
    /// Where assemblies end.
    Accept,
}

impl NodeKind {
    /// The kind a node takes after its graph is reverse-complemented.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Start => Self::Accept,
            Self::Accept => Self::Start,
        }
    }
}

/// A state of a design space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub(crate) node_id: String,
    pub(crate) kind: Option<NodeKind>,
    pub(crate) edges: Vec<EdgeIdx>,
}

impl Node {
    pub(crate) const fn new(node_id: String, kind: Option<NodeKind>) -> Self {
        Self {
            node_id,
            kind,
            edges: Vec::new(),
        }
    }

    /// Identifier unique within the owning graph.
    #[must_use]
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    #[must_use]
    pub const fn kind(&self) -> Option<NodeKind> {
        self.kind
    }

    #[must_use]
    pub const fn is_start(&self) -> bool {
        matches!(self.kind, Some(NodeKind::Start))
    }

    #[must_use]
    pub const fn is_accept(&self) -> bool {
        matches!(self.kind, Some(NodeKind::Accept))
    }

    /// Outgoing edges, in creation order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeIdx] {
        &self.edges
    }

    #[must_use]
    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }
}
