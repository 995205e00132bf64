use serde::{Deserialize, Serialize};

/// Nodes and edges an intersection merge pruned from its output graph,
/// described by node ids so callers can purge them from external storage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceDiff {
    /// Ids of removed nodes.
    pub nodes: Vec<String>,
    /// `(tail id, head id)` of removed edges.
    pub edges: Vec<(String, String)>,
}

impl SpaceDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Appends another pass's removals.
    pub fn extend(&mut self, other: Self) {
        self.nodes.extend(other.nodes);
        self.edges.extend(other.edges);
    }
}
