//! DNA strand flip of a whole design space.

use contracts::*;

use crate::model::{DesignSpace, EdgeIdx};

impl DesignSpace {
    /// Reverse-complements the graph in place: every edge is turned around
    /// and re-homed on its new tail, start and accept nodes trade kinds, and
    /// every component id has its reverse marker toggled.
    ///
    /// Applying it twice restores the original graph.
    #[debug_ensures(self.is_consistent())]
    pub fn reverse_complement(&mut self) {
        let edges: Vec<EdgeIdx> = self.edge_indices().collect();
        let nodes: Vec<_> = self.node_indices().collect();

        for &node in &nodes {
            let node = self.node_mut(node);
            node.edges.clear();
            node.kind = node.kind.map(|k| k.flipped());
        }

        for idx in edges {
            let edge = self.edge_mut(idx);
            std::mem::swap(&mut edge.tail, &mut edge.head);
            if let Some(components) = edge.components.as_mut() {
                components.toggle_orientation();
            }
            let tail = edge.tail;
            self.node_mut(tail).edges.push(idx);
        }
        tracing::trace!(
            "reverse-complemented '{}' ({} nodes)",
            self.space_id(),
            nodes.len()
        );
    }
}
