use std::collections::HashSet;

use indexmap::IndexSet;

use crate::model::{DesignSpace, NodeIdx};

use super::{PartRef, PoolSpec, SubPool};

impl PoolSpec {
    /// Reads a graph back as positions, tier by tier from its start nodes:
    /// the component ids on every edge leaving the current frontier form one
    /// bracket, and the edges' unvisited heads form the next frontier.
    /// Tiers without component ids produce no bracket.
    #[must_use]
    pub fn from_design_space(space: &DesignSpace) -> Self {
        let mut sub_pools = Vec::new();
        let mut visited: HashSet<NodeIdx> = HashSet::new();
        let mut frontier: IndexSet<NodeIdx> = space.start_nodes().into_iter().collect();

        while !frontier.is_empty() {
            visited.extend(frontier.iter().copied());
            let mut ids: IndexSet<&str> = IndexSet::new();
            let mut next: IndexSet<NodeIdx> = IndexSet::new();

            for &node in &frontier {
                for &edge in space[node].edges() {
                    let edge = &space[edge];
                    ids.extend(edge.component_ids().iter().map(String::as_str));
                    if !visited.contains(&edge.head()) {
                        next.insert(edge.head());
                    }
                }
            }

            if !ids.is_empty() {
                sub_pools.push(SubPool {
                    parts: ids.into_iter().map(PartRef::new).collect(),
                });
            }
            frontier = next;
        }
        Self { sub_pools }
    }
}

/// Writes a graph as pool-spec text, see [`PoolSpec::from_design_space`].
#[must_use]
pub fn serialize_pool(space: &DesignSpace) -> String {
    PoolSpec::from_design_space(space).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Components;
    use crate::model::NodeKind;

    #[test]
    fn test_chain_serializes_per_position() {
        let space = DesignSpace::from_chain(
            "s",
            vec![
                Components::new(["a", "b"], ["promoter"]),
                Components::new(["r^c"], ["cds"]),
            ],
        );
        assert_eq!(serialize_pool(&space), "[a,b],[r^c]");
    }

    #[test]
    fn test_parallel_edges_share_a_bracket() {
        let mut space = DesignSpace::new("s");
        let s = space.create_typed_node(Some(NodeKind::Start));
        let a = space.create_typed_node(Some(NodeKind::Accept));
        let b = space.create_typed_node(Some(NodeKind::Accept));
        space.create_edge(s, a, Components::new(["x"], ["promoter"]));
        space.create_edge(s, b, Components::new(["y", "x"], ["promoter"]));
        assert_eq!(serialize_pool(&space), "[x,y]");
    }

    #[test]
    fn test_cycle_terminates() {
        let mut space = DesignSpace::from_chain("s", vec![Components::new(["a"], ["cds"])]);
        let start = space.start_nodes()[0];
        let accept = space.accept_nodes()[0];
        space.create_edge(accept, start, Components::new(["b"], ["cds"]));
        assert_eq!(serialize_pool(&space), "[a],[b]");
    }

    #[test]
    fn test_empty_graph_is_empty_text() {
        assert_eq!(serialize_pool(&DesignSpace::new("s")), "");
    }
}
