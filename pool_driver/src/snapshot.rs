//! JSON form of a whole store.

use pool_graph::{Components, DesignSpace, NodeKind};
use serde::{Deserialize, Serialize};

use crate::driver::DriverError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<NodeKind>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub tail: String,
    pub head: String,
    #[serde(default)]
    pub component_ids: Vec<String>,
    #[serde(default)]
    pub component_roles: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRecord {
    pub space_id: String,
    #[serde(default)]
    pub id_index: u32,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl SpaceRecord {
    pub fn capture(space: &DesignSpace) -> Self {
        let nodes = space
            .nodes()
            .map(|(_, n)| NodeRecord {
                node_id: n.node_id().to_string(),
                kind: n.kind(),
            })
            .collect();
        let edges = space
            .edges()
            .map(|(_, e)| EdgeRecord {
                tail: space[e.tail()].node_id().to_string(),
                head: space[e.head()].node_id().to_string(),
                component_ids: e.component_ids().to_vec(),
                component_roles: e.component_roles().to_vec(),
            })
            .collect();
        Self {
            space_id: space.space_id().to_string(),
            id_index: space.id_index(),
            nodes,
            edges,
        }
    }

    /// Rebuilds the graph, rejecting duplicate node ids, dangling edge ends
    /// and edges carrying only one of ids and roles.
    pub fn restore(self) -> Result<DesignSpace, DriverError> {
        let corrupt = |what: String| DriverError::Corrupt(format!("'{}': {what}", self.space_id));
        let mut space = DesignSpace::with_id_index(&self.space_id, self.id_index);

        for node in &self.nodes {
            if space.insert_node(&node.node_id, node.kind).is_none() {
                return Err(corrupt(format!("duplicate node id '{}'", node.node_id)));
            }
        }
        for edge in &self.edges {
            let tail = space
                .find_node(&edge.tail)
                .ok_or_else(|| corrupt(format!("unknown tail '{}'", edge.tail)))?;
            let head = space
                .find_node(&edge.head)
                .ok_or_else(|| corrupt(format!("unknown head '{}'", edge.head)))?;
            if edge.component_ids.is_empty() != edge.component_roles.is_empty() {
                return Err(corrupt(format!(
                    "edge {} -> {} has ids and roles out of step",
                    edge.tail, edge.head
                )));
            }
            let components = Components::new(edge.component_ids.clone(), edge.component_roles.clone());
            space.create_edge(tail, head, components);
        }
        Ok(space)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub spaces: Vec<SpaceRecord>,
}

impl Snapshot {
    /// Records every graph, sorted by id.
    pub fn capture<'a>(spaces: impl IntoIterator<Item = &'a DesignSpace>) -> Self {
        let mut spaces: Vec<SpaceRecord> = spaces.into_iter().map(SpaceRecord::capture).collect();
        spaces.sort_by(|a, b| a.space_id.cmp(&b.space_id));
        Self { spaces }
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn restore(self) -> Result<Vec<DesignSpace>, DriverError> {
        self.spaces.into_iter().map(SpaceRecord::restore).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(edges: Vec<EdgeRecord>) -> SpaceRecord {
        SpaceRecord {
            space_id: "s".into(),
            id_index: 2,
            nodes: vec![
                NodeRecord {
                    node_id: "n0".into(),
                    kind: Some(NodeKind::Start),
                },
                NodeRecord {
                    node_id: "n1".into(),
                    kind: Some(NodeKind::Accept),
                },
            ],
            edges,
        }
    }

    fn edge(head: &str, ids: &[&str], roles: &[&str]) -> EdgeRecord {
        EdgeRecord {
            tail: "n0".into(),
            head: head.into(),
            component_ids: ids.iter().map(|s| (*s).to_string()).collect(),
            component_roles: roles.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_restore_keeps_ids_and_labels() {
        let space = record(vec![edge("n1", &["x"], &["cds"])])
            .restore()
            .expect("valid");
        assert_eq!(space.find_node("n1").map(|n| space[n].is_accept()), Some(true));
        assert_eq!(space.id_index(), 2);
        assert_eq!(SpaceRecord::capture(&space), record(vec![edge("n1", &["x"], &["cds"])]));
    }

    #[test]
    fn test_restore_rejects_bad_records() {
        assert!(matches!(
            record(vec![edge("n9", &["x"], &["cds"])]).restore(),
            Err(DriverError::Corrupt(_))
        ));
        assert!(matches!(
            record(vec![edge("n1", &["x"], &[])]).restore(),
            Err(DriverError::Corrupt(_))
        ));
        let mut duplicate = record(Vec::new());
        duplicate.nodes.push(NodeRecord {
            node_id: "n0".into(),
            kind: None,
        });
        assert!(matches!(duplicate.restore(), Err(DriverError::Corrupt(_))));
    }
}
