use std::collections::{HashMap, HashSet};
use std::ops::Index;

use contracts::*;

use crate::labels::Components;

use super::{Edge, EdgeIdx, Node, NodeIdx, NodeKind};

/// A design space: a small multi-start, multi-accept automaton whose edges
/// are labelled with interchangeable parts.
///
/// Nodes and edges live in per-graph arenas addressed by [`NodeIdx`] and
/// [`EdgeIdx`]. Deleting leaves a hole so handles held elsewhere never alias a
/// different element.
#[derive(Clone, Debug)]
pub struct DesignSpace {
    space_id: String,
    /// Counter behind the `n{k}` node ids, only advanced by node creation.
    id_index: u32,
    nodes: Vec<Option<Node>>,
    edges: Vec<Option<Edge>>,
    node_ids: HashMap<String, NodeIdx>,
}

impl DesignSpace {
    #[must_use]
    pub fn new(space_id: impl Into<String>) -> Self {
        Self::with_id_index(space_id, 0)
    }

    /// An empty graph whose next minted node id is `n{id_index}`.
    #[must_use]
    pub fn with_id_index(space_id: impl Into<String>, id_index: u32) -> Self {
        Self {
            space_id: space_id.into(),
            id_index,
            nodes: Vec::new(),
            edges: Vec::new(),
            node_ids: HashMap::new(),
        }
    }

    /// Builds the straight-line graph of one pool spec: position `i` becomes
    /// the edge `n{i} -> n{i+1}` labelled with `positions[i]`. The first tail
    /// is the start node, the last head the accept node.
    #[must_use]
    pub fn from_chain(space_id: impl Into<String>, positions: Vec<Option<Components>>) -> Self {
        let mut space = Self::new(space_id);
        let mut tail = space.create_typed_node(Some(NodeKind::Start));
        let last = positions.len();
        for (i, components) in positions.into_iter().enumerate() {
            let kind = (i + 1 == last).then_some(NodeKind::Accept);
            let head = space.create_typed_node(kind);
            space.create_edge(tail, head, components);
            tail = head;
        }
        space
    }

    #[must_use]
    pub fn space_id(&self) -> &str {
        &self.space_id
    }

    pub fn set_space_id(&mut self, space_id: impl Into<String>) {
        self.space_id = space_id.into();
    }

    #[must_use]
    pub const fn id_index(&self) -> u32 {
        self.id_index
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    /// True when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// Live node handles in arena order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIdx> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_some())
            .map(|(i, _)| NodeIdx::from(i))
    }

    /// Live edge handles in arena order.
    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIdx> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeIdx::from(i))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIdx, &Node)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.as_ref().map(|n| (NodeIdx::from(i), n)))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIdx, &Edge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (EdgeIdx::from(i), e)))
    }

    #[must_use]
    pub fn get_node(&self, idx: NodeIdx) -> Option<&Node> {
        self.nodes.get(idx.as_usize()).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn get_edge(&self, idx: EdgeIdx) -> Option<&Edge> {
        self.edges.get(idx.as_usize()).and_then(Option::as_ref)
    }

    /// Looks a node up by its string id.
    #[must_use]
    pub fn find_node(&self, node_id: &str) -> Option<NodeIdx> {
        self.node_ids.get(node_id).copied()
    }

    #[must_use]
    pub fn start_nodes(&self) -> Vec<NodeIdx> {
        self.nodes_of_kind(NodeKind::Start)
    }

    #[must_use]
    pub fn accept_nodes(&self) -> Vec<NodeIdx> {
        self.nodes_of_kind(NodeKind::Accept)
    }

    fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeIdx> {
        self.nodes()
            .filter(|(_, n)| n.kind == Some(kind))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Whether any edge carries a reverse-oriented component id.
    #[must_use]
    pub fn has_reverse_components(&self) -> bool {
        self.edges()
            .filter_map(|(_, e)| e.components())
            .any(Components::has_reverse_ids)
    }

    /// Every node reachable from `from`, the seeds included.
    #[must_use]
    pub fn reachable_from(&self, from: &[NodeIdx]) -> HashSet<NodeIdx> {
        let mut seen: HashSet<NodeIdx> = HashSet::new();
        let mut stack: Vec<NodeIdx> = from.to_vec();
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            for &edge in &self[node].edges {
                let head = self[edge].head;
                if !seen.contains(&head) {
                    stack.push(head);
                }
            }
        }
        seen
    }

    /// Mints a fresh untyped node.
    pub fn create_node(&mut self) -> NodeIdx {
        self.create_typed_node(None)
    }

    /// Mints a fresh node `n{counter}` of the given kind.
    #[debug_ensures(self.get_node(ret).is_some())]
    pub fn create_typed_node(&mut self, kind: Option<NodeKind>) -> NodeIdx {
        let mut node_id = format!("n{}", self.id_index);
        self.id_index += 1;
        while self.node_ids.contains_key(&node_id) {
            node_id = format!("n{}", self.id_index);
            self.id_index += 1;
        }
        self.push_node(Node::new(node_id, kind))
    }

    /// Adds a node under an explicit id. Returns `None` if the id is taken.
    pub fn insert_node(&mut self, node_id: impl Into<String>, kind: Option<NodeKind>) -> Option<NodeIdx> {
        let node_id = node_id.into();
        if self.node_ids.contains_key(&node_id) {
            return None;
        }
        Some(self.push_node(Node::new(node_id, kind)))
    }

    fn push_node(&mut self, node: Node) -> NodeIdx {
        let idx = NodeIdx::from(self.nodes.len());
        self.node_ids.insert(node.node_id.clone(), idx);
        self.nodes.push(Some(node));
        idx
    }

    #[debug_requires(self.get_node(node).is_some())]
    pub fn set_kind(&mut self, node: NodeIdx, kind: Option<NodeKind>) {
        self.node_mut(node).kind = kind;
    }

    /// Adds an edge and attaches it to its tail.
    #[debug_requires(self.get_node(tail).is_some() && self.get_node(head).is_some())]
    #[debug_ensures(self[tail].edges.contains(&ret))]
    pub fn create_edge(&mut self, tail: NodeIdx, head: NodeIdx, components: Option<Components>) -> EdgeIdx {
        let idx = EdgeIdx::from(self.edges.len());
        self.edges.push(Some(Edge {
            tail,
            head,
            components,
        }));
        self.node_mut(tail).edges.push(idx);
        idx
    }

    /// Duplicates `edge` with its labels between a new pair of endpoints.
    pub fn copy_edge(&mut self, edge: EdgeIdx, tail: NodeIdx, head: NodeIdx) -> EdgeIdx {
        let components = self[edge].components.clone();
        self.create_edge(tail, head, components)
    }

    /// Replaces the labels of `edge`.
    pub fn set_components(&mut self, edge: EdgeIdx, components: Option<Components>) {
        self.edge_mut(edge).components = components;
    }

    /// A fresh node with the kind of `node` and no edges.
    pub fn copy_node(&mut self, node: NodeIdx) -> NodeIdx {
        let kind = self[node].kind;
        self.create_typed_node(kind)
    }

    /// A fresh node with the kind of `node` whose outgoing edges are copies
    /// of `node`'s, pointing at the same heads.
    #[debug_ensures(self[ret].edges.len() == self[node].edges.len())]
    pub fn copy_node_with_edges(&mut self, node: NodeIdx) -> NodeIdx {
        let clone = self.copy_node(node);
        for edge in self[node].edges.clone() {
            let head = self[edge].head;
            self.copy_edge(edge, clone, head);
        }
        clone
    }

    /// Deep clone under a new id. Node ids and the id counter carry over;
    /// arena holes are compacted away.
    #[must_use]
    pub fn copy(&self, space_id: impl Into<String>) -> Self {
        self.copy_with_remap(space_id).0
    }

    /// Like [`DesignSpace::copy`], also returning the old-to-new handle map.
    #[must_use]
    pub fn copy_with_remap(&self, space_id: impl Into<String>) -> (Self, HashMap<NodeIdx, NodeIdx>) {
        let mut copy = Self::with_id_index(space_id, self.id_index);
        let mut remap: HashMap<NodeIdx, NodeIdx> = HashMap::with_capacity(self.node_count());
        for (idx, node) in self.nodes() {
            let new_idx = copy.push_node(Node::new(node.node_id.clone(), node.kind));
            remap.insert(idx, new_idx);
        }
        for (idx, node) in self.nodes() {
            for &edge in &node.edges {
                let edge = &self[edge];
                copy.create_edge(remap[&idx], remap[&edge.head], edge.components.clone());
            }
        }
        (copy, remap)
    }

    /// Copies every node and edge of `other` into this graph under fresh node
    /// ids. Returns the map from `other`'s handles to the new ones.
    pub fn absorb(&mut self, other: &Self) -> HashMap<NodeIdx, NodeIdx> {
        let mut remap: HashMap<NodeIdx, NodeIdx> = HashMap::with_capacity(other.node_count());
        for (idx, node) in other.nodes() {
            remap.insert(idx, self.create_typed_node(node.kind));
        }
        for (_, edge) in other.edges() {
            self.create_edge(remap[&edge.tail], remap[&edge.head], edge.components.clone());
        }
        remap
    }

    /// Removes `targets` from their tails and the arena.
    #[debug_ensures(self.is_consistent())]
    pub fn delete_edges(&mut self, targets: &HashSet<EdgeIdx>) -> Vec<Edge> {
        let mut removed = Vec::with_capacity(targets.len());
        for &target in targets {
            if let Some(edge) = self.edges.get_mut(target.as_usize()).and_then(Option::take) {
                self.node_mut(edge.tail).edges.retain(|e| *e != target);
                removed.push(edge);
            }
        }
        removed
    }

    /// Removes `targets` with their outgoing edges, after first removing
    /// every surviving node's edges into them.
    #[debug_ensures(self.is_consistent())]
    pub fn detach_delete_nodes(&mut self, targets: &HashSet<NodeIdx>) -> Vec<Node> {
        let dangling: HashSet<EdgeIdx> = self
            .edges()
            .filter(|(_, e)| targets.contains(&e.head) || targets.contains(&e.tail))
            .map(|(idx, _)| idx)
            .collect();
        self.delete_edges(&dangling);

        let mut removed = Vec::with_capacity(targets.len());
        for &target in targets {
            if let Some(node) = self.nodes.get_mut(target.as_usize()).and_then(Option::take) {
                self.node_ids.remove(&node.node_id);
                removed.push(node);
            }
        }
        removed
    }

    /// Deletes every edge not in `keep` and returns the removed edges.
    pub fn retain_edges(&mut self, keep: &HashSet<EdgeIdx>) -> Vec<Edge> {
        let others = self.other_edges(keep);
        self.delete_edges(&others)
    }

    /// Deletes every node not in `keep` and returns the removed nodes.
    pub fn retain_nodes(&mut self, keep: &HashSet<NodeIdx>) -> Vec<Node> {
        let others = self.other_nodes(keep);
        self.detach_delete_nodes(&others)
    }

    #[must_use]
    pub fn other_nodes(&self, keep: &HashSet<NodeIdx>) -> HashSet<NodeIdx> {
        self.node_indices().filter(|n| !keep.contains(n)).collect()
    }

    #[must_use]
    pub fn other_edges(&self, keep: &HashSet<EdgeIdx>) -> HashSet<EdgeIdx> {
        self.edge_indices().filter(|e| !keep.contains(e)).collect()
    }

    /// Checks the arena invariants: unique node ids, edges attached to their
    /// tail exactly once and never pointing at a deleted node.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        if self.node_ids.len() != self.nodes.iter().flatten().count() {
            return false;
        }
        let ids_ok = self
            .nodes()
            .all(|(idx, n)| self.node_ids.get(&n.node_id) == Some(&idx));
        let edges_ok = self.edges().all(|(idx, e)| {
            self.get_node(e.head).is_some()
                && self
                    .get_node(e.tail)
                    .is_some_and(|t| t.edges.iter().filter(|x| **x == idx).count() == 1)
        });
        let lists_ok = self.nodes().all(|(idx, n)| {
            n.edges
                .iter()
                .all(|e| self.get_edge(*e).is_some_and(|e| e.tail == idx))
        });
        ids_ok && edges_ok && lists_ok
    }

    pub(crate) fn node_mut(&mut self, idx: NodeIdx) -> &mut Node {
        self.nodes[idx.as_usize()]
            .as_mut()
            .unwrap_or_else(|| panic!("stale node handle {idx}"))
    }

    pub(crate) fn edge_mut(&mut self, idx: EdgeIdx) -> &mut Edge {
        self.edges[idx.as_usize()]
            .as_mut()
            .unwrap_or_else(|| panic!("stale edge handle {idx}"))
    }
}

impl Index<NodeIdx> for DesignSpace {
    type Output = Node;

    /// # Panics
    /// On a handle of a deleted node or from another graph.
    fn index(&self, idx: NodeIdx) -> &Node {
        self.get_node(idx)
            .unwrap_or_else(|| panic!("stale node handle {idx}"))
    }
}

impl Index<EdgeIdx> for DesignSpace {
    type Output = Edge;

    /// # Panics
    /// On a handle of a deleted edge or from another graph.
    fn index(&self, idx: EdgeIdx) -> &Edge {
        self.get_edge(idx)
            .unwrap_or_else(|| panic!("stale edge handle {idx}"))
    }
}
