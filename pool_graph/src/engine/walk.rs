//! Product-construction walk of one input graph against one output graph.

use std::collections::{HashMap, HashSet};

use pool_common::MergeConfig;
use tracing::{debug, trace};

use crate::labels::{Components, combine_labels, labels_match};
use crate::model::{DesignSpace, EdgeIdx, NodeIdx};

use super::claims::{Claim, PairClaims};
use super::diff::SpaceDiff;
use super::is_input_start_matching;

/// An output edge as seen by the walk: already in the graph, or a copy that
/// is attached only once the walk is over so clones taken mid-walk do not
/// pick it up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum EdgeRef {
    Attached(EdgeIdx),
    Pending(usize),
}

#[derive(Clone, Debug)]
struct PendingEdge {
    tail: NodeIdx,
    head: NodeIdx,
    components: Option<Components>,
}

pub(super) struct MergeWalk<'a> {
    input: &'a DesignSpace,
    output: &'a mut DesignSpace,
    config: &'a MergeConfig,
    claims: PairClaims,
    input_stack: Vec<NodeIdx>,
    output_stack: Vec<NodeIdx>,
    pending: Vec<PendingEdge>,
    merged: HashSet<EdgeRef>,
}

impl<'a> MergeWalk<'a> {
    pub(super) fn new(input: &'a DesignSpace, output: &'a mut DesignSpace, config: &'a MergeConfig) -> Self {
        Self {
            input,
            output,
            config,
            claims: PairClaims::new(),
            input_stack: Vec::new(),
            output_stack: Vec::new(),
            pending: Vec::new(),
            merged: HashSet::new(),
        }
    }

    pub(super) fn run(mut self, input_starts: &[NodeIdx], output_starts: &[NodeIdx]) -> SpaceDiff {
        let input = self.input;
        for &input_start in input_starts {
            let reachable = if self.config.complete_match && !output_starts.is_empty() {
                input.reachable_from(&[input_start])
            } else {
                HashSet::new()
            };

            for &output_start in output_starts {
                if !self.config.intersection
                    || is_input_start_matching(
                        input,
                        &*self.output,
                        input_start,
                        output_start,
                        self.config.strength,
                    )
                {
                    self.merge_nodes(input_start, output_start);
                }
                self.drain(&reachable);
            }
        }

        let mut merged = self.attach_pending();
        self.propagate_kinds();

        if !input_starts.is_empty() && (!self.config.intersection || output_starts.is_empty()) {
            self.graft_surplus(input_starts, &mut merged);
        }

        debug!(
            "merge '{}' -> '{}': {} pairs claimed, {} edges merged",
            input.space_id(),
            self.output.space_id(),
            self.claims.len(),
            merged.len()
        );

        if self.config.intersection && !input_starts.is_empty() && !output_starts.is_empty() {
            self.prune(&merged)
        } else {
            SpaceDiff::default()
        }
    }

    /// Designates the output node for `(input, output)`, scheduling the pair
    /// for a visit the first time it is seen.
    fn merge_nodes(&mut self, input: NodeIdx, output: NodeIdx) -> NodeIdx {
        let graph = &mut *self.output;
        match self
            .claims
            .claim((input, output), |taken| graph.copy_node_with_edges(taken))
        {
            Claim::Existing(node) => node,
            Claim::Fresh(node) => {
                trace!("claimed ({input}, {output}) as {node}");
                self.input_stack.push(input);
                self.output_stack.push(node);
                node
            }
        }
    }

    /// Visits scheduled pairs until none are left, then commits the edges
    /// they matched unless completeness is required and not met.
    fn drain(&mut self, reachable: &HashSet<NodeIdx>) {
        let input = self.input;
        let mut matching_edges: HashSet<EdgeRef> = HashSet::new();
        let mut matching_inputs: HashSet<NodeIdx> = HashSet::new();

        while let (Some(input_node), Some(output_node)) = (self.input_stack.pop(), self.output_stack.pop()) {
            matching_inputs.insert(input_node);

            for output_edge in self.output[output_node].edges().to_vec() {
                let mut current = EdgeRef::Attached(output_edge);
                let mut successor = self.head(current);

                for &input_edge in input[input_node].edges() {
                    let input_edge = &input[input_edge];
                    if !labels_match(input_edge.components(), self.components(current), self.config.strength) {
                        continue;
                    }
                    successor = self.merge_nodes(input_edge.head(), successor);
                    if successor != self.head(current) {
                        current = self.copy_pending(current, output_node, successor);
                    }
                    let labels = self.take_components(current);
                    let (labels, usable) = combine_labels(labels, input_edge.components(), self.config.intersection);
                    self.set_components(current, labels);
                    if usable {
                        matching_edges.insert(current);
                    } else {
                        matching_edges.remove(&current);
                    }
                }
            }
        }

        if !self.config.complete_match || matching_inputs == *reachable {
            self.merged.extend(matching_edges);
        } else if !matching_inputs.is_empty() {
            trace!(
                "incomplete match: visited {} of {} reachable input nodes",
                matching_inputs.len(),
                reachable.len()
            );
        }
    }

    fn attach_pending(&mut self) -> HashSet<EdgeIdx> {
        let attached: Vec<EdgeIdx> = std::mem::take(&mut self.pending)
            .into_iter()
            .map(|p| self.output.create_edge(p.tail, p.head, p.components))
            .collect();
        self.merged
            .iter()
            .map(|edge| match *edge {
                EdgeRef::Attached(idx) => idx,
                EdgeRef::Pending(i) => attached[i],
            })
            .collect()
    }

    /// Start and accept kinds of input nodes carry over to every output node
    /// designated for them.
    fn propagate_kinds(&mut self) {
        let input = self.input;
        for (input_node, node) in input.nodes() {
            if let Some(kind) = node.kind() {
                for &output_node in self.claims.outputs_of(input_node) {
                    self.output.set_kind(output_node, Some(kind));
                }
            }
        }
    }

    /// Copies the input structure the walk never paired into the output
    /// graph. Edges between two already paired nodes are skipped since the
    /// walk merged them.
    fn graft_surplus(&mut self, input_starts: &[NodeIdx], merged: &mut HashSet<EdgeIdx>) {
        let input = self.input;
        let mut surplus: HashMap<NodeIdx, NodeIdx> = HashMap::new();
        let mut visited: HashSet<NodeIdx> = HashSet::new();
        let mut stack: Vec<NodeIdx> = Vec::new();

        for &input_start in input_starts {
            stack.push(input_start);
            if !self.claims.is_mapped(input_start) && !surplus.contains_key(&input_start) {
                let copy = self.output.create_typed_node(input[input_start].kind());
                surplus.insert(input_start, copy);
            }

            while let Some(input_node) = stack.pop() {
                if !visited.insert(input_node) || !input[input_node].has_edges() {
                    continue;
                }
                let outputs = self.mapped_or_surplus(input_node, &surplus);

                for &edge in input[input_node].edges() {
                    let edge = &input[edge];
                    let successor = edge.head();
                    if !visited.contains(&successor) {
                        stack.push(successor);
                    }
                    if !self.claims.is_mapped(successor) && !surplus.contains_key(&successor) {
                        let copy = self.output.create_typed_node(input[successor].kind());
                        surplus.insert(successor, copy);
                    }
                    if self.claims.is_mapped(input_node) && self.claims.is_mapped(successor) {
                        continue;
                    }
                    let successors = self.mapped_or_surplus(successor, &surplus);
                    for &tail in &outputs {
                        for &head in &successors {
                            merged.insert(self.output.create_edge(tail, head, edge.components().cloned()));
                        }
                    }
                }
            }
        }
        debug!("grafted {} unpaired input nodes", surplus.len());
    }

    fn mapped_or_surplus(&self, input_node: NodeIdx, surplus: &HashMap<NodeIdx, NodeIdx>) -> Vec<NodeIdx> {
        if self.claims.is_mapped(input_node) {
            self.claims.outputs_of(input_node).to_vec()
        } else {
            surplus.get(&input_node).copied().into_iter().collect()
        }
    }

    /// Deletes every output edge not merged and every node no merged edge
    /// touches.
    fn prune(self, merged: &HashSet<EdgeIdx>) -> SpaceDiff {
        let output = self.output;
        let merged_nodes: HashSet<NodeIdx> = merged
            .iter()
            .flat_map(|&e| [output[e].tail(), output[e].head()])
            .collect();

        let removed_edges = output.retain_edges(merged);
        let edges = removed_edges
            .iter()
            .map(|e| {
                (
                    output[e.tail()].node_id().to_string(),
                    output[e.head()].node_id().to_string(),
                )
            })
            .collect();
        let nodes = output
            .retain_nodes(&merged_nodes)
            .into_iter()
            .map(|n| n.node_id().to_string())
            .collect();

        let diff = SpaceDiff { nodes, edges };
        debug!(
            "pruned {} nodes and {} edges from '{}'",
            diff.nodes.len(),
            diff.edges.len(),
            output.space_id()
        );
        diff
    }

    fn head(&self, edge: EdgeRef) -> NodeIdx {
        match edge {
            EdgeRef::Attached(idx) => self.output[idx].head(),
            EdgeRef::Pending(i) => self.pending[i].head,
        }
    }

    fn components(&self, edge: EdgeRef) -> Option<&Components> {
        match edge {
            EdgeRef::Attached(idx) => self.output[idx].components(),
            EdgeRef::Pending(i) => self.pending[i].components.as_ref(),
        }
    }

    fn take_components(&mut self, edge: EdgeRef) -> Option<Components> {
        match edge {
            EdgeRef::Attached(idx) => self.output.edge_mut(idx).components.take(),
            EdgeRef::Pending(i) => self.pending[i].components.take(),
        }
    }

    fn set_components(&mut self, edge: EdgeRef, components: Option<Components>) {
        match edge {
            EdgeRef::Attached(idx) => self.output.set_components(idx, components),
            EdgeRef::Pending(i) => self.pending[i].components = components,
        }
    }

    fn copy_pending(&mut self, edge: EdgeRef, tail: NodeIdx, head: NodeIdx) -> EdgeRef {
        let components = self.components(edge).cloned();
        self.pending.push(PendingEdge {
            tail,
            head,
            components,
        });
        EdgeRef::Pending(self.pending.len() - 1)
    }
}
