//! Intersection and union merges between design spaces.
//!
//! A merge walks an input graph and an output graph in lock step from a pair
//! of frontiers, building the product automaton inside the output graph.
//! Intersection keeps only what both graphs agree on; union grafts the input
//! onto the output.

mod claims;
mod diff;
mod walk;

pub use claims::{Claim, PairClaims, PairKey};
pub use diff::SpaceDiff;

use pool_common::{MatchDegree, MatchStrength, MergeConfig};
use tracing::debug;

use crate::labels::labels_match;
use crate::model::{DesignSpace, NodeIdx};

use walk::MergeWalk;

/// Seeds the `(input, output)` frontiers for a merge of the given degree.
#[must_use]
pub fn seed_frontiers(
    input: &DesignSpace,
    output: &DesignSpace,
    degree: MatchDegree,
) -> (Vec<NodeIdx>, Vec<NodeIdx>) {
    match degree {
        MatchDegree::StartNodes => (input.start_nodes(), output.start_nodes()),
        MatchDegree::Mixed => (input.start_nodes(), output.node_indices().collect()),
        MatchDegree::AllNodes => (
            input.node_indices().collect(),
            output.node_indices().collect(),
        ),
    }
}

/// Whether any outgoing edge of `input_start` matches any outgoing edge of
/// `output_start` at `strength`.
#[must_use]
pub fn is_input_start_matching(
    input: &DesignSpace,
    output: &DesignSpace,
    input_start: NodeIdx,
    output_start: NodeIdx,
    strength: MatchStrength,
) -> bool {
    output[output_start].edges().iter().any(|&out_edge| {
        input[input_start].edges().iter().any(|&in_edge| {
            labels_match(
                input[in_edge].components(),
                output[out_edge].components(),
                strength,
            )
        })
    })
}

/// Merges `input` into `output` from explicit frontiers.
///
/// Only `config.degree` is ignored; the frontiers replace it. Returns what an
/// intersection pruned from `output`.
pub fn merge_graphs(
    input_starts: &[NodeIdx],
    output_starts: &[NodeIdx],
    input: &DesignSpace,
    output: &mut DesignSpace,
    config: &MergeConfig,
) -> SpaceDiff {
    MergeWalk::new(input, output, config).run(input_starts, output_starts)
}

/// Merges each of `inputs` into `output` in turn, seeding frontiers from
/// `config.degree`.
pub fn merge_design_spaces(
    inputs: &[&DesignSpace],
    output: &mut DesignSpace,
    config: &MergeConfig,
) -> SpaceDiff {
    debug!(
        "merging {} spaces into '{}' ({})",
        inputs.len(),
        output.space_id(),
        if config.intersection { "intersection" } else { "union" }
    );
    let mut diff = SpaceDiff::default();
    for input in inputs {
        let (input_starts, output_starts) = seed_frontiers(input, output, config.degree);
        diff.extend(merge_graphs(&input_starts, &output_starts, input, output, config));
    }
    diff
}
