//! Merge and union of stored design spaces by id.
//!
//! Both operators validate every id before touching the store and write the
//! result under `output_id`. The output may be one of the inputs; any other
//! existing graph under that id is a conflict.

use itertools::Itertools;
use pool_common::{MergeConfig, PoolError};
use pool_driver::GraphStore;
use pool_graph::{DesignSpace, SpaceDiff, merge_design_spaces};
use tracing::debug;

fn validate<S: GraphStore>(store: &S, input_ids: &[&str], output_id: &str) -> Result<(), PoolError> {
    if input_ids.is_empty() {
        return Err(PoolError::parameter_empty("input space ids"));
    }
    if output_id.is_empty() {
        return Err(PoolError::parameter_empty("output space id"));
    }
    if let Some(missing) = input_ids.iter().find(|id| !store.contains(id)) {
        return Err(PoolError::not_found(*missing));
    }
    if store.contains(output_id) && !input_ids.contains(&output_id) {
        return Err(PoolError::conflict(output_id));
    }
    Ok(())
}

/// Merges the inputs into `output_id` and saves the result once.
///
/// When `output_id` is one of the inputs that graph is the merge target;
/// otherwise the target starts empty and the first input is grafted into
/// it. Returns what an intersection pruned.
///
/// # Errors
/// `ParameterEmpty`, `NotFound` or `Conflict` from validation.
pub fn merge_spaces<S: GraphStore>(
    store: &S,
    input_ids: &[&str],
    output_id: &str,
    config: &MergeConfig,
) -> Result<SpaceDiff, PoolError> {
    validate(store, input_ids, output_id)?;

    let distinct = input_ids.iter().copied().unique().collect_vec();
    let mut output = if distinct.contains(&output_id) {
        store.load(output_id)?
    } else {
        DesignSpace::new(output_id)
    };
    let inputs: Vec<DesignSpace> = distinct
        .into_iter()
        .filter(|id| *id != output_id)
        .map(|id| store.load(id))
        .collect::<Result<_, _>>()?;

    let diff = merge_design_spaces(&inputs.iter().collect_vec(), &mut output, config);
    debug!(
        "merged {} spaces into '{output_id}', pruned {} nodes",
        inputs.len(),
        diff.nodes.len()
    );
    store.save(output)?;
    Ok(diff)
}

/// Adds a disjoint copy of every input to `output_id`.
///
/// # Errors
/// `ParameterEmpty`, `NotFound` or `Conflict` from validation.
pub fn union_spaces<S: GraphStore>(store: &S, input_ids: &[&str], output_id: &str) -> Result<(), PoolError> {
    validate(store, input_ids, output_id)?;
    for id in input_ids.iter().copied().unique().filter(|id| *id != output_id) {
        store.union_into(id, output_id)?;
    }
    Ok(())
}
