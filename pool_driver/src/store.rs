//! The storage interface the workflow consumes.

use pool_common::PoolError;
use pool_graph::DesignSpace;

/// Persistence of design spaces by id.
///
/// Every call is synchronous. Loading hands out an independent copy;
/// changes become visible to other callers only through [`GraphStore::save`].
pub trait GraphStore {
    /// A deep copy of the stored graph.
    ///
    /// # Errors
    /// `NotFound` for an unknown id.
    fn load(&self, space_id: &str) -> Result<DesignSpace, PoolError>;

    /// Stores `space` under its own id, replacing any previous version.
    ///
    /// # Errors
    /// `ParameterEmpty` when the graph has an empty id.
    fn save(&self, space: DesignSpace) -> Result<(), PoolError>;

    /// Removes a graph. Returns whether it existed.
    fn delete(&self, space_id: &str) -> bool;

    /// Builds and stores the straight-line graph of one pool spec, one
    /// position per entry of the two lists.
    ///
    /// # Errors
    /// `ParameterEmpty` for an empty id or no positions, `Conflict` when the
    /// id is taken, `InvalidParameter` when the lists differ in length.
    fn create_chain(
        &self,
        space_id: &str,
        component_ids: Vec<Vec<String>>,
        component_roles: Vec<Vec<String>>,
    ) -> Result<(), PoolError>;

    /// Ids of graphs with more than `min_size` nodes, sorted.
    fn ids_above_size(&self, min_size: usize) -> Vec<String>;

    /// Moves a graph to a new id.
    ///
    /// # Errors
    /// `NotFound` for an unknown source, `Conflict` for a taken target.
    fn rename(&self, space_id: &str, target_id: &str) -> Result<(), PoolError>;

    /// Adds a disjoint copy of one graph to another, creating the target if
    /// needed.
    ///
    /// # Errors
    /// `NotFound` for an unknown source.
    fn union_into(&self, space_id: &str, target_id: &str) -> Result<(), PoolError>;

    fn contains(&self, space_id: &str) -> bool;

    /// Every stored id, sorted.
    fn space_ids(&self) -> Vec<String>;
}
