//! Graphs loaded once for a design run.
//!
//! The store may be shared, so a run reads every graph it needs up front and
//! takes its working copies from here instead of going back to the store.

use std::collections::HashMap;
use std::sync::Arc;

use pool_common::PoolError;
use pool_graph::DesignSpace;

use crate::GraphStore;

/// Loaded design spaces keyed by space id.
#[derive(Debug, Clone, Default)]
pub struct Context {
    spaces: HashMap<String, Arc<DesignSpace>>,
}

impl Context {
    /// Loads every listed graph from `store`. A missing id fails the whole
    /// load; repeated ids are read once.
    pub fn load_from<S: AsRef<str>>(store: &impl GraphStore, space_ids: &[S]) -> Result<Self, PoolError> {
        let mut spaces = HashMap::with_capacity(space_ids.len());
        for id in space_ids.iter().map(AsRef::as_ref) {
            if !spaces.contains_key(id) {
                let space = store.load(id)?;
                spaces.insert(id.to_string(), Arc::new(space));
            }
        }
        let context = Self { spaces };
        tracing::event!(tracing::Level::DEBUG, "loaded {} design spaces for the run", context.len());
        Ok(context)
    }

    pub fn get(&self, space_id: &str) -> Option<&Arc<DesignSpace>> {
        self.spaces.get(space_id)
    }

    /// A private working copy of `space_id` renamed to `copy_id`, or `None`
    /// when that space was not loaded.
    #[contracts::debug_ensures(ret.as_ref().map_or(true, |copy| Some(copy.node_count()) == self.get(space_id).map(|s| s.node_count())))]
    pub fn copy_of(&self, space_id: &str, copy_id: impl Into<String>) -> Option<DesignSpace> {
        let copy = self.spaces.get(space_id)?.copy(copy_id);
        tracing::event!(tracing::Level::TRACE, "copied {} as {}", space_id, copy.space_id());
        Some(copy)
    }

    pub fn contains(&self, space_id: &str) -> bool {
        self.spaces.contains_key(space_id)
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }
}
