use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use pool_common::PoolError;
use pool_graph::{ChainLabels, DesignSpace};
use thiserror::Error;
use tracing::debug;

use crate::snapshot::Snapshot;
use crate::GraphStore;

/// Failures of the snapshot layer. Store operations themselves only fail with
/// [`PoolError`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// A store operation failed while applying a snapshot.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The snapshot file could not be read or written.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The snapshot file is not valid snapshot JSON.
    #[error("Snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),
    /// The JSON parsed but describes an impossible graph, such as an edge to
    /// a missing node.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),
}

/// In-memory graph store shared between clones of the handle.
#[derive(Debug, Clone, Default)]
pub struct Driver {
    registry: Arc<RwLock<HashMap<String, DesignSpace>>>,
}

impl Driver {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, DesignSpace>> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, DesignSpace>> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Writes every stored graph to a JSON file.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<(), DriverError> {
        let snapshot = Snapshot::capture(self.read().values());
        let file = std::fs::File::create(path.as_ref())?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &snapshot)?;
        debug!(
            "saved {} design spaces to {}",
            snapshot.len(),
            path.as_ref().display()
        );
        Ok(())
    }

    /// Builds a store from a JSON snapshot file.
    pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Self, DriverError> {
        let file = std::fs::File::open(path.as_ref())?;
        let snapshot: Snapshot = serde_json::from_reader(std::io::BufReader::new(file))?;
        let driver = Self::new();
        {
            let mut registry = driver.write();
            for space in snapshot.restore()? {
                registry.insert(space.space_id().to_string(), space);
            }
        }
        debug!(
            "loaded {} design spaces from {}",
            driver.len(),
            path.as_ref().display()
        );
        Ok(driver)
    }
}

impl GraphStore for Driver {
    fn load(&self, space_id: &str) -> Result<DesignSpace, PoolError> {
        self.read()
            .get(space_id)
            .cloned()
            .ok_or_else(|| PoolError::not_found(space_id))
    }

    fn save(&self, space: DesignSpace) -> Result<(), PoolError> {
        if space.space_id().is_empty() {
            return Err(PoolError::parameter_empty("space id"));
        }
        self.write().insert(space.space_id().to_string(), space);
        Ok(())
    }

    fn delete(&self, space_id: &str) -> bool {
        let existed = self.write().remove(space_id).is_some();
        if existed {
            debug!("deleted design space '{space_id}'");
        }
        existed
    }

    fn create_chain(
        &self,
        space_id: &str,
        component_ids: Vec<Vec<String>>,
        component_roles: Vec<Vec<String>>,
    ) -> Result<(), PoolError> {
        if space_id.is_empty() {
            return Err(PoolError::parameter_empty("space id"));
        }
        let labels = ChainLabels::new(component_ids, component_roles)?;
        if labels.is_empty() {
            return Err(PoolError::parameter_empty("component ids"));
        }
        let mut registry = self.write();
        if registry.contains_key(space_id) {
            return Err(PoolError::conflict(space_id));
        }
        registry.insert(space_id.to_string(), labels.into_design_space(space_id));
        Ok(())
    }

    fn ids_above_size(&self, min_size: usize) -> Vec<String> {
        let mut ids: Vec<String> = self
            .read()
            .values()
            .filter(|s| s.node_count() > min_size)
            .map(|s| s.space_id().to_string())
            .collect();
        ids.sort();
        ids
    }

    fn rename(&self, space_id: &str, target_id: &str) -> Result<(), PoolError> {
        if target_id.is_empty() {
            return Err(PoolError::parameter_empty("target id"));
        }
        let mut registry = self.write();
        if registry.contains_key(target_id) {
            return Err(PoolError::conflict(target_id));
        }
        let mut space = registry
            .remove(space_id)
            .ok_or_else(|| PoolError::not_found(space_id))?;
        space.set_space_id(target_id);
        registry.insert(target_id.to_string(), space);
        Ok(())
    }

    fn union_into(&self, space_id: &str, target_id: &str) -> Result<(), PoolError> {
        if target_id.is_empty() {
            return Err(PoolError::parameter_empty("target id"));
        }
        let mut registry = self.write();
        let source = registry
            .get(space_id)
            .cloned()
            .ok_or_else(|| PoolError::not_found(space_id))?;
        registry
            .entry(target_id.to_string())
            .or_insert_with(|| DesignSpace::new(target_id))
            .absorb(&source);
        Ok(())
    }

    fn contains(&self, space_id: &str) -> bool {
        self.read().contains_key(space_id)
    }

    fn space_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.read().keys().cloned().collect();
        ids.sort();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(parts: &[&str]) -> (Vec<Vec<String>>, Vec<Vec<String>>) {
        (
            parts.iter().map(|p| vec![(*p).to_string()]).collect(),
            parts.iter().map(|_| vec!["cds".to_string()]).collect(),
        )
    }

    #[test]
    fn test_create_chain_conflict() {
        let driver = Driver::new();
        let (ids, roles) = labels(&["a", "b"]);
        driver
            .create_chain("lib", ids.clone(), roles.clone())
            .expect("first create succeeds");
        assert_eq!(
            driver.create_chain("lib", ids, roles),
            Err(PoolError::Conflict("lib".into()))
        );
    }

    #[test]
    fn test_load_hands_out_copies() {
        let driver = Driver::new();
        let (ids, roles) = labels(&["a"]);
        driver.create_chain("lib", ids, roles).expect("created");
        let mut copy = driver.load("lib").expect("stored");
        copy.create_node();
        assert_eq!(driver.load("lib").expect("stored").node_count(), 2);
    }

    #[test]
    fn test_rename_and_union() {
        let driver = Driver::new();
        let (ids, roles) = labels(&["a"]);
        driver.create_chain("one", ids.clone(), roles.clone()).expect("created");
        driver.create_chain("two", ids, roles).expect("created");

        assert_eq!(
            driver.rename("one", "two"),
            Err(PoolError::Conflict("two".into()))
        );
        driver.rename("one", "three").expect("renamed");
        assert!(!driver.contains("one"));
        assert_eq!(driver.load("three").expect("stored").space_id(), "three");

        driver.union_into("two", "three").expect("unioned");
        assert_eq!(driver.load("three").expect("stored").node_count(), 4);
        assert_eq!(driver.ids_above_size(2), vec!["three".to_string()]);
    }
}
