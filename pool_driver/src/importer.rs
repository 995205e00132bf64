//! Composite part definitions and their import into a store.
//!
//! A definition with sub-components is a composite: it is flattened to the
//! ordered leaves it is built from and stored as a chain graph. A definition
//! without sub-components is a leaf and goes into the part catalog.

use std::collections::HashSet;
use std::io::Read;

use indexmap::IndexMap;
use pool_common::PoolError;
use pool_common::prefix::as_reverse;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{LeafPart, PartCatalog};
use crate::driver::DriverError;
use crate::store::GraphStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Inline,
    ReverseComplement,
}

/// Placement of one definition inside another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubComponent {
    pub definition: String,
    /// One-based start of the annotation; zero or less means unannotated.
    #[serde(default)]
    pub start: i64,
    #[serde(default)]
    pub orientation: Orientation,
}

impl SubComponent {
    pub fn new(definition: impl Into<String>, start: i64, orientation: Orientation) -> Self {
        Self {
            definition: definition.into(),
            start,
            orientation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    pub id: String,
    #[serde(default)]
    pub display_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub sub_components: Vec<SubComponent>,
}

impl ComponentDefinition {
    pub fn leaf(id: impl Into<String>, roles: &[&str]) -> Self {
        Self {
            id: id.into(),
            display_id: None,
            name: None,
            roles: roles.iter().map(|r| (*r).to_string()).collect(),
            sub_components: Vec::new(),
        }
    }

    pub fn composite(id: impl Into<String>, sub_components: Vec<SubComponent>) -> Self {
        Self {
            id: id.into(),
            display_id: None,
            name: None,
            roles: Vec::new(),
            sub_components,
        }
    }

    pub fn with_display_id(mut self, display_id: impl Into<String>) -> Self {
        self.display_id = Some(display_id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn is_composite(&self) -> bool {
        !self.sub_components.is_empty()
    }

    /// Id of the library graph a composite is stored under.
    pub fn space_id(&self) -> &str {
        self.display_id.as_deref().unwrap_or(&self.id)
    }

    pub fn as_leaf(&self) -> LeafPart {
        LeafPart {
            id: self.id.clone(),
            display_id: self.display_id.clone(),
            name: self.name.clone(),
            roles: self.roles.clone(),
        }
    }
}

pub trait Importer {
    /// Ordered `(leaf id, is forward)` pairs a definition is built from.
    fn flatten(&self, definition_id: &str) -> Result<Vec<(String, bool)>, PoolError>;
}

/// Definitions keyed by id, in file order.
#[derive(Clone, Debug, Default)]
pub struct DefinitionSet {
    definitions: IndexMap<String, ComponentDefinition>,
}

impl DefinitionSet {
    /// # Errors
    /// `Conflict` when two definitions share an id.
    pub fn new(definitions: Vec<ComponentDefinition>) -> Result<Self, PoolError> {
        let mut set = IndexMap::with_capacity(definitions.len());
        for definition in definitions {
            if set.contains_key(&definition.id) {
                return Err(PoolError::conflict(definition.id));
            }
            set.insert(definition.id.clone(), definition);
        }
        Ok(Self { definitions: set })
    }

    /// Reads a JSON array of definitions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DriverError> {
        let definitions: Vec<ComponentDefinition> = serde_json::from_reader(reader)?;
        Ok(Self::new(definitions)?)
    }

    pub fn get(&self, id: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(id)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    fn flatten_into(
        &self,
        definition: &ComponentDefinition,
        forward: bool,
        path: &mut HashSet<String>,
        leaves: &mut Vec<(String, bool)>,
    ) -> Result<(), PoolError> {
        if !definition.is_composite() {
            leaves.push((definition.id.clone(), forward));
            return Ok(());
        }
        if !path.insert(definition.id.clone()) {
            return Err(PoolError::InvalidParameter(format!(
                "definition '{}' contains itself",
                definition.id
            )));
        }

        let mut annotated: Vec<&SubComponent> = definition
            .sub_components
            .iter()
            .filter(|sub| sub.start > 0)
            .collect();
        annotated.sort_by_key(|sub| sub.start);

        for sub in annotated {
            let child = self
                .get(&sub.definition)
                .ok_or_else(|| PoolError::not_found(&sub.definition))?;
            let child_forward = match sub.orientation {
                Orientation::Inline => forward,
                Orientation::ReverseComplement => !forward,
            };
            self.flatten_into(child, child_forward, path, leaves)?;
        }

        path.remove(&definition.id);
        Ok(())
    }

    /// Registers every leaf in `catalog` and stores every composite as a
    /// chain graph. Composites whose graph id is already stored are skipped.
    /// Returns the ids of the graphs created.
    ///
    /// # Errors
    /// `NotFound` for a dangling sub-component reference,
    /// `InvalidParameter` for a definition that contains itself.
    pub fn import_library(
        &self,
        store: &impl GraphStore,
        catalog: &mut PartCatalog,
    ) -> Result<Vec<String>, PoolError> {
        let mut created = Vec::new();
        for definition in self.iter() {
            if !definition.is_composite() {
                catalog.register(&definition.as_leaf());
                continue;
            }

            let space_id = definition.space_id();
            if store.contains(space_id) {
                debug!("library graph '{space_id}' already stored");
                continue;
            }
            let leaves = self.flatten(&definition.id)?;
            if leaves.is_empty() {
                warn!("composite '{}' has no annotated sub-components", definition.id);
                continue;
            }

            let mut component_ids = Vec::with_capacity(leaves.len());
            let mut component_roles = Vec::with_capacity(leaves.len());
            for (leaf_id, forward) in leaves {
                let roles = self
                    .get(&leaf_id)
                    .map(|leaf| leaf.as_leaf().effective_roles())
                    .unwrap_or_default();
                component_ids.push(vec![if forward { leaf_id } else { as_reverse(&leaf_id) }]);
                component_roles.push(roles);
            }
            store.create_chain(space_id, component_ids, component_roles)?;
            created.push(space_id.to_string());
        }
        debug!(
            "imported {} definitions: {} library graphs, {} catalog names",
            self.len(),
            created.len(),
            catalog.len()
        );
        Ok(created)
    }
}

impl Importer for DefinitionSet {
    fn flatten(&self, definition_id: &str) -> Result<Vec<(String, bool)>, PoolError> {
        let root = self
            .get(definition_id)
            .ok_or_else(|| PoolError::not_found(definition_id))?;
        let mut leaves = Vec::new();
        self.flatten_into(root, true, &mut HashSet::new(), &mut leaves)?;
        Ok(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Driver;
    use pool_graph::PartLibrary;

    fn definitions() -> DefinitionSet {
        DefinitionSet::new(vec![
            ComponentDefinition::leaf("p", &["promoter"]).with_display_id("pX"),
            ComponentDefinition::leaf("c", &["cds"]).with_display_id("cX"),
            ComponentDefinition::leaf("t", &[]).with_display_id("tX"),
            ComponentDefinition::composite(
                "unit",
                vec![
                    SubComponent::new("c", 20, Orientation::Inline),
                    SubComponent::new("p", 1, Orientation::Inline),
                    SubComponent::new("t", 0, Orientation::Inline),
                ],
            ),
            ComponentDefinition::composite(
                "device",
                vec![
                    SubComponent::new("unit", 5, Orientation::ReverseComplement),
                    SubComponent::new("t", 1, Orientation::Inline),
                ],
            )
            .with_display_id("dev"),
        ])
        .expect("unique ids")
    }

    #[test]
    fn test_flatten_sorts_by_start_and_skips_unannotated() {
        let leaves = definitions().flatten("unit").expect("flattens");
        assert_eq!(leaves, vec![("p".to_string(), true), ("c".to_string(), true)]);
    }

    #[test]
    fn test_flatten_toggles_orientation_through_reverse_annotation() {
        let leaves = definitions().flatten("device").expect("flattens");
        assert_eq!(
            leaves,
            vec![
                ("t".to_string(), true),
                ("p".to_string(), false),
                ("c".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_flatten_rejects_self_containment() {
        let set = DefinitionSet::new(vec![ComponentDefinition::composite(
            "loop",
            vec![SubComponent::new("loop", 1, Orientation::Inline)],
        )])
        .expect("unique ids");
        assert!(matches!(set.flatten("loop"), Err(PoolError::InvalidParameter(_))));
    }

    #[test]
    fn test_duplicate_ids_conflict() {
        let result = DefinitionSet::new(vec![
            ComponentDefinition::leaf("p", &[]),
            ComponentDefinition::leaf("p", &[]),
        ]);
        assert_eq!(result.err(), Some(PoolError::Conflict("p".into())));
    }

    #[test]
    fn test_import_library_builds_chains_and_catalog() {
        let driver = Driver::new();
        let mut catalog = PartCatalog::new();
        let created = definitions()
            .import_library(&driver, &mut catalog)
            .expect("imports");
        assert_eq!(created, vec!["unit".to_string(), "dev".to_string()]);

        let device = driver.load("dev").expect("stored");
        assert_eq!(device.edge_count(), 3);
        let mut ids: Vec<String> = device
            .edges()
            .flat_map(|(_, e)| e.component_ids().to_vec())
            .collect();
        ids.sort();
        assert_eq!(ids, ["r^c", "r^p", "t"]);

        assert!(catalog.resolve_part("pX").is_some());
        assert!(catalog.resolve_part("sequence_feature").is_some());
    }
}
