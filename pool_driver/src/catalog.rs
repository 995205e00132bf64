//! Name lookup for leaf parts.

use indexmap::IndexMap;
use pool_graph::{PartLibrary, ResolvedPart};
use pool_graph::labels::DEFAULT_ROLE;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// A part without sub-components, as it enters the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafPart {
    pub id: String,
    #[serde(default)]
    pub display_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LeafPart {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_id: None,
            name: None,
            roles: Vec::new(),
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

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    /// Roles, or the generic feature role when none were given.
    pub fn effective_roles(&self) -> Vec<String> {
        if self.roles.is_empty() {
            vec![DEFAULT_ROLE.to_string()]
        } else {
            self.roles.clone()
        }
    }
}

/// Part names to the component ids and roles they stand for.
///
/// A leaf is reachable by its display id, its name and each of its roles. A
/// key shared by several leaves resolves to all of them.
#[derive(Clone, Debug, Default)]
pub struct PartCatalog {
    entries: IndexMap<String, ResolvedPart>,
}

/// Trims a written name and expands the short role names people type.
pub fn canonical_name(name: &str) -> &str {
    match name.trim() {
        "RBS" => "ribosome_entry_site",
        "scar" => "restriction_enzyme_assembly_scar",
        other => other,
    }
}

impl PartCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, leaf: &LeafPart) {
        let roles = leaf.effective_roles();
        let keys = leaf
            .display_id
            .iter()
            .chain(leaf.name.iter())
            .chain(roles.iter());
        for key in keys {
            self.register_part(key, &leaf.id, &roles);
        }
    }

    /// Adds `component_id` and `roles` under `key`, extending an existing
    /// entry.
    pub fn register_part(&mut self, key: &str, component_id: &str, roles: &[String]) {
        let key = key.trim();
        if key.is_empty() {
            return;
        }
        let entry = self.entries.entry(key.to_string()).or_default();
        if !entry.component_ids.iter().any(|id| id == component_id) {
            entry.component_ids.push(component_id.to_string());
        }
        for role in roles {
            if !entry.component_roles.contains(role) {
                entry.component_roles.push(role.clone());
            }
        }
        trace!("catalog entry '{key}' now has {} ids", entry.component_ids.len());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered keys in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl PartLibrary for PartCatalog {
    fn resolve_part(&self, name: &str) -> Option<ResolvedPart> {
        self.entries.get(canonical_name(name)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> PartCatalog {
        let mut catalog = PartCatalog::new();
        catalog.register(
            &LeafPart::new("urn:pJ23100")
                .with_display_id("J23100")
                .with_name("strong promoter")
                .with_role("promoter"),
        );
        catalog.register(&LeafPart::new("urn:pJ23101").with_display_id("J23101").with_role("promoter"));
        catalog.register(&LeafPart::new("urn:B0034").with_display_id("B0034").with_role("ribosome_entry_site"));
        catalog.register(&LeafPart::new("urn:blob").with_display_id("blob"));
        catalog
    }

    #[test]
    fn test_role_key_collects_every_part() {
        let resolved = catalog().resolve_part("promoter").expect("role registered");
        assert_eq!(resolved.component_ids, ["urn:pJ23100", "urn:pJ23101"]);
        assert_eq!(resolved.component_roles, ["promoter"]);
    }

    #[test]
    fn test_names_are_trimmed_and_abbreviations_expanded() {
        let catalog = catalog();
        assert_eq!(
            catalog.resolve_part(" RBS ").map(|r| r.component_ids),
            Some(vec!["urn:B0034".to_string()])
        );
        assert!(catalog.resolve_part("strong promoter").is_some());
        assert!(catalog.resolve_part("nope").is_none());
    }

    #[test]
    fn test_roleless_leaf_gets_default_role() {
        let catalog = catalog();
        let blob = catalog.resolve_part("blob").expect("registered");
        assert_eq!(blob.component_roles, [DEFAULT_ROLE]);
        assert!(catalog.resolve_part(DEFAULT_ROLE).is_some());
    }
}
