//! Pool-spec text and its graph form.
//!
//! ```text
//! PoolSpec  := SubPool (',' SubPool)*
//! SubPool   := '[' Part (',' Part)* ']'
//! Part      := 'r^'? PartName
//! PartName  := (word-char | space)+
//! ```
//!
//! Each bracket is one assembly position; the parts inside it are the
//! interchangeable alternatives for that position.

mod parse;
mod serialize;

pub use parse::parse_pool_spec;
pub use serialize::serialize_pool;

use std::fmt;

use pool_common::PoolError;
use pool_common::prefix::{REVERSE_PREFIX, split_reverse, toggle_reverse};

use crate::labels::Components;
use crate::model::DesignSpace;

/// Component ids and roles a part name resolves to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedPart {
    pub component_ids: Vec<String>,
    pub component_roles: Vec<String>,
}

/// Lookup of part names written in pool specs.
pub trait PartLibrary {
    /// Resolves a bare part name (without the reverse marker).
    fn resolve_part(&self, name: &str) -> Option<ResolvedPart>;
}

/// One part as written inside a bracket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartRef {
    pub name: String,
    pub reverse: bool,
}

impl PartRef {
    /// Splits the reverse marker off a written part.
    #[must_use]
    pub fn new(written: &str) -> Self {
        let (name, reverse) = split_reverse(written);
        Self {
            name: name.to_string(),
            reverse,
        }
    }
}

impl fmt::Display for PartRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reverse {
            f.write_str(REVERSE_PREFIX)?;
        }
        f.write_str(&self.name)
    }
}

/// One bracket: the alternatives for a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubPool {
    pub parts: Vec<PartRef>,
}

/// A parsed pool spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolSpec {
    pub sub_pools: Vec<SubPool>,
}

/// Per-position component-id and role lists of a chain graph.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainLabels {
    pub component_ids: Vec<Vec<String>>,
    pub component_roles: Vec<Vec<String>>,
}

impl ChainLabels {
    /// Pairs the two lists up. They must have one entry per position.
    pub fn new(component_ids: Vec<Vec<String>>, component_roles: Vec<Vec<String>>) -> Result<Self, PoolError> {
        if component_ids.len() != component_roles.len() {
            return Err(PoolError::InvalidParameter(format!(
                "{} component-id lists but {} role lists",
                component_ids.len(),
                component_roles.len()
            )));
        }
        Ok(Self {
            component_ids,
            component_roles,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.component_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.component_ids.is_empty()
    }

    /// Builds the straight-line start-to-accept graph.
    #[must_use]
    pub fn into_design_space(self, space_id: impl Into<String>) -> DesignSpace {
        let positions = self
            .component_ids
            .into_iter()
            .zip(self.component_roles)
            .map(|(ids, roles)| Components::new(ids, roles))
            .collect();
        DesignSpace::from_chain(space_id, positions)
    }
}

impl PoolSpec {
    /// Resolves every part through `library`. Alternatives within a bracket
    /// are unioned in written order; parts written reversed have their ids
    /// re-tagged.
    ///
    /// # Errors
    /// `NotFound` naming the first part the library does not know.
    pub fn resolve(&self, library: &impl PartLibrary) -> Result<ChainLabels, PoolError> {
        let mut labels = ChainLabels::default();
        for sub_pool in &self.sub_pools {
            let mut ids: Vec<String> = Vec::new();
            let mut roles: Vec<String> = Vec::new();
            for part in &sub_pool.parts {
                let resolved = library
                    .resolve_part(&part.name)
                    .filter(|r| !r.component_ids.is_empty())
                    .ok_or_else(|| PoolError::not_found(part.to_string()))?;
                for id in resolved.component_ids {
                    let id = if part.reverse { toggle_reverse(&id) } else { id };
                    if !ids.contains(&id) {
                        ids.push(id);
                    }
                }
                for role in resolved.component_roles {
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                }
            }
            labels.component_ids.push(ids);
            labels.component_roles.push(roles);
        }
        Ok(labels)
    }

    /// Resolves the spec and builds its graph.
    ///
    /// # Errors
    /// See [`PoolSpec::resolve`].
    pub fn to_design_space(
        &self,
        space_id: impl Into<String>,
        library: &impl PartLibrary,
    ) -> Result<DesignSpace, PoolError> {
        Ok(self.resolve(library)?.into_design_space(space_id))
    }
}

impl fmt::Display for PoolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, sub_pool) in self.sub_pools.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str("[")?;
            for (j, part) in sub_pool.parts.iter().enumerate() {
                if j > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{part}")?;
            }
            f.write_str("]")?;
        }
        Ok(())
    }
}
