use crate::labels::Components;

use super::NodeIdx;

/// A transition between two states, labelled with interchangeable parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub(crate) tail: NodeIdx,
    pub(crate) head: NodeIdx,
    pub(crate) components: Option<Components>,
}

impl Edge {
    #[must_use]
    pub const fn tail(&self) -> NodeIdx {
        self.tail
    }

    #[must_use]
    pub const fn head(&self) -> NodeIdx {
        self.head
    }

    /// Component labels, absent on a blank edge.
    #[must_use]
    pub const fn components(&self) -> Option<&Components> {
        self.components.as_ref()
    }

    /// Component ids, empty on a blank edge.
    #[must_use]
    pub fn component_ids(&self) -> &[String] {
        self.components.as_ref().map_or(&[], Components::ids)
    }

    /// Component roles, empty on a blank edge.
    #[must_use]
    pub fn component_roles(&self) -> &[String] {
        self.components.as_ref().map_or(&[], Components::roles)
    }

    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.components.is_none()
    }

    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        self.tail == self.head
    }
}
