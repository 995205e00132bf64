use contracts::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a `u32` arena handle printed as `{tag}{slot}`.
macro_rules! arena_handle {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            /// The underlying arena slot.
            inner: u32,
        }

        impl $name {
            /// Creates a handle from a raw slot number.
            #[ensures(ret.inner == id)]
            pub const fn new(id: u32) -> Self {
                Self { inner: id }
            }

            /// Returns the slot as a usize for arena access.
            #[ensures(ret == self.inner as usize)]
            pub const fn as_usize(self) -> usize {
                self.inner as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.inner)
            }
        }

        impl From<usize> for $name {
            #[inline]
            fn from(id: usize) -> Self {
                Self { inner: id as u32 }
            }
        }
    };
}

arena_handle!(
    /// Slot of a node in one [`DesignSpace`](super::DesignSpace).
    ///
    /// Unrelated to the node's `n{k}` id: the id survives copies, the handle
    /// does not. A deleted node leaves a hole, so a handle never aliases a
    /// later node.
    NodeIdx,
    "#"
);

arena_handle!(
    /// Slot of an edge in one [`DesignSpace`](super::DesignSpace). Edges have
    /// no id of their own; outside the graph they are named by their
    /// endpoints' node ids.
    EdgeIdx,
    "e"
);
