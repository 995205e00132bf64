//! Arena-backed graph model.

mod edge;
mod handle;
mod node;
mod space;

pub use edge::Edge;
pub use handle::{EdgeIdx, NodeIdx};
pub use node::{Node, NodeKind};
pub use space::DesignSpace;
