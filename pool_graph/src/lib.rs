//! Design-space graphs and the merge engine behind pool design.
//!
//! A design space is a small automaton whose edges are labelled with
//! interchangeable DNA parts. This crate provides the arena graph model, the
//! label-set algebra, strand reversal, intersection/union merges, and the
//! conversion between graphs and pool-spec text.

pub mod engine;
pub mod labels;
pub mod model;
pub mod pool_spec;
mod reverse;

pub use engine::{SpaceDiff, merge_design_spaces, merge_graphs};
pub use labels::Components;
pub use model::{DesignSpace, Edge, EdgeIdx, Node, NodeIdx, NodeKind};
pub use pool_spec::{ChainLabels, PartLibrary, PoolSpec, ResolvedPart, parse_pool_spec, serialize_pool};
