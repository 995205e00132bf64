//! Storage and part-library collaborators of the pool designer.
//!
//! This crate holds the in-memory graph store, the part catalog used to
//! resolve names in pool specs, the importer that turns composite part
//! definitions into library graphs, and JSON snapshots of the store.

pub mod catalog;
pub mod context;
pub mod driver;
pub mod importer;
pub mod snapshot;
pub mod store;

pub use catalog::{LeafPart, PartCatalog};
pub use context::Context;
pub use driver::{Driver, DriverError};
pub use importer::{ComponentDefinition, DefinitionSet, Importer, Orientation, SubComponent};
pub use store::GraphStore;

pub use pool_graph::DesignSpace;
