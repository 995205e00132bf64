//! Combinatorial DNA pool design over a library of stored design spaces.
//!
//! [`PoolDesigner`] turns pool specs into query graphs, matches each one
//! against the library's composite constructs and folds the matches back
//! into pool-spec text. [`operators`] exposes the stored-graph merge and
//! union operations the workflow is built from.

mod designer;
mod error;
mod library;
pub mod operators;
mod scratch;

pub use designer::PoolDesigner;
pub use error::DesignError;
pub use library::{Library, load_library};
pub use operators::{merge_spaces, union_spaces};

pub use pool_common::{CandidatePolicy, DesignConfig, MatchDegree, MatchStrength, MergeConfig, PoolError};
