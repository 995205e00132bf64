//! Error types surfaced by graph, storage and workflow operations.
//!
//! Every failure is returned synchronously to the caller; nothing in the
//! workspace retries internally.

use thiserror::Error;

/// Errors shared by every crate in the workspace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A referenced part name or graph id does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A graph would be created or renamed onto an id that is already taken
    /// and is not one of the declared inputs.
    #[error("Conflict: design space '{0}' already exists")]
    Conflict(String),

    /// An operation needs a non-empty list or string and received an empty one.
    #[error("Parameter must not be empty: {0}")]
    ParameterEmpty(String),

    /// Reserved for ambiguous multi-branch merges. Not raised by any path.
    #[error("Branches conflict: {0}")]
    BranchesConflict(String),

    /// Pool-spec text does not follow the bracket grammar.
    #[error("Invalid pool spec '{spec}': {reason}")]
    InvalidPoolSpec {
        /// The offending text.
        spec: String,
        /// What the parser expected.
        reason: String,
    },

    /// A numeric strength or degree level is out of range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl PoolError {
    /// Create a not-found error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a conflict error for the given graph id.
    pub fn conflict(id: impl Into<String>) -> Self {
        Self::Conflict(id.into())
    }

    /// Create an empty-parameter error naming the parameter.
    pub fn parameter_empty(name: impl Into<String>) -> Self {
        Self::ParameterEmpty(name.into())
    }

    /// Create a grammar error.
    pub fn invalid_spec(spec: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPoolSpec {
            spec: spec.into(),
            reason: reason.into(),
        }
    }
}
