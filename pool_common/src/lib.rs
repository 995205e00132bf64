//! Common types shared across the pool designer workspace.
//!
//! This crate provides the merge and workflow configuration, the error
//! taxonomy surfaced to callers, and the helpers for the reserved
//! component-id and graph-id prefixes.

mod config;
mod error;
pub mod prefix;

pub use crate::config::*;
pub use crate::error::*;
pub use crate::prefix::{RESERVED_PREFIX, REVERSE_PREFIX};
