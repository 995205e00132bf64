//! Errors surfaced by the pool designer.

use pool_common::PoolError;
use pool_driver::DriverError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DesignError {
    /// The workflow or an operator rejected its input.
    #[error(transparent)]
    Pool(#[from] PoolError),

    /// Reading the part library or a snapshot failed.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

impl DesignError {
    /// The domain error behind this failure, if there is one.
    pub fn as_pool_error(&self) -> Option<&PoolError> {
        match self {
            Self::Pool(e) | Self::Driver(DriverError::Pool(e)) => Some(e),
            Self::Driver(_) => None,
        }
    }
}
