//! Wait error types.

use std::time::Duration;

use thiserror::Error;

use crate::driver::DriverError;

/// Errors that end a wait.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// The condition did not reach the wanted state in time.
    #[error("{message} (after {attempts} attempts in {elapsed:?})")]
    Timeout {
        message: String,
        elapsed: Duration,
        attempts: u32,
        /// Last transient driver error seen while polling, if any.
        last_error: Option<DriverError>,
    },

    /// The condition failed with an error it does not treat as transient.
    #[error("condition failed: {0}")]
    Driver(#[from] DriverError),
}

impl WaitError {
    /// Check if this is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
