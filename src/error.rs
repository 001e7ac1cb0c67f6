//! Errors surfaced by the transaction store and the journal runner.
//!
//! Store validation failures are reported as [`Error::InvalidArgument`] and
//! never leave a partial mutation behind. [`Error::ListenersFailed`] is the
//! one error returned *after* a mutation was committed: every listener has
//! been notified and some of them reported a failure.

use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{} listener(s) failed to handle a state change", .0.len())]
    ListenersFailed(Vec<ListenerFailure>),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    CsvAsync(#[from] csv_async::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Join(#[from] tokio::task::JoinError),
}

/// A listener that returned an error from `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFailure {
    /// Position of the listener in registration order at notification time.
    pub position: usize,
    pub message: String,
}

impl fmt::Display for ListenerFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener #{}: {}", self.position, self.message)
    }
}
