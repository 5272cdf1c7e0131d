// Central Error Type for qdmanage queries

use thiserror::Error;

/// Error returned by a single qdmanage query attempt
///
/// Neither variant is retried by the query itself; the polling wrapper hands
/// it to the caller's completion predicate as an ordinary outcome.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Execution error: {0}")]
    Execution(#[from] crate::port::ExecutionError),

    #[error("Deserialization error: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl QueryError {
    /// True if the failure came from running the command (not from parsing its output)
    pub fn is_execution(&self) -> bool {
        matches!(self, QueryError::Execution(_))
    }
}

/// Result type alias using QueryError
pub type Result<T> = std::result::Result<T, QueryError>;
