// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid entity type: {0}")]
    InvalidEntityType(String),

    #[error("Invalid filter expression: {0}")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
