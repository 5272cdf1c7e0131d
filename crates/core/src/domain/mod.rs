// Domain Layer - Management entity records and type tags

pub mod entities;
pub mod entity;
pub mod error;

// Re-exports
pub use entity::{Entity, EntityType, RawEntity};
pub use error::DomainError;
