// Application Layer - Use Cases

pub mod qdmanage;

// Re-exports
pub use qdmanage::{PollOptions, QdmanageService};
