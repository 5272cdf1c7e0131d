// Port Layer - Interfaces for external dependencies

pub mod command_executor;
pub mod time_provider; // For deterministic polling tests

// Re-exports
pub use command_executor::{CommandExecutor, ExecOutput, ExecRequest, ExecutionError};
pub use time_provider::{SystemTimeProvider, TimeProvider};
