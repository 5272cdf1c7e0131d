// qdprobe Infrastructure - System Adapters
// Implements: CommandExecutor (kubectl exec)

pub mod config;
pub mod kubectl_executor;

pub use config::KubectlConfig;
pub use kubectl_executor::{KubectlExecutor, DEFAULT_ENV_ALLOWLIST};
