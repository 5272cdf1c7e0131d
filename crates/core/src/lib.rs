// qdprobe Core - Domain, Ports & qdmanage Use Cases
// NO process spawning here: command execution lives behind the CommandExecutor port

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::qdmanage::{PollOptions, QdmanageService};
pub use domain::{Entity, EntityType, RawEntity};
pub use error::{QueryError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
