// qdmanage constants (no magic values in use cases)
use std::time::Duration;

/// Command prefix; the entity type tag is appended as the last argument
pub const QDMANAGE_QUERY_COMMAND: [&str; 3] = ["qdmanage", "query", "--type"];

/// Upper bound for a single `qdmanage query` exec (60s)
/// Independent of the polling timeout
pub const QDMANAGE_EXEC_TIMEOUT: Duration = Duration::from_secs(60);

/// Default delay between polling attempts (1s)
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(1);

/// Default overall polling timeout (60s)
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(60);
