// Query Use Case: one `qdmanage query --type <tag>` against a pod

use serde::de::DeserializeOwned;
use tracing::{debug, info};

use super::constants::{QDMANAGE_EXEC_TIMEOUT, QDMANAGE_QUERY_COMMAND};
use super::EntityFilter;
use crate::domain::EntityType;
use crate::error::Result;
use crate::port::{CommandExecutor, ExecRequest};

/// Build `qdmanage query --type <entity_type>`
pub fn build_query_command(entity_type: &EntityType) -> Vec<String> {
    QDMANAGE_QUERY_COMMAND
        .iter()
        .map(|part| part.to_string())
        .chain(std::iter::once(entity_type.as_str().to_string()))
        .collect()
}

/// Execute query use case
///
/// Runs qdmanage in `pod`, parses stdout as a JSON array of `E` and keeps the
/// records accepted by `filter` (all of them when `filter` is None), in the
/// order qdmanage printed them.
///
/// # Errors
///
/// * `QueryError::Execution` - exec failed, timed out or exited non-zero
/// * `QueryError::Deserialization` - stdout is not a JSON array of `E`
///   (nothing is returned, not even the records that did parse)
pub async fn execute<E: DeserializeOwned>(
    executor: &dyn CommandExecutor,
    pod: &str,
    entity_type: &EntityType,
    filter: Option<EntityFilter<'_, E>>,
) -> Result<Vec<E>> {
    let request = ExecRequest::new(pod, build_query_command(entity_type), QDMANAGE_EXEC_TIMEOUT);

    debug!(
        pod = %pod,
        entity_type = %entity_type,
        command = ?request.command,
        "Running qdmanage query"
    );

    let output = executor.exec(&request).await?;
    let parsed: Vec<E> = serde_json::from_str(&output.stdout)?;
    let total = parsed.len();

    let entities: Vec<E> = match filter {
        None => parsed,
        Some(filter) => parsed.into_iter().filter(|entity| filter(entity)).collect(),
    };

    info!(
        pod = %pod,
        entity_type = %entity_type,
        total = total,
        matched = entities.len(),
        duration_ms = output.duration_ms,
        "qdmanage query completed"
    );

    Ok(entities)
}
