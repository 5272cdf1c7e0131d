// Polling Use Case: repeat a qdmanage query until the caller is satisfied or time runs out

use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::constants::{DEFAULT_POLL_DELAY, DEFAULT_POLL_TIMEOUT};
use super::{query, DoneFn, EntityFilter};
use crate::domain::EntityType;
use crate::error::Result;
use crate::port::{CommandExecutor, TimeProvider};

/// Delay between attempts and overall deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub delay: Duration,
    pub timeout: Duration,
}

impl PollOptions {
    pub fn new(delay: Duration, timeout: Duration) -> Self {
        Self { delay, timeout }
    }

    pub fn from_secs(delay_secs: u64, timeout_secs: u64) -> Self {
        Self::new(
            Duration::from_secs(delay_secs),
            Duration::from_secs(timeout_secs),
        )
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_DELAY, DEFAULT_POLL_TIMEOUT)
    }
}

/// Execute query with retries
///
/// Attempts the query immediately, then sleeps `options.delay` after every
/// attempt that `done` rejects. The deadline is only checked between attempts:
/// the loop keeps going while elapsed time is strictly below `options.timeout`,
/// so the call can overrun by one delay plus one command duration.
///
/// Returns as soon as `done` accepts an outcome (or after the first attempt
/// when `done` is None). On timeout the last outcome is returned unchanged;
/// there is no dedicated timeout error. A zero timeout makes no attempt and
/// returns an empty list.
pub async fn execute_with_retries<E: DeserializeOwned>(
    executor: &dyn CommandExecutor,
    time_provider: &dyn TimeProvider,
    pod: &str,
    entity_type: &EntityType,
    options: PollOptions,
    filter: Option<EntityFilter<'_, E>>,
    done: Option<DoneFn<'_, E>>,
) -> Result<Vec<E>> {
    let start = time_provider.now();
    let mut attempts: u32 = 0;
    let mut last: Result<Vec<E>> = Ok(Vec::new());

    while time_provider.now().saturating_sub(start) < options.timeout {
        attempts += 1;
        last = query::execute(executor, pod, entity_type, filter).await;

        let finished = match done {
            None => true,
            Some(done) => done(&last),
        };
        if finished {
            info!(
                pod = %pod,
                entity_type = %entity_type,
                attempts = attempts,
                elapsed_ms = time_provider.now().saturating_sub(start).as_millis() as u64,
                "qdmanage poll completed"
            );
            return last;
        }

        match &last {
            Ok(entities) => debug!(
                pod = %pod,
                attempt = attempts,
                matched = entities.len(),
                "qdmanage poll condition not met yet"
            ),
            Err(e) => warn!(
                pod = %pod,
                attempt = attempts,
                error = %e,
                "qdmanage poll attempt failed"
            ),
        }

        time_provider.sleep(options.delay).await;
    }

    warn!(
        pod = %pod,
        entity_type = %entity_type,
        attempts = attempts,
        timeout_secs = options.timeout.as_secs(),
        "qdmanage poll timed out, returning last outcome"
    );

    last
}
