// qdmanage Service - Query router management entities inside a pod

pub mod constants;
pub mod poll;
pub mod query;

pub use poll::PollOptions;
pub use query::build_query_command;

use crate::domain::{Entity, EntityType};
use crate::error::Result;
use crate::port::{CommandExecutor, TimeProvider};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// Inclusion predicate applied to each parsed record
pub type EntityFilter<'a, E> = &'a (dyn Fn(&E) -> bool + Send + Sync);

/// Completion predicate over the latest query outcome
pub type DoneFn<'a, E> = &'a (dyn Fn(&Result<Vec<E>>) -> bool + Send + Sync);

/// qdmanage Service
///
/// # Example
/// ```text
/// let service = QdmanageService::new(Arc::new(executor), Arc::new(SystemTimeProvider::new()));
/// let inter_router = |c: &Connection| c.role.as_deref() == Some("inter-router");
/// let conns = service.query::<Connection>("router-0", Some(&inter_router)).await?;
/// ```
pub struct QdmanageService {
    executor: Arc<dyn CommandExecutor>,
    time_provider: Arc<dyn TimeProvider>,
}

impl QdmanageService {
    pub fn new(executor: Arc<dyn CommandExecutor>, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            executor,
            time_provider,
        }
    }

    /// Query all `E` records in `pod`
    pub async fn query<E: Entity>(
        &self,
        pod: &str,
        filter: Option<EntityFilter<'_, E>>,
    ) -> Result<Vec<E>> {
        self.query_as(pod, &E::entity_type(), filter).await
    }

    /// Query with an explicit type tag (e.g. `RawEntity` records)
    pub async fn query_as<E: DeserializeOwned>(
        &self,
        pod: &str,
        entity_type: &EntityType,
        filter: Option<EntityFilter<'_, E>>,
    ) -> Result<Vec<E>> {
        query::execute(self.executor.as_ref(), pod, entity_type, filter).await
    }

    /// Poll `E` records until `done` accepts an outcome or `options.timeout` passes
    pub async fn query_with_retries<E: Entity>(
        &self,
        pod: &str,
        options: PollOptions,
        filter: Option<EntityFilter<'_, E>>,
        done: Option<DoneFn<'_, E>>,
    ) -> Result<Vec<E>> {
        self.query_as_with_retries(pod, &E::entity_type(), options, filter, done)
            .await
    }

    pub async fn query_as_with_retries<E: DeserializeOwned>(
        &self,
        pod: &str,
        entity_type: &EntityType,
        options: PollOptions,
        filter: Option<EntityFilter<'_, E>>,
        done: Option<DoneFn<'_, E>>,
    ) -> Result<Vec<E>> {
        poll::execute_with_retries(
            self.executor.as_ref(),
            self.time_provider.as_ref(),
            pod,
            entity_type,
            options,
            filter,
            done,
        )
        .await
    }
}
