//! Polling against a fake kubectl on the real clock

#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::FakeKubectl;
use qdprobe_core::domain::entities::{Link, Node};
use qdprobe_core::port::SystemTimeProvider;
use qdprobe_core::{PollOptions, QdmanageService, Result};
use tokio_test::{assert_err, assert_ok};

fn service(fake: &FakeKubectl) -> QdmanageService {
    QdmanageService::new(
        Arc::new(fake.executor()),
        Arc::new(SystemTimeProvider::new()),
    )
}

/// Mesh formation: wait until the router sees both peers
#[tokio::test]
async fn test_wait_for_router_mesh() {
    let fake = FakeKubectl::new("poll-mesh");
    fake.respond(r#"[{"name": "router.node/r1", "id": "r1"}, {"name": "router.node/r2", "id": "r2"}]"#);
    fake.respond_nth(1, "[]");
    fake.respond_nth(2, r#"[{"name": "router.node/r1", "id": "r1"}]"#);
    let mesh_formed = |r: &Result<Vec<Node>>| matches!(r, Ok(nodes) if nodes.len() == 2);

    let nodes = assert_ok!(
        service(&fake)
            .query_with_retries::<Node>(
                "router-0",
                PollOptions::from_secs(1, 30),
                None,
                Some(&mesh_formed),
            )
            .await
    );

    assert_eq!(nodes.len(), 2);
    assert_eq!(fake.calls().len(), 3);
}

#[tokio::test]
async fn test_never_done_runs_until_timeout() {
    let fake = FakeKubectl::new("poll-timeout");
    let never = |_: &Result<Vec<Link>>| false;

    let start = Instant::now();
    let links = assert_ok!(
        service(&fake)
            .query_with_retries::<Link>(
                "router-0",
                PollOptions::from_secs(1, 3),
                None,
                Some(&never),
            )
            .await
    );
    let elapsed = start.elapsed();

    assert!(links.is_empty());
    assert_eq!(fake.calls().len(), 3);
    assert!(elapsed >= Duration::from_secs(3));
    assert!(elapsed < Duration::from_secs(6));
}

#[tokio::test]
async fn test_failing_pod_returns_last_error() {
    let fake = FakeKubectl::new("poll-error");
    fake.fail_with("error: unable to upgrade connection: container not found");
    let succeeded = |r: &Result<Vec<Link>>| r.is_ok();

    let err = assert_err!(
        service(&fake)
            .query_with_retries::<Link>(
                "router-0",
                PollOptions::from_secs(1, 2),
                None,
                Some(&succeeded),
            )
            .await
    );

    assert!(err.is_execution());
    assert_eq!(fake.calls().len(), 2);
}
