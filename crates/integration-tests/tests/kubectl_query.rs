//! End-to-end qdmanage queries through the kubectl adapter
//!
//! A fake kubectl script stands in for the cluster; everything from argument
//! building to JSON parsing runs for real.

#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::FakeKubectl;
use qdprobe_core::domain::entities::{Address, Connection, Listener};
use qdprobe_core::port::{CommandExecutor, ExecRequest, ExecutionError, SystemTimeProvider};
use qdprobe_core::{EntityType, QdmanageService, QueryError, RawEntity};
use tokio_test::{assert_err, assert_ok};

fn service(fake: &FakeKubectl) -> QdmanageService {
    QdmanageService::new(
        Arc::new(fake.executor()),
        Arc::new(SystemTimeProvider::new()),
    )
}

#[tokio::test]
async fn test_query_sends_qdmanage_command_to_pod() {
    let fake = FakeKubectl::new("query-args");
    let executor = qdprobe_infra_system::KubectlExecutor::with_default_env(
        fake.config().with_namespace("amq").with_container("router"),
    );
    let service = QdmanageService::new(Arc::new(executor), Arc::new(SystemTimeProvider::new()));

    let addresses = assert_ok!(service.query::<Address>("router-0", None).await);

    assert!(addresses.is_empty());
    assert_eq!(
        fake.calls(),
        vec![
            "exec router-0 -n amq -c router -- qdmanage query --type org.apache.qpid.dispatch.router.address"
        ]
    );
}

#[tokio::test]
async fn test_query_parses_and_filters_connections() {
    let fake = FakeKubectl::new("query-filter");
    fake.respond(
        r#"[
            {"name": "connection/1", "identity": "1", "role": "normal", "host": "10.0.0.5:40000"},
            {"name": "connection/2", "identity": "2", "role": "inter-router", "container": "router-1"},
            {"name": "connection/3", "identity": "3", "role": "inter-router", "container": "router-2"}
        ]"#,
    );
    let inter_router = |c: &Connection| c.role.as_deref() == Some("inter-router");

    let conns = assert_ok!(service(&fake).query::<Connection>("router-0", Some(&inter_router)).await);

    let peers: Vec<&str> = conns.iter().filter_map(|c| c.container.as_deref()).collect();
    assert_eq!(peers, vec!["router-1", "router-2"]);
}

#[tokio::test]
async fn test_query_raw_entities_by_short_type() {
    let fake = FakeKubectl::new("query-raw");
    fake.respond(r#"[{"name": "amqp", "identity": "listener/0", "port": "5672"}]"#);

    let listeners = assert_ok!(
        service(&fake)
            .query_as::<RawEntity>("router-0", &EntityType::new("listener"), None)
            .await
    );

    assert_eq!(listeners[0].identity(), Some("listener/0"));
    assert!(fake.calls()[0].ends_with("qdmanage query --type listener"));
}

#[tokio::test]
async fn test_command_failure_surfaces_stderr() {
    let fake = FakeKubectl::new("query-fail");
    fake.fail_with("Error from server (NotFound): pods \"router-9\" not found");

    let err = assert_err!(service(&fake).query::<Listener>("router-9", None).await);

    match err {
        QueryError::Execution(ExecutionError::CommandFailed { exit_code, stderr }) => {
            assert_eq!(exit_code, Some(1));
            assert!(stderr.contains("NotFound"));
        }
        other => panic!("expected CommandFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_garbage_output_is_deserialization_error() {
    let fake = FakeKubectl::new("query-garbage");
    fake.respond("ConnectionException: Connection refused");

    let err = assert_err!(service(&fake).query::<Listener>("router-0", None).await);

    assert!(matches!(err, QueryError::Deserialization(_)));
}

#[tokio::test]
async fn test_hung_exec_times_out() {
    let fake = FakeKubectl::new("exec-timeout");
    fake.hang_for_secs(5);
    let executor = fake.executor();
    let request = ExecRequest::new(
        "router-0",
        vec!["qdmanage".to_string()],
        Duration::from_millis(300),
    );

    let start = Instant::now();
    let result = executor.exec(&request).await;

    assert!(matches!(result, Err(ExecutionError::Timeout(_))));
    assert!(start.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_fakes_with_same_name_are_isolated_and_cleaned_up() {
    let first = FakeKubectl::new("isolation");
    let second = FakeKubectl::new("isolation");
    second.fail_with("error: pod not found");
    let script = first.config().kubectl;

    let conns = assert_ok!(service(&first).query::<Connection>("router-0", None).await);

    assert!(conns.is_empty());
    assert!(second.calls().is_empty());
    drop(first);
    assert!(!std::path::Path::new(&script).exists());
}
