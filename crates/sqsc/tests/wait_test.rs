//! Waits on remote provisioning, driven by a scripted transport under
//! paused time

mod common;

use assert_matches::assert_matches;
use common::{PROJECT, ScriptedTransport, node_list, project_path};
use sqsc::types::NewNode;
use sqsc::{CancelToken, Error, Method, ResourceKind, WaitOptions};
use std::time::Duration;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_create_then_wait_takes_two_fetches() {
    let (transport, client) = ScriptedTransport::new()
        .then(
            Method::Post,
            &project_path("statefull_nodes"),
            201,
            r#"{"id":23,"name":"node1a","status":"not_provisionned"}"#,
        )
        .then(
            Method::Get,
            &project_path("statefull_nodes"),
            200,
            &node_list("node1a", "not_provisionned"),
        )
        .then(
            Method::Get,
            &project_path("statefull_nodes"),
            200,
            &node_list("node1a", "provisionned"),
        )
        .into_client();

    let nodes = client.stateful_nodes(PROJECT);
    let created = nodes
        .create(&NewNode::new("node1a", "t2.micro", "eu-west-1a"))
        .await
        .unwrap();
    assert_eq!(created.id, 23);
    assert_eq!(created.status, "not_provisionned");

    let start = Instant::now();
    let node = nodes.wait("node1a", &WaitOptions::new()).await.unwrap();

    assert_eq!(node.status, "provisionned");
    assert_eq!(start.elapsed(), Duration::from_secs(5));
    assert_eq!(transport.remaining(), 0);
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_create_and_wait() {
    let (transport, client) = ScriptedTransport::new()
        .then(
            Method::Post,
            &project_path("statefull_nodes"),
            201,
            r#"{"id":23,"name":"node1a","status":"not_provisionned"}"#,
        )
        .then(
            Method::Get,
            &project_path("statefull_nodes"),
            200,
            &node_list("node1a", "provisionned"),
        )
        .into_client();

    let node = client
        .extra_nodes(PROJECT)
        .create_and_wait(
            &NewNode::new("node1a", "t2.micro", "eu-west-1a"),
            &WaitOptions::new(),
        )
        .await
        .unwrap();

    assert!(node.is_provisionned());
    assert_eq!(transport.remaining(), 0);

    let body = transport.raw_requests()[0].body.clone().unwrap();
    let sent: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"name": "node1a", "node_type": "t2.micro", "zone": "eu-west-1a"})
    );
}

#[tokio::test(start_paused = true)]
async fn test_failing_fetch_ends_wait_without_looping() {
    let (transport, client) = ScriptedTransport::new()
        .then(Method::Get, &project_path("volumes"), 404, "")
        .into_client();

    let err = client
        .volumes(PROJECT)
        .wait("vol01", &WaitOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::NotFound { kind: ResourceKind::Project, ref identifier } if identifier == PROJECT);
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_missing_item_ends_wait() {
    let (transport, client) = ScriptedTransport::new()
        .then(Method::Get, &project_path("volumes"), 200, "[]")
        .into_client();

    let err = client
        .volumes(PROJECT)
        .wait("vol01", &WaitOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Volume 'vol01' does not exist");
    assert_eq!(transport.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_deadline_yields_timeout() {
    let (transport, client) = ScriptedTransport::new()
        .repeat(
            3,
            Method::Get,
            &project_path("statefull_nodes"),
            200,
            &node_list("node1a", "not_provisionned"),
        )
        .into_client();

    let start = Instant::now();
    let err = client
        .stateful_nodes(PROJECT)
        .wait(
            "node1a",
            &WaitOptions::new().deadline(Duration::from_secs(12)),
        )
        .await
        .unwrap_err();

    assert_matches!(err, Error::Timeout(d) if d == Duration::from_secs(12));
    assert!(!err.is_terminal());
    assert_eq!(start.elapsed(), Duration::from_secs(12));
    assert_eq!(transport.requests().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_mid_wait() {
    let (transport, client) = ScriptedTransport::new()
        .repeat(
            2,
            Method::Get,
            &project_path("statefull_nodes"),
            200,
            &node_list("node1a", "not_provisionned"),
        )
        .into_client();

    let token = CancelToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(7)).await;
        canceller.cancel();
    });

    let err = client
        .stateful_nodes(PROJECT)
        .wait("node1a", &WaitOptions::new().cancel_on(token))
        .await
        .unwrap_err();

    assert_matches!(err, Error::Cancelled);
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_interval_override() {
    let (transport, client) = ScriptedTransport::new()
        .then(
            Method::Get,
            &project_path("external_nodes"),
            200,
            r#"[{"id":1,"name":"edge","public_ip":"1.2.3.4","status":"provisionning"}]"#,
        )
        .then(
            Method::Get,
            &project_path("external_nodes"),
            200,
            r#"[{"id":1,"name":"edge","public_ip":"1.2.3.4","status":"provisionned"}]"#,
        )
        .into_client();

    let start = Instant::now();
    let node = client
        .external_nodes(PROJECT)
        .wait(
            "edge",
            &["provisionned", "inconsistent"],
            &WaitOptions::new().interval(Duration::from_millis(250)),
        )
        .await
        .unwrap();

    assert_eq!(node.status, "provisionned");
    assert_eq!(start.elapsed(), Duration::from_millis(250));
    assert_eq!(transport.remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_project_in_error_fails_wait() {
    let path = format!("/projects/{PROJECT}");
    let (_, client) = ScriptedTransport::new()
        .then(
            Method::Get,
            &path,
            200,
            r#"{"name":"demo","uuid":"ba90e5fe-f520-4275-897b-49a95c1157a3","infra_status":"provisionning"}"#,
        )
        .then(
            Method::Get,
            &path,
            200,
            r#"{"name":"demo","uuid":"ba90e5fe-f520-4275-897b-49a95c1157a3","infra_status":"error"}"#,
        )
        .into_client();

    let err = client
        .projects()
        .wait(PROJECT, &WaitOptions::new())
        .await
        .unwrap_err();

    assert_matches!(err, Error::Failed { kind: ResourceKind::Project, ref status, .. } if status == "error");
}

#[tokio::test(start_paused = true)]
async fn test_task_wait() {
    let (transport, client) = ScriptedTransport::new()
        .then(Method::Get, "/tasks/42", 200, r#"{"id":42,"type":"provision","status":"running"}"#)
        .then(Method::Get, "/tasks/42", 200, r#"{"id":42,"type":"provision","status":"cancelled"}"#)
        .into_client();

    let task = client.tasks().wait(42, &WaitOptions::new()).await.unwrap();

    assert!(task.is_finished());
    assert_eq!(task.status, "cancelled");
    assert_eq!(transport.remaining(), 0);
}

#[tokio::test]
async fn test_task_zero_is_in_progress_without_request() {
    let (transport, client) = ScriptedTransport::new().into_client();

    let err = client.tasks().wait(0, &WaitOptions::new()).await.unwrap_err();

    assert_matches!(err, Error::OperationInProgress);
    assert!(transport.requests().is_empty());
}
