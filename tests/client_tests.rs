//! Backend client tests against a stubbed GNS3 server.

use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gns3_mcp::client::types::{LinkEndpoint, NodeSpec};
use gns3_mcp::client::GnsClient;
use gns3_mcp::config::BridgeConfig;
use gns3_mcp::error::BridgeError;

fn config_for(server: &MockServer) -> BridgeConfig {
    let addr = server.address();
    BridgeConfig {
        host: addr.ip().to_string(),
        port: addr.port(),
        timeout_secs: 2,
        ..BridgeConfig::default()
    }
}

fn client_for(server: &MockServer) -> GnsClient {
    GnsClient::new(&config_for(server)).expect("client should build")
}

#[tokio::test]
async fn list_projects_round_trips_records_unmodified() {
    let server = MockServer::start().await;
    let records = json!([
        {
            "project_id": "a1",
            "name": "lab-a",
            "status": "opened",
            "scene_width": 2000,
        },
        {
            "project_id": "b2",
            "name": "lab-b",
            "status": "closed",
            "auto_close": true,
        },
    ]);
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let projects = client_for(&server).list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(serde_json::to_value(&projects).unwrap(), records);
}

#[tokio::test]
async fn second_delete_of_the_same_project_is_a_backend_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/projects/p-1"))
        .respond_with(ResponseTemplate::new(204))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/projects/p-1"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Project not found" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_project("p-1").await.unwrap();

    let err = client.delete_project("p-1").await.unwrap_err();
    match err {
        BridgeError::BackendRejected { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Project not found");
        }
        other => panic!("expected BackendRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn slow_backend_call_times_out_with_a_readable_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;

    let config = BridgeConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let client = GnsClient::new(&config).unwrap();

    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, BridgeError::Timeout { .. }));
    let message = err.to_string();
    assert!(message.contains("timeout"));
    assert!(message.contains("list_projects"));
}

#[tokio::test]
async fn a_timing_out_call_does_not_affect_a_concurrent_fast_one() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/nodes"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([]))
                .set_delay(Duration::from_secs(10)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/templates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "template_id": "t-1", "name": "alpine" },
        ])))
        .mount(&server)
        .await;

    let config = BridgeConfig {
        timeout_secs: 1,
        ..config_for(&server)
    };
    let client = GnsClient::new(&config).unwrap();

    let (slow, fast) = tokio::join!(client.list_nodes("p-1"), client.list_templates());

    assert!(matches!(slow, Err(BridgeError::Timeout { .. })));
    assert_eq!(fast.unwrap().len(), 1);
}

#[tokio::test]
async fn credentials_are_attached_when_auth_is_required() {
    let server = MockServer::start().await;
    // base64("admin:secret")
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = BridgeConfig {
        auth_required: true,
        username: Some("admin".into()),
        password: Some("secret".into()),
        ..config_for(&server)
    };
    let client = GnsClient::new(&config).unwrap();

    client.list_projects().await.unwrap();
}

#[tokio::test]
async fn no_credential_header_is_sent_without_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client_for(&server).list_projects().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn non_array_listing_body_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "oops": true })))
        .mount(&server)
        .await;

    let err = client_for(&server).list_projects().await.unwrap_err();
    assert!(matches!(err, BridgeError::MalformedResponse { .. }));
}

#[tokio::test]
async fn record_missing_its_identifier_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/nodes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{ "name": "r1", "status": "started" }])),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).list_nodes("p-1").await.unwrap_err();
    match err {
        BridgeError::MalformedResponse { operation, .. } => assert_eq!(operation, "list_nodes"),
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_body_on_action_endpoints_is_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/projects/p-1/close"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).close_project("p-1").await.unwrap();
}

#[tokio::test]
async fn create_node_from_template_targets_the_local_compute() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/projects/p-1/nodes"))
        .and(body_partial_json(json!({
            "name": "r1",
            "node_type": "qemu",
            "compute_id": "local",
            "template_id": "t-1",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "node_id": "n-1",
            "name": "r1",
            "status": "stopped",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let spec = NodeSpec::new("r1", "qemu", 0, 0).with_template("t-1");
    let node = client_for(&server).create_node("p-1", &spec).await.unwrap();
    assert_eq!(node.node_id, "n-1");
}

#[tokio::test]
async fn create_link_wires_adapter_zero_on_both_ends() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node_id": "n-1", "name": "r1" },
            { "node_id": "n-2", "name": "r2" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/projects/p-1/links"))
        .and(body_partial_json(json!({
            "nodes": [
                { "node_id": "n-1", "adapter_number": 0, "port_number": 0 },
                { "node_id": "n-2", "adapter_number": 0, "port_number": 1 },
            ],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "link_id": "l-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let link = client_for(&server)
        .create_link(
            "p-1",
            LinkEndpoint::new("n-1", 0),
            LinkEndpoint::new("n-2", 1),
        )
        .await
        .unwrap();
    assert_eq!(link.link_id, "l-1");
}

#[tokio::test]
async fn create_link_rejects_unknown_endpoint_nodes_before_posting() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node_id": "n-1", "name": "r1" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/projects/p-1/links"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "link_id": "l-1" })))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .create_link(
            "p-1",
            LinkEndpoint::new("n-1", 0),
            LinkEndpoint::new("n-9", 0),
        )
        .await
        .unwrap_err();

    match err {
        BridgeError::Validation(message) => assert!(message.contains("n-9")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[tokio::test]
async fn project_stats_aggregate_nodes_and_links() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "project_id": "p-1",
            "name": "core-lab",
            "status": "opened",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/nodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "node_id": "n-1", "status": "started" },
            { "node_id": "n-2", "status": "started" },
            { "node_id": "n-3", "status": "stopped" },
            { "node_id": "n-4" },
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "link_id": "l-1" },
            { "link_id": "l-2" },
        ])))
        .mount(&server)
        .await;

    let stats = client_for(&server).get_project_stats("p-1").await.unwrap();

    assert_eq!(stats.project_id, "p-1");
    assert_eq!(stats.project_name, "core-lab");
    assert_eq!(stats.status.as_deref(), Some("opened"));
    assert_eq!(stats.total_nodes, 4);
    assert_eq!(stats.total_links, 2);
    assert_eq!(stats.node_status.get("started").copied(), Some(2));
    assert_eq!(stats.node_status.get("stopped").copied(), Some(1));
    assert_eq!(stats.node_status.get("unknown").copied(), Some(1));
}

#[tokio::test]
async fn backend_error_without_json_body_uses_the_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/projects/p-1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_project("p-1").await.unwrap_err();
    match err {
        BridgeError::BackendRejected { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "Bad Gateway");
        }
        other => panic!("expected BackendRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error_not_a_panic() {
    // Nothing listens on port 1.
    let config = BridgeConfig {
        host: "127.0.0.1".into(),
        port: 1,
        timeout_secs: 1,
        ..BridgeConfig::default()
    };
    let client = GnsClient::new(&config).unwrap();

    let err = client.list_projects().await.unwrap_err();
    assert!(matches!(err, BridgeError::Network { .. }));
}
