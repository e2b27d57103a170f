//! Consistency runs against a stubbed Rekor instance.
//!
//! The stub serves a 13-leaf tree head and the 7 -> 13 consistency proof.

use rekor_client::RekorClient;
use rekor_merkle::Error as MerkleError;
use rekor_monitor::consistency::{run_consistency, ConsistencyArgs};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOG_INFO_JSON: &str = include_str!("../../rekor-client/tests/data/log_info.json");
const CONSISTENCY_PROOF_JSON: &str =
    include_str!("../../rekor-client/tests/data/consistency_proof.json");

const TREE_ID: &str = "1193050959916656506";
const ROOT_AT_7: &str = "9139601cc1ca8ab2a7a0c2c134c04845f2b1ba549a83d6c845cfcda439cc585d";
const ROOT_AT_13: &str = "96a5a87ed7ac60e0c1b3dbd8d68227ee37e2971a9269db7e93a2a02ced3f7160";
const EMPTY_ROOT: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// Stub log whose proof endpoint is expected to be hit `proof_calls` times
async fn stub_log(proof_calls: u64) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/log"))
        .and(query_param("stable", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(LOG_INFO_JSON))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/log/proof"))
        .and(query_param("firstSize", "7"))
        .and(query_param("lastSize", "13"))
        .and(query_param("treeID", TREE_ID))
        .respond_with(ResponseTemplate::new(200).set_body_string(CONSISTENCY_PROOF_JSON))
        .expect(proof_calls)
        .mount(&server)
        .await;

    // Rekor rejects proofs that do not grow a non-empty tree
    Mock::given(method("GET"))
        .and(path("/api/v1/log/proof"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"code":400}"#))
        .expect(0)
        .mount(&server)
        .await;

    server
}

fn previous(tree_size: u64, root_hash: &str) -> ConsistencyArgs {
    ConsistencyArgs {
        tree_id: Some(TREE_ID.to_string()),
        tree_size: Some(tree_size),
        root_hash: Some(root_hash.to_string()),
        from: None,
    }
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| request.url.path().to_string())
        .collect()
}

fn merkle_error(err: &anyhow::Error) -> Option<&MerkleError> {
    match err.downcast_ref::<rekor_client::Error>() {
        Some(rekor_client::Error::Merkle(inner)) => Some(inner),
        _ => None,
    }
}

#[tokio::test]
async fn test_grown_log_fetches_and_verifies_proof() {
    let server = stub_log(1).await;
    let client = RekorClient::new(server.uri());

    run_consistency(&previous(7, ROOT_AT_7), &client)
        .await
        .unwrap();

    assert_eq!(
        requested_paths(&server).await,
        vec!["/api/v1/log", "/api/v1/log/proof"]
    );
}

#[tokio::test]
async fn test_shrunk_log_reports_size_regression() {
    let server = stub_log(0).await;
    let client = RekorClient::new(server.uri());

    let err = run_consistency(&previous(20, ROOT_AT_13), &client)
        .await
        .unwrap_err();

    assert_eq!(
        merkle_error(&err),
        Some(&MerkleError::SizeRegression {
            old_size: 20,
            new_size: 13
        })
    );
    assert!(format!("{:#}", err).contains("new tree size 13 < old tree size 20"));
    assert_eq!(requested_paths(&server).await, vec!["/api/v1/log"]);
}

#[tokio::test]
async fn test_empty_previous_tree_needs_no_proof() {
    let server = stub_log(0).await;
    let client = RekorClient::new(server.uri());

    run_consistency(&previous(0, EMPTY_ROOT), &client)
        .await
        .unwrap();

    assert_eq!(requested_paths(&server).await, vec!["/api/v1/log"]);
}

#[tokio::test]
async fn test_unchanged_log_compares_roots() {
    let server = stub_log(0).await;
    let client = RekorClient::new(server.uri());

    run_consistency(&previous(13, ROOT_AT_13), &client)
        .await
        .unwrap();

    let err = run_consistency(&previous(13, ROOT_AT_7), &client)
        .await
        .unwrap_err();
    assert!(matches!(
        merkle_error(&err),
        Some(MerkleError::RootMismatch { .. })
    ));

    assert_eq!(
        requested_paths(&server).await,
        vec!["/api/v1/log", "/api/v1/log"]
    );
}
