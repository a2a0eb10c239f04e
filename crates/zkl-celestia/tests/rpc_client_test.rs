//! Contract tests for CelestiaClient against a mocked node RPC endpoint.
//!
//! ## Methods Tested
//!
//! | Method | Test |
//! |--------|------|
//! | `node.Info` | `node_info_*` |
//! | `state.Balance` | `submit_*` |
//! | `blob.Submit` | `submit_*` |
//! | `blob.GetAll` | `get_all_*`, `verify_content_*` |

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zkl_celestia::{CelestiaClient, CelestiaConfig, CelestiaError, Namespace};
use zkl_core::{ContentId, TextEncoding};

const CID: &str = "QmTestCID123";
const CID_BASE64: &str = "UW1UZXN0Q0lEMTIz";
const DEFAULT_NS_HEX: &str = "0x7a6b6c2d69706673";

fn test_client(server: &MockServer) -> CelestiaClient {
    let config = CelestiaConfig::local_mock(&server.uri(), "node-token").unwrap();
    CelestiaClient::new(&config).unwrap()
}

fn rpc_result(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": result}))
}

fn rpc_error(code: i64, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "jsonrpc": "2.0",
        "id": 1,
        "error": {"code": code, "message": message}
    }))
}

async fn mount_method(server: &MockServer, rpc_method: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": rpc_method})))
        .respond_with(response)
        .mount(server)
        .await;
}

fn cid() -> ContentId {
    ContentId::new(CID).unwrap()
}

// ── node.Info ────────────────────────────────────────────────────────

#[tokio::test]
async fn node_info_sends_jsonrpc_envelope_with_auth() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer node-token"))
        .and(body_partial_json(json!({
            "jsonrpc": "2.0",
            "method": "node.Info",
            "params": [],
        })))
        .respond_with(rpc_result(json!({"type": 2, "api_version": "v0.12.0"})))
        .expect(1)
        .mount(&server)
        .await;

    let info = test_client(&server).node_info().await.unwrap();
    assert_eq!(info.node_type, 2);
    assert_eq!(info.api_version, "v0.12.0");
}

#[tokio::test]
async fn node_info_surfaces_rpc_error() {
    let server = MockServer::start().await;
    mount_method(&server, "node.Info", rpc_error(-32601, "method not found")).await;

    let err = test_client(&server).node_info().await.unwrap_err();
    match err {
        CelestiaError::Rpc { code, message, .. } => {
            assert_eq!(code, -32601);
            assert_eq!(message, "method not found");
        }
        other => panic!("expected RPC error, got {other:?}"),
    }
}

// ── blob.Submit ──────────────────────────────────────────────────────

#[tokio::test]
async fn submit_sends_base64_blob_and_returns_height() {
    let server = MockServer::start().await;
    mount_method(&server, "state.Balance", rpc_result(json!({"amount": "1000", "denom": "utia"}))).await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "blob.Submit",
            "params": [[{
                "namespace": DEFAULT_NS_HEX,
                "data": CID_BASE64,
                "share_version": 0,
            }], 0.002],
        })))
        .respond_with(rpc_result(json!(12345)))
        .expect(1)
        .mount(&server)
        .await;

    let submission = test_client(&server)
        .submit(&cid(), &Namespace::default())
        .await
        .unwrap();

    assert_eq!(submission.height, 12345);
    assert_eq!(submission.content_id, cid());
    assert_eq!(submission.namespace.as_str(), DEFAULT_NS_HEX);
    assert_eq!(
        submission.explorer_url,
        format!("https://celenium.io/12345/{DEFAULT_NS_HEX}")
    );
}

#[tokio::test]
async fn submit_aborts_on_depleted_balance() {
    let server = MockServer::start().await;
    mount_method(&server, "state.Balance", rpc_result(json!({"amount": "0", "denom": "utia"}))).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({"method": "blob.Submit"})))
        .respond_with(rpc_result(json!(1)))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .submit(&cid(), &Namespace::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CelestiaError::InsufficientBalance(_)));
    assert!(err.is_insufficient_balance());
}

#[tokio::test]
async fn submit_proceeds_when_balance_probe_fails() {
    let server = MockServer::start().await;
    mount_method(&server, "state.Balance", ResponseTemplate::new(500)).await;
    mount_method(&server, "blob.Submit", rpc_result(json!(7))).await;

    let submission = test_client(&server)
        .submit(&cid(), &Namespace::default())
        .await
        .unwrap();
    assert_eq!(submission.height, 7);
}

#[tokio::test]
async fn submit_maps_insufficient_funds_rpc_error() {
    let server = MockServer::start().await;
    mount_method(&server, "state.Balance", rpc_result(json!({"amount": "5", "denom": "utia"}))).await;
    mount_method(
        &server,
        "blob.Submit",
        rpc_error(1, "insufficient fees; got: 1utia required: 2000utia"),
    )
    .await;

    let err = test_client(&server)
        .submit(&cid(), &Namespace::default())
        .await
        .unwrap_err();
    match err {
        CelestiaError::InsufficientBalance(msg) => assert!(msg.contains("insufficient fees")),
        other => panic!("expected insufficient balance, got {other:?}"),
    }
}

#[tokio::test]
async fn submit_uses_custom_namespace() {
    let server = MockServer::start().await;
    let ns = Namespace::unique(Some("alice")).unwrap();
    mount_method(&server, "state.Balance", rpc_result(json!({"amount": "1", "denom": "utia"}))).await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "blob.Submit",
            "params": [[{"namespace": ns.as_str()}]],
        })))
        .respond_with(rpc_result(json!(99)))
        .expect(1)
        .mount(&server)
        .await;

    let submission = test_client(&server).submit(&cid(), &ns).await.unwrap();
    assert_eq!(submission.namespace, ns);
}

// ── blob.GetAll ──────────────────────────────────────────────────────

#[tokio::test]
async fn get_all_decodes_each_blob_leniently() {
    let server = MockServer::start().await;
    let json_hex = format!("0x{}", zkl_core::codec::to_hex(r#"{"cid":"QmX"}"#));

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "method": "blob.GetAll",
            "params": [100, DEFAULT_NS_HEX],
        })))
        .respond_with(rpc_result(json!([
            {"namespace": DEFAULT_NS_HEX, "data": CID_BASE64, "commitment": "c1"},
            {"namespace": DEFAULT_NS_HEX, "data": json_hex},
            {"namespace": DEFAULT_NS_HEX, "data": "not base64!"},
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let set = test_client(&server)
        .get_all(100, &Namespace::default())
        .await
        .unwrap();

    assert_eq!(set.height, 100);
    assert_eq!(set.blobs.len(), 3);

    assert_eq!(set.blobs[0].payload.raw, CID);
    assert_eq!(set.blobs[0].payload.encoding, Some(TextEncoding::Base64));
    assert_eq!(set.blobs[0].commitment.as_deref(), Some("c1"));

    assert_eq!(set.blobs[1].payload.encoding, Some(TextEncoding::Hex));
    assert_eq!(set.blobs[1].payload.parsed, Some(json!({"cid": "QmX"})));

    assert_eq!(set.blobs[2].payload.raw, "not base64!");
    assert_eq!(set.blobs[2].payload.encoding, None);
    assert!(set.blobs[2].payload.parsed.is_none());

    assert!(set.contains(CID));
    assert!(set.contains("QmX"));
}

#[tokio::test]
async fn get_all_empty_result_is_not_found() {
    let server = MockServer::start().await;
    mount_method(&server, "blob.GetAll", rpc_result(json!(null))).await;

    let err = test_client(&server)
        .get_all(5, &Namespace::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CelestiaError::NotFound { height: 5, .. }));
}

#[tokio::test]
async fn get_all_rejects_height_zero_without_calling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(rpc_result(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = test_client(&server)
        .get_all(0, &Namespace::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CelestiaError::InvalidInput(_)));
}

#[tokio::test]
async fn get_all_http_error_keeps_body() {
    let server = MockServer::start().await;
    mount_method(
        &server,
        "blob.GetAll",
        ResponseTemplate::new(401).set_body_string("unauthorized"),
    )
    .await;

    let err = test_client(&server)
        .get_all(1, &Namespace::default())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CelestiaError::ApiError { status: 401, ref body, .. } if body == "unauthorized"
    ));
}

// ── verify_content ───────────────────────────────────────────────────

#[tokio::test]
async fn verify_content_finds_expected_cid() {
    let server = MockServer::start().await;
    mount_method(
        &server,
        "blob.GetAll",
        rpc_result(json!([{"data": CID_BASE64}])),
    )
    .await;

    let verification = test_client(&server)
        .verify_content(42, &cid(), &Namespace::default())
        .await;
    assert!(verification.is_valid);
    assert!(verification.error.is_none());
    assert_eq!(verification.height, 42);
}

#[tokio::test]
async fn verify_content_reports_mismatch() {
    let server = MockServer::start().await;
    mount_method(
        &server,
        "blob.GetAll",
        rpc_result(json!([{"data": CID_BASE64}])),
    )
    .await;

    let other = ContentId::new("QmOther").unwrap();
    let verification = test_client(&server)
        .verify_content(42, &other, &Namespace::default())
        .await;
    assert!(!verification.is_valid);
    assert!(verification.error.unwrap().contains("QmOther"));
}

#[tokio::test]
async fn verify_content_never_fails_on_node_error() {
    let server = MockServer::start().await;
    mount_method(&server, "blob.GetAll", rpc_error(-1, "header not found")).await;

    let verification = test_client(&server)
        .verify_content(42, &cid(), &Namespace::default())
        .await;
    assert!(!verification.is_valid);
    assert!(verification.error.unwrap().contains("header not found"));
}
