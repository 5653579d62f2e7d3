//! Transport error taxonomy and request construction

use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use serde_json::json;
use tokio_test::{assert_err, assert_ok};

use freight_cli::errors::{ApiError, FreightError};
use freight_cli::http::{Method, RawResponse};

use crate::support::{client, url};

#[tokio::test]
async fn test_json_round_trip() {
    let client = client();
    client.transport().push_json(200, json!({"id": 7}));

    let value = assert_ok!(client.request(Method::Get, "/x", None).await);
    assert_eq!(value, json!({"id": 7}));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Get);
    assert_eq!(requests[0].url, url("/x"));
    assert_eq!(requests[0].body, None);
}

#[tokio::test]
async fn test_non_json_success_is_protocol_error() {
    let client = client();
    client.transport().push(Ok(RawResponse {
        status: 200,
        content_type: Some("text/html".into()),
        body: "<h1>hi</h1>".into(),
    }));

    match client.get("/x").await {
        Err(FreightError::Protocol(err)) => {
            assert_eq!(err, ApiError::new(200, "Invalid content type: text/html"));
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_application_error() {
    let client = client();
    client
        .transport()
        .push_json(400, json!({"error": "bad ref", "error_name": "invalid_ref"}));

    match client.post("/deploys/", json!({"app": "web"})).await {
        Err(FreightError::Api(err)) => {
            assert_eq!(err, ApiError::new(400, "bad ref").with_name("invalid_ref"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_transport_failure_is_distinct() {
    let client = client();
    let err = assert_err!(client.get("/x").await);
    assert!(matches!(err, FreightError::Transport(_)));
    assert!(err.api_error().is_none());
}

#[tokio::test]
async fn test_body_is_forwarded_for_writes() {
    let client = client();
    client.transport().push_json(200, json!({})).push_json(200, json!({}));

    assert_ok!(client.put("/apps/web/", json!({"name": "web"})).await);
    assert_ok!(client.delete("/apps/web/").await);

    let requests = client.transport().requests();
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].body, Some(json!({"name": "web"})));
    assert_eq!(requests[1].method, Method::Delete);
    assert_eq!(requests[1].body, None);
}

#[tokio::test]
async fn test_get_with_body_panics_before_sending() {
    let client = client();
    client.transport().push_json(200, json!({}));

    let result = AssertUnwindSafe(client.request(Method::Get, "/x", Some(json!({"a": 1}))))
        .catch_unwind()
        .await;

    assert!(result.is_err());
    assert_eq!(client.transport().calls(), 0);
}

#[tokio::test]
async fn test_no_retries_on_error() {
    let client = client();
    client
        .transport()
        .push_json(503, json!({"error": "unavailable"}))
        .push_json(200, json!({"id": 1}));

    assert_err!(client.get("/x").await);
    assert_eq!(client.transport().calls(), 1);
}
