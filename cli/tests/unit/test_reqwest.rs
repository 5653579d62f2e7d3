//! Production transport against a local one-shot HTTP server

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use freight_cli::errors::FreightError;
use freight_cli::http::{ApiRequest, Method, ReqwestTransport, Transport};

/// Accept one connection, capture the request and reply with `response`
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if is_complete(&request) {
                break;
            }
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8(request).unwrap()
    });

    (format!("http://{}", addr), handle)
}

fn is_complete(request: &[u8]) -> bool {
    let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = String::from_utf8_lossy(&request[..end]).to_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= end + 4 + length
}

fn http_response(status: &str, content_type: Option<&str>, body: &str) -> String {
    let mut response = format!("HTTP/1.1 {}\r\n", status);
    if let Some(content_type) = content_type {
        response.push_str(&format!("Content-Type: {}\r\n", content_type));
    }
    response.push_str(&format!(
        "Content-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    ));
    response
}

#[tokio::test]
async fn test_get_sends_default_headers() {
    let (base, server) =
        serve_once(http_response("200 OK", Some("application/json"), r#"{"id":7}"#)).await;
    let transport = ReqwestTransport::new("secret").unwrap();

    let response = transport
        .send(ApiRequest {
            method: Method::Get,
            url: format!("{}/api/0/apps/", base),
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type.as_deref(), Some("application/json"));
    assert_eq!(response.body, r#"{"id":7}"#);

    let request = server.await.unwrap();
    let head = request.to_lowercase();
    assert!(request.starts_with("GET /api/0/apps/ HTTP/1.1\r\n"), "{request}");
    assert!(head.contains("authorization: key secret\r\n"), "{request}");
    assert!(head.contains("accept: application/json\r\n"), "{request}");
    assert!(head.contains("user-agent: freight-cli\r\n"), "{request}");
    assert!(!head.contains("content-type:"), "{request}");
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let (base, server) = serve_once(http_response("201 Created", None, "")).await;
    let transport = ReqwestTransport::new("secret").unwrap();

    let response = transport
        .send(ApiRequest {
            method: Method::Post,
            url: format!("{}/deploys/", base),
            body: Some(json!({"app": "web"})),
        })
        .await
        .unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.content_type, None);

    let request = server.await.unwrap();
    assert!(request.starts_with("POST /deploys/ HTTP/1.1\r\n"), "{request}");
    assert!(request.to_lowercase().contains("content-type: application/json\r\n"), "{request}");
    assert!(request.ends_with(r#"{"app":"web"}"#), "{request}");
}

#[tokio::test]
async fn test_content_type_passed_through_verbatim() {
    let (base, server) = serve_once(http_response(
        "502 Bad Gateway",
        Some("text/html; charset=utf-8"),
        "<h1>bad gateway</h1>",
    ))
    .await;
    let transport = ReqwestTransport::new("secret").unwrap();

    let response = transport
        .send(ApiRequest {
            method: Method::Delete,
            url: format!("{}/apps/web/", base),
            body: None,
        })
        .await
        .unwrap();

    assert_eq!(response.status, 502);
    assert_eq!(response.content_type.as_deref(), Some("text/html; charset=utf-8"));
    assert!(server.await.unwrap().starts_with("DELETE /apps/web/ HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = ReqwestTransport::new("secret").unwrap();
    let err = transport
        .send(ApiRequest {
            method: Method::Get,
            url: format!("http://{}/apps/", addr),
            body: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, FreightError::Transport(_)));
    assert!(err.api_error().is_none());
}
