//! ReqwestTransport against a local one-shot HTTP stub

use hub_state::client::{ApiRequest, HttpTransport, Method, RawResponse, ReqwestTransport};
use hub_state::error::StateError;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

/// Serve one request with `reply`, returning the request head as received.
fn serve_once(reply: String) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        stream.write_all(reply.as_bytes()).unwrap();
        stream.flush().unwrap();
        String::from_utf8_lossy(&head).into_owned()
    });
    (base, handle)
}

fn send(request: ApiRequest) -> Result<RawResponse, StateError> {
    let transport = ReqwestTransport::new(true).unwrap();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(transport.send(request))
}

#[test]
fn test_get_carries_query_and_authorization() {
    let body = r#"[{"id":"a"}]"#;
    let reply = format!(
        "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        body.len(),
        body
    );
    let (base, handle) = serve_once(reply);

    let response = send(ApiRequest {
        method: Method::Get,
        url: format!("{}/stacks", base),
        query: [("status".to_string(), "incomplete".to_string())].into(),
        authorization: "Bearer abc".to_string(),
    })
    .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.status_line, "200 OK");
    assert_eq!(response.body, body.as_bytes());
    assert!(response
        .headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "application/json"));

    let head = handle.join().unwrap();
    assert!(head.starts_with("GET /stacks?status=incomplete HTTP/1.1"));
    assert!(head.to_lowercase().contains("authorization: bearer abc"));
}

#[test]
fn test_delete_reports_error_status_line() {
    let (base, handle) = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string(),
    );

    let response = send(ApiRequest {
        method: Method::Delete,
        url: format!("{}/stacks/abc", base),
        query: BTreeMap::new(),
        authorization: "Bearer abc".to_string(),
    })
    .unwrap();

    assert_eq!(response.status, 500);
    assert_eq!(response.status_line, "500 Internal Server Error");
    assert!(!response.is_success());
    assert!(handle.join().unwrap().starts_with("DELETE /stacks/abc HTTP/1.1"));
}

#[test]
fn test_refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = send(ApiRequest {
        method: Method::Get,
        url: format!("http://{}/stacks", addr),
        query: BTreeMap::new(),
        authorization: "Bearer abc".to_string(),
    });

    assert!(matches!(result, Err(StateError::Transport(_))));
}
