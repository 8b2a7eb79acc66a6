//! Classification of real HTTP responses into transport errors, exercised
//! against a one-shot local listener rather than injected error values.

use hr_chat_relay::transport::{DeliveryRequest, DirectTransport, MessageTransport, TransportError};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn request() -> DeliveryRequest {
    DeliveryRequest {
        message: "hello".to_string(),
        session_id: "local-1".to_string(),
        user_id: "guest-1".to_string(),
    }
}

/// Serve exactly one canned HTTP response and return the endpoint URL.
async fn serve_one(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        let Ok((mut stream, _)) = listener.accept().await else {
            return;
        };

        // Drain the full request before answering so the client is never
        // cut off mid-write
        let mut seen = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    seen.extend_from_slice(&buf[..n]);
                    if request_complete(&seen) {
                        break;
                    }
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(response.as_bytes()).await;
        let _ = stream.shutdown().await;
    });

    format!("http://{addr}/api/chat")
}

fn request_complete(seen: &[u8]) -> bool {
    let Some(header_end) = seen.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let headers = String::from_utf8_lossy(&seen[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    seen.len() >= header_end + 4 + content_length
}

#[tokio::test]
async fn a_401_response_maps_to_auth_rejected() {
    let url = serve_one("401 Unauthorized", r#"{"detail":"invalid token"}"#).await;
    let transport = DirectTransport::authenticated(url, "stale-token".to_string(), 5);

    let err = transport.send(&request()).await.expect_err("401 must fail");
    assert!(matches!(err, TransportError::AuthRejected));
}

#[tokio::test]
async fn a_server_error_maps_to_endpoint_error_with_its_status() {
    let url = serve_one("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
    let transport = DirectTransport::public(url, 5);

    let err = transport.send(&request()).await.expect_err("500 must fail");
    match err {
        TransportError::Endpoint { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("boom"));
        }
        other => panic!("expected endpoint error, got {other:?}"),
    }
}

#[tokio::test]
async fn a_success_without_a_reply_field_is_a_malformed_reply() {
    let url = serve_one("200 OK", r#"{"detail":"processed"}"#).await;
    let transport = DirectTransport::public(url, 5);

    let err = transport
        .send(&request())
        .await
        .expect_err("payload without a reply field must fail");
    assert!(matches!(err, TransportError::MalformedReply(_)));
}

#[tokio::test]
async fn a_success_with_a_reply_field_returns_the_text() {
    let url = serve_one("200 OK", r#"{"response":"X"}"#).await;
    let transport = DirectTransport::public(url, 5);

    let reply = transport.send(&request()).await.expect("live reply");
    assert_eq!(reply, "X");
}
