//! Shared HTTP plumbing for the delivery transports.

use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder};
use serde_json::Value;

use super::{DeliveryRequest, TransportError};
use crate::message::extract_reply;

/// Creates an HTTP client with a bounded per-request timeout.
///
/// The timeout prevents a dead endpoint or relay from hanging the whole
/// chain; the next strategy gets its turn instead.
#[must_use]
pub(crate) fn create_http_client(timeout_secs: u64) -> HttpClient {
    HttpClient::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_else(|_| HttpClient::new())
}

/// Sends the chat payload and extracts the assistant reply text.
///
/// Status handling:
/// - 401 becomes `TransportError::AuthRejected`
/// - any other non-2xx becomes `TransportError::Endpoint`
/// - a 2xx body without a recognizable reply field becomes
///   `TransportError::MalformedReply`
pub(crate) async fn send_chat_request(
    request_builder: RequestBuilder,
    body: &DeliveryRequest,
) -> Result<String, TransportError> {
    let response = request_builder
        .json(body)
        .send()
        .await
        .map_err(|e| TransportError::Network(e.to_string()))?;

    let status = response.status();
    if status.as_u16() == 401 {
        return Err(TransportError::AuthRejected);
    }
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        return Err(TransportError::Endpoint {
            status: status.as_u16(),
            body: clean_error_body(&error_text),
        });
    }

    let payload: Value = response
        .json()
        .await
        .map_err(|e| TransportError::MalformedReply(e.to_string()))?;

    extract_reply(&payload).ok_or_else(|| {
        TransportError::MalformedReply(
            "no `response`, `message` or `content` field in payload".to_string(),
        )
    })
}

/// Relays and reverse proxies often answer with full HTML error pages;
/// keep those out of the logs and truncate anything oversized.
fn clean_error_body(error_text: &str) -> String {
    let trimmed = error_text.trim_start();
    let is_html = trimmed.starts_with("<!DOCTYPE")
        || trimmed.starts_with("<html")
        || trimmed.starts_with("<HTML");

    if is_html {
        return "(server returned HTML error page)".to_string();
    }
    if error_text.len() > 500 {
        let mut end = 500;
        while !error_text.is_char_boundary(end) {
            end -= 1;
        }
        return format!("{}... (truncated)", &error_text[..end]);
    }
    error_text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_error_pages_are_scrubbed() {
        let cleaned = clean_error_body("<!DOCTYPE html><html><body>502</body></html>");
        assert_eq!(cleaned, "(server returned HTML error page)");
        assert_eq!(
            clean_error_body("  <html>bad gateway</html>"),
            "(server returned HTML error page)"
        );
    }

    #[test]
    fn long_bodies_are_truncated() {
        let long = "x".repeat(600);
        let cleaned = clean_error_body(&long);
        assert!(cleaned.ends_with("... (truncated)"));
        assert!(cleaned.len() < long.len());
    }

    #[test]
    fn short_plain_bodies_pass_through() {
        assert_eq!(clean_error_body("not found"), "not found");
    }
}
