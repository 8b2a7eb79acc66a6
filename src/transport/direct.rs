//! Direct calls against the chat backend.

use async_trait::async_trait;
use reqwest::Client as HttpClient;

use super::http_utils::{create_http_client, send_chat_request};
use super::{DeliveryRequest, MessageTransport, TransportError};

/// POSTs the chat payload straight to a backend route, optionally with a
/// bearer token attached.
pub struct DirectTransport {
    name: &'static str,
    http_client: HttpClient,
    url: String,
    bearer_token: Option<String>,
}

impl DirectTransport {
    /// Transport for the authenticated chat endpoint.
    #[must_use]
    pub fn authenticated(url: String, token: String, timeout_secs: u64) -> Self {
        Self {
            name: "direct-authenticated",
            http_client: create_http_client(timeout_secs),
            url,
            bearer_token: Some(token),
        }
    }

    /// Transport for the public chat endpoint.
    #[must_use]
    pub fn public(url: String, timeout_secs: u64) -> Self {
        Self {
            name: "direct-public",
            http_client: create_http_client(timeout_secs),
            url,
            bearer_token: None,
        }
    }
}

#[async_trait]
impl MessageTransport for DirectTransport {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, request: &DeliveryRequest) -> Result<String, TransportError> {
        let mut builder = self.http_client.post(&self.url);
        if let Some(token) = &self.bearer_token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        send_chat_request(builder, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_pick_distinct_log_names() {
        let auth =
            DirectTransport::authenticated("http://x/api/chat".to_string(), "t".to_string(), 10);
        let public = DirectTransport::public("http://x/api/chat/public".to_string(), 10);
        assert_eq!(auth.name(), "direct-authenticated");
        assert_eq!(public.name(), "direct-public");
    }
}
