//! Third-party CORS relays that re-issue the public-endpoint call.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Url};
use serde::{Deserialize, Serialize};

use super::http_utils::{create_http_client, send_chat_request};
use super::{DeliveryRequest, MessageTransport, TransportError};

/// How a relay expects the wrapped target URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelayStyle {
    /// Target passed percent-encoded in a `url` query parameter
    /// (AllOrigins style: `.../raw?url=...`)
    QueryParam,
    /// Target appended verbatim to the relay path
    /// (thingproxy style: `.../fetch/https://...`)
    PathPrefix,
}

/// POSTs the chat payload to the public endpoint through a CORS relay.
pub struct RelayTransport {
    name: String,
    http_client: HttpClient,
    relay_base: String,
    target_url: String,
    style: RelayStyle,
}

impl RelayTransport {
    /// Wrap `target_url` through the given relay.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        relay_base: impl Into<String>,
        target_url: impl Into<String>,
        style: RelayStyle,
        timeout_secs: u64,
    ) -> Self {
        Self {
            name: format!("relay-{}", name.into()),
            http_client: create_http_client(timeout_secs),
            relay_base: relay_base.into(),
            target_url: target_url.into(),
            style,
        }
    }

    fn wrapped_url(&self) -> Result<Url, TransportError> {
        match self.style {
            RelayStyle::QueryParam => {
                Url::parse_with_params(&self.relay_base, [("url", self.target_url.as_str())])
            }
            RelayStyle::PathPrefix => {
                Url::parse(&format!("{}{}", self.relay_base, self.target_url))
            }
        }
        .map_err(|e| TransportError::Network(format!("invalid relay url: {e}")))
    }
}

#[async_trait]
impl MessageTransport for RelayTransport {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, request: &DeliveryRequest) -> Result<String, TransportError> {
        let url = self.wrapped_url()?;
        send_chat_request(self.http_client.post(url), request).await
    }
}
