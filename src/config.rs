//! Configuration and settings management
//!
//! Loads delivery settings from environment variables and optional config
//! files, and defines the default endpoint and relay constants.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::transport::RelayStyle;

/// Default backend origin the frontend builds were pinned to.
pub const DEFAULT_BASE_URL: &str = "https://hr-self-service.onrender.com";

/// Default per-request timeout, matching the bounded wait the client
/// applied to the authenticated call.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// A third-party CORS relay the public endpoint can be reached through.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RelayEndpoint {
    /// Relay name used in logs
    pub name: String,
    /// Relay base URL (including any fixed path)
    pub base: String,
    /// How the target URL is passed to the relay
    pub style: RelayStyle,
}

/// Delivery settings loaded from environment variables or built directly.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeliverySettings {
    /// Backend origin, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Authenticated chat route
    #[serde(default = "default_chat_path")]
    pub chat_path: String,

    /// Public (unauthenticated) chat route. `/api/chat-public` is a legacy
    /// alias of the same handler on older backend deployments.
    #[serde(default = "default_public_chat_path")]
    pub public_chat_path: String,

    /// CORS relays tried in order after both direct calls fail
    #[serde(default = "default_relays")]
    pub relays: Vec<RelayEndpoint>,

    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Bearer token seeding the credential store, if already issued
    pub token: Option<String>,

    /// Signed-in user email seeding the credential store
    pub user_email: Option<String>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_chat_path() -> String {
    "/api/chat".to_string()
}

fn default_public_chat_path() -> String {
    "/api/chat/public".to_string()
}

const fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

fn default_relays() -> Vec<RelayEndpoint> {
    vec![
        RelayEndpoint {
            name: "allorigins".to_string(),
            base: "https://api.allorigins.win/raw".to_string(),
            style: RelayStyle::QueryParam,
        },
        RelayEndpoint {
            name: "thingproxy".to_string(),
            base: "https://thingproxy.freeboard.io/fetch/".to_string(),
            style: RelayStyle::PathPrefix,
        },
    ]
}

impl Default for DeliverySettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            chat_path: default_chat_path(),
            public_chat_path: default_public_chat_path(),
            relays: default_relays(),
            http_timeout_secs: default_http_timeout_secs(),
            token: None,
            user_email: None,
        }
    }
}

impl DeliverySettings {
    /// Create new settings by loading from environment and files
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if loading or deserialization fails.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{run_mode}")).required(false))
            // Local overrides, not checked into git
            .add_source(File::with_name("config/local").required(false))
            // Eg. `HR_CHAT__BASE_URL=http://localhost:8000` sets `base_url`
            .add_source(
                Environment::with_prefix("HR_CHAT")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?;

        s.try_deserialize()
    }

    /// Full URL of the authenticated chat endpoint.
    #[must_use]
    pub fn chat_url(&self) -> String {
        join_url(&self.base_url, &self.chat_path)
    }

    /// Full URL of the public chat endpoint.
    #[must_use]
    pub fn public_chat_url(&self) -> String {
        join_url(&self.base_url, &self.public_chat_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_deployed_backend() {
        let settings = DeliverySettings::default();
        assert_eq!(settings.chat_url(), format!("{DEFAULT_BASE_URL}/api/chat"));
        assert_eq!(
            settings.public_chat_url(),
            format!("{DEFAULT_BASE_URL}/api/chat/public")
        );
        assert_eq!(settings.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert!(settings.token.is_none());
    }

    #[test]
    fn default_relay_order_is_allorigins_then_thingproxy() {
        let relays = DeliverySettings::default().relays;
        assert_eq!(relays.len(), 2);
        assert_eq!(relays[0].name, "allorigins");
        assert_eq!(relays[1].name, "thingproxy");
    }

    #[test]
    fn url_join_tolerates_slash_variants() {
        assert_eq!(join_url("http://x/", "/api/chat"), "http://x/api/chat");
        assert_eq!(join_url("http://x", "api/chat"), "http://x/api/chat");
    }
}
