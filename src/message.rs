//! Chat message shapes shared between the delivery chain and its callers.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Sender of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the user
    User,
    /// Reply produced by the backend (or the canned fallback)
    Assistant,
}

/// A single chat message. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent the message
    pub role: Role,
    /// Text content
    pub content: String,
    /// Creation timestamp (ISO-8601 when serialized)
    pub created_at: DateTime<Utc>,
}

/// Why a delivery ended up degraded or why an individual strategy failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The authenticated endpoint rejected the bearer token (401)
    AuthRejected,
    /// An endpoint answered with a non-recoverable HTTP status
    EndpointError,
    /// The request never produced an HTTP response (offline, timeout)
    NetworkFailure,
    /// Every strategy in the chain failed
    AllStrategiesExhausted,
}

/// Outcome of one delivery. Always carries exactly two messages, so the
/// caller can render it without inspecting `success`.
#[derive(Debug, Clone)]
pub struct DeliveryResult {
    /// True when a live backend reply was obtained
    pub success: bool,
    /// User echo followed by the assistant reply
    pub messages: [ChatMessage; 2],
    /// Set only when the reply is the canned fallback
    pub error_kind: Option<ErrorKind>,
}

impl DeliveryResult {
    /// Build a successful result from a live assistant reply.
    #[must_use]
    pub fn delivered(user_content: &str, assistant_content: &str) -> Self {
        Self {
            success: true,
            messages: message_pair(user_content, assistant_content),
            error_kind: None,
        }
    }

    /// Build a degraded result carrying the canned assistant reply.
    #[must_use]
    pub fn degraded(user_content: &str, assistant_content: &str, kind: ErrorKind) -> Self {
        Self {
            success: false,
            messages: message_pair(user_content, assistant_content),
            error_kind: Some(kind),
        }
    }

    /// The assistant half of the pair.
    #[must_use]
    pub fn assistant(&self) -> &ChatMessage {
        &self.messages[1]
    }
}

/// Build the user-echo/assistant pair. The assistant timestamp is pinned
/// one second after the user's so the pair keeps its visual order even
/// when rendered by timestamp.
#[must_use]
pub fn message_pair(user_content: &str, assistant_content: &str) -> [ChatMessage; 2] {
    let now = Utc::now();
    [
        ChatMessage {
            role: Role::User,
            content: user_content.to_string(),
            created_at: now,
        },
        ChatMessage {
            role: Role::Assistant,
            content: assistant_content.to_string(),
            created_at: now + Duration::seconds(1),
        },
    ]
}

/// Extract the assistant reply text from a backend payload.
///
/// Deployed backend revisions disagree on the field name, so the first
/// string found under `response`, `message`, `content` (in that order)
/// wins. Returns `None` when no candidate field holds a string.
#[must_use]
pub fn extract_reply(payload: &serde_json::Value) -> Option<String> {
    ["response", "message", "content"]
        .iter()
        .find_map(|key| payload.get(key).and_then(|v| v.as_str()))
        .map(ToString::to_string)
}
