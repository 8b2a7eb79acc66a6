//! Local chat sessions and the client facade over the delivery chain.
//!
//! Local sessions live only in the client; their ids carry the `local-`
//! prefix and their history is kept here rather than in the backend
//! datastore.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::config::DeliverySettings;
use crate::credentials::{resolve_user_id, CredentialStore};
use crate::delivery::DeliveryChain;
use crate::message::{ChatMessage, DeliveryResult};

/// Id prefix marking a client-only session.
pub const LOCAL_SESSION_PREFIX: &str = "local-";

/// True when the id names a client-only session.
#[must_use]
pub fn is_local_session(session_id: &str) -> bool {
    session_id.starts_with(LOCAL_SESSION_PREFIX)
}

/// In-memory registry of local sessions and their message history.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: Mutex<HashMap<String, Vec<ChatMessage>>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new local session and return its id.
    pub async fn create(&self) -> String {
        let id = format!("{LOCAL_SESSION_PREFIX}{}", Uuid::new_v4());
        self.sessions.lock().await.insert(id.clone(), Vec::new());
        debug!(session_id = %id, "Created local session");
        id
    }

    /// Append delivered messages to a session's history. Unknown session
    /// ids are registered on first use.
    pub async fn append(&self, session_id: &str, messages: &[ChatMessage]) {
        let mut sessions = self.sessions.lock().await;
        sessions
            .entry(session_id.to_string())
            .or_default()
            .extend_from_slice(messages);
    }

    /// Snapshot of a session's history; empty for unknown sessions.
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions
            .lock()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }
}

/// Chat client tying credentials, local sessions and the fallback chain
/// together. This is the surface the UI layer talks to.
pub struct ChatClient {
    chain: DeliveryChain,
    credentials: Arc<dyn CredentialStore>,
    sessions: SessionRegistry,
}

impl ChatClient {
    /// Build a client with the standard chain from settings. The
    /// authenticated leg is included only when the store holds a token.
    #[must_use]
    pub fn new(settings: &DeliverySettings, credentials: Arc<dyn CredentialStore>) -> Self {
        let chain = DeliveryChain::from_settings(settings, credentials.token().as_deref());
        Self::with_chain(chain, credentials)
    }

    /// Build a client around an explicit chain.
    #[must_use]
    pub fn with_chain(chain: DeliveryChain, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            chain,
            credentials,
            sessions: SessionRegistry::new(),
        }
    }

    /// Start a new local session.
    pub async fn start_local_session(&self) -> String {
        self.sessions.create().await
    }

    /// Deliver a message in the given session. The user id is resolved
    /// from the credential store; local sessions also record the pair in
    /// their history.
    pub async fn send_message(&self, session_id: &str, message: &str) -> DeliveryResult {
        let user_id = resolve_user_id(self.credentials.as_ref());
        let result = self.chain.deliver(session_id, message, &user_id).await;

        if is_local_session(session_id) {
            self.sessions.append(session_id, &result.messages).await;
        }
        result
    }

    /// History of a local session.
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions.history(session_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::message_pair;

    #[test]
    fn local_prefix_is_detected() {
        assert!(is_local_session("local-abc"));
        assert!(!is_local_session("db-session-1"));
    }

    #[tokio::test]
    async fn created_sessions_start_empty_and_accumulate_history() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        assert!(is_local_session(&id));
        assert!(registry.history(&id).await.is_empty());

        registry.append(&id, &message_pair("hi", "hello")).await;
        registry.append(&id, &message_pair("more", "sure")).await;
        assert_eq!(registry.history(&id).await.len(), 4);
    }

    #[tokio::test]
    async fn unknown_sessions_have_empty_history() {
        let registry = SessionRegistry::new();
        assert!(registry.history("local-missing").await.is_empty());
    }
}
