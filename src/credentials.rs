//! Ambient identity the browser build kept in local storage.
//!
//! The delivery chain only reads these values; issuing and rotating the
//! bearer token is the auth layer's job.

use std::sync::OnceLock;

use uuid::Uuid;

/// Read-only view of the client's ambient credentials.
pub trait CredentialStore: Send + Sync {
    /// Bearer token for the authenticated chat endpoint, if any.
    fn token(&self) -> Option<String>;

    /// Email of the signed-in user, if any.
    fn user_email(&self) -> Option<String>;

    /// Anonymous id, created once on first use and stable afterwards.
    fn guest_id(&self) -> String;
}

/// In-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: Option<String>,
    user_email: Option<String>,
    guest_id: OnceLock<String>,
}

impl MemoryCredentials {
    /// Create an empty (anonymous) store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Attach a signed-in user's email.
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }
}

impl CredentialStore for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }

    fn user_email(&self) -> Option<String> {
        self.user_email.clone()
    }

    fn guest_id(&self) -> String {
        self.guest_id
            .get_or_init(|| Uuid::new_v4().to_string())
            .clone()
    }
}

/// Resolve the `user_id` sent to the backend.
///
/// A signed-in user gets a deterministic id derived from the email
/// (non-alphanumeric characters stripped); everyone else gets the stable
/// guest id.
#[must_use]
pub fn resolve_user_id(store: &dyn CredentialStore) -> String {
    if let Some(email) = store.user_email() {
        let cleaned: String = email.chars().filter(char::is_ascii_alphanumeric).collect();
        return format!("user-{cleaned}");
    }
    format!("guest-{}", store.guest_id())
}
