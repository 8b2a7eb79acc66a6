//! Transport strategies the delivery chain is composed from.
//!
//! Each strategy is one way of getting the chat payload to the backend:
//! a direct call (authenticated or public) or a third-party CORS relay
//! re-issuing the public call. The chain owns the ordering; transports
//! only report how they failed.

mod direct;
mod http_utils;
mod relay;

pub use direct::DirectTransport;
pub use relay::{RelayStyle, RelayTransport};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::message::ErrorKind;

/// Payload sent to the chat backend. Identical for every strategy.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryRequest {
    /// Message text typed by the user
    pub message: String,
    /// Chat session id (possibly a client-only `local-` session)
    pub session_id: String,
    /// Resolved user id (`user-...` or `guest-...`)
    pub user_id: String,
}

/// How a single transport attempt failed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint rejected the bearer token
    #[error("authentication rejected (401)")]
    AuthRejected,
    /// The endpoint answered with a non-2xx status
    #[error("endpoint error: {status} - {body}")]
    Endpoint {
        /// HTTP status code
        status: u16,
        /// Response body, truncated and scrubbed of HTML error pages
        body: String,
    },
    /// A 2xx response carried no recognizable reply field
    #[error("malformed reply payload: {0}")]
    MalformedReply(String),
    /// The request never produced an HTTP response
    #[error("network failure: {0}")]
    Network(String),
}

impl TransportError {
    /// Classification used by the chain for logging and the final result.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRejected => ErrorKind::AuthRejected,
            Self::Endpoint { .. } | Self::MalformedReply(_) => ErrorKind::EndpointError,
            Self::Network(_) => ErrorKind::NetworkFailure,
        }
    }
}

/// One way of delivering the chat payload to the backend.
///
/// Implementations make exactly one attempt per call; retrying and
/// advancing to the next strategy is the chain's responsibility.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Strategy name used in logs.
    fn name(&self) -> &str;

    /// Attempt one delivery, returning the assistant reply text.
    async fn send(&self, request: &DeliveryRequest) -> Result<String, TransportError>;
}
