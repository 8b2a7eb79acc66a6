//! The message-delivery fallback chain.
//!
//! Strategies are composed once at construction time and tried in order
//! until one produces a live assistant reply. Nothing escapes the chain
//! as an error: exhaustion degrades into a canned assistant message.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::DeliverySettings;
use crate::message::{DeliveryResult, ErrorKind};
use crate::transport::{DeliveryRequest, DirectTransport, MessageTransport, RelayTransport};

/// Assistant reply returned when every strategy failed. Deterministic;
/// the UI renders it like any other assistant message.
pub const FALLBACK_REPLY: &str = "I apologize, but I cannot process your request at this time \
     due to connectivity issues. Please try again later.";

/// Ordered chain of delivery strategies.
pub struct DeliveryChain {
    transports: Vec<Arc<dyn MessageTransport>>,
}

impl DeliveryChain {
    /// Compose a chain from an explicit transport list (first wins).
    #[must_use]
    pub fn new(transports: Vec<Arc<dyn MessageTransport>>) -> Self {
        Self { transports }
    }

    /// Compose the standard chain: authenticated direct call (only when a
    /// token is available), public direct call, then each configured CORS
    /// relay wrapping the public URL.
    #[must_use]
    pub fn from_settings(settings: &DeliverySettings, token: Option<&str>) -> Self {
        let timeout = settings.http_timeout_secs;
        let mut transports: Vec<Arc<dyn MessageTransport>> = Vec::new();

        if let Some(token) = token {
            transports.push(Arc::new(DirectTransport::authenticated(
                settings.chat_url(),
                token.to_string(),
                timeout,
            )));
        }

        let public_url = settings.public_chat_url();
        transports.push(Arc::new(DirectTransport::public(
            public_url.clone(),
            timeout,
        )));

        for relay in &settings.relays {
            transports.push(Arc::new(RelayTransport::new(
                relay.name.clone(),
                relay.base.clone(),
                public_url.clone(),
                relay.style,
                timeout,
            )));
        }

        Self::new(transports)
    }

    /// Number of strategies in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// True when no strategies are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Deliver a message, trying each strategy in order.
    ///
    /// Never fails from the caller's perspective: the returned result
    /// always carries a user echo and an assistant reply, canned when the
    /// chain is exhausted.
    pub async fn deliver(&self, session_id: &str, message: &str, user_id: &str) -> DeliveryResult {
        let request = DeliveryRequest {
            message: message.to_string(),
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
        };

        for transport in &self.transports {
            debug!(
                strategy = transport.name(),
                session_id, user_id, "Attempting delivery"
            );

            match transport.send(&request).await {
                Ok(reply) => {
                    info!(strategy = transport.name(), session_id, "Delivery succeeded");
                    return DeliveryResult::delivered(message, &reply);
                }
                Err(e) => {
                    // Exhaustive, not fail-fast: every failure advances
                    warn!(
                        strategy = transport.name(),
                        session_id,
                        error_kind = ?e.kind(),
                        error = %e,
                        "Delivery attempt failed, advancing to next strategy"
                    );
                }
            }
        }

        warn!(session_id, "All delivery strategies exhausted, returning canned reply");
        DeliveryResult::degraded(message, FALLBACK_REPLY, ErrorKind::AllStrategiesExhausted)
    }
}
