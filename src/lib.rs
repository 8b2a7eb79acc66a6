#![deny(missing_docs)]
//! Resilient message delivery for the HR self-service chat backend.
//!
//! The core of this crate is a fallback chain that carries a chat message
//! from the client to the backend chat endpoint despite auth rejections,
//! endpoint outages and CORS-hostile network paths. Every invocation
//! resolves with a renderable two-message result (user echo + assistant
//! reply); when every strategy is exhausted the assistant reply is a
//! canned degraded-connectivity notice.

pub mod config;
pub mod credentials;
pub mod delivery;
pub mod message;
pub mod session;
pub mod transport;

#[cfg(test)]
pub mod testing;
