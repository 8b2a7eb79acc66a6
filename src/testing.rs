//! Testing helpers and mock transports.
//!
//! Convenient constructors for mocked delivery transports, used by unit
//! and integration tests.

use mockall::predicate::always;

use crate::transport::{MockMessageTransport, TransportError};

/// Mock transport that answers every send with the given reply text.
#[must_use]
pub fn mock_transport_reply(name: &'static str, reply: &'static str) -> MockMessageTransport {
    let mut mock = MockMessageTransport::new();
    mock.expect_name().return_const(name.to_string());
    mock.expect_send()
        .with(always())
        .returning(move |_| Ok(reply.to_string()));
    mock
}

/// Mock transport that fails every send with the given HTTP status
/// (401 maps to `AuthRejected`, anything else to `Endpoint`).
#[must_use]
pub fn mock_transport_status(name: &'static str, status: u16) -> MockMessageTransport {
    let mut mock = MockMessageTransport::new();
    mock.expect_name().return_const(name.to_string());
    mock.expect_send().with(always()).returning(move |_| {
        if status == 401 {
            Err(TransportError::AuthRejected)
        } else {
            Err(TransportError::Endpoint {
                status,
                body: "error".to_string(),
            })
        }
    });
    mock
}

/// Mock transport that fails every send at the network level, as if the
/// client were offline.
#[must_use]
pub fn mock_transport_offline(name: &'static str) -> MockMessageTransport {
    let mut mock = MockMessageTransport::new();
    mock.expect_name().return_const(name.to_string());
    mock.expect_send()
        .with(always())
        .returning(|_| Err(TransportError::Network("connection refused".to_string())));
    mock
}
