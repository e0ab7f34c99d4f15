//! SMS transport boundary
//!
//! The SMPP session (connect, bind, submit, unbind) lives behind this
//! trait. The codec layer only needs a way to dispatch opaque payload
//! bytes to a destination inside a scoped connect/disconnect lifecycle;
//! bind credentials, timeouts, and retry policy belong to the
//! implementation.

use std::fmt;

use crate::Result;

/// Message-sending service the OTA layer dispatches through.
///
/// Implementations are used for a bounded sequence of sends between
/// [`connect`](Self::connect) and [`disconnect`](Self::disconnect);
/// failures are reported to the caller, never retried here.
pub trait SmsTransport: fmt::Debug {
    /// Establish the underlying session.
    fn connect(&mut self) -> Result<()>;

    /// Dispatch one payload to `destination`, returning the service's
    /// opaque message identifier.
    fn send(&mut self, destination: &str, payload: &[u8]) -> Result<String>;

    /// Release the underlying session.
    fn disconnect(&mut self) -> Result<()>;

    /// Whether a session is currently established.
    fn is_connected(&self) -> bool;
}

#[cfg(test)]
pub(crate) use mock::MockTransport;
