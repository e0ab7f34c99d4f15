//! Diagnostics sink for codec-layer warnings
//!
//! Generation and parsing tolerate malformed input; the sink carries
//! those observations without coupling the codec to a global logger.

use std::fmt;

/// Sink for non-fatal diagnostics emitted by codec components.
pub trait Diagnostics: fmt::Debug {
    /// Report a recoverable anomaly.
    fn warn(&self, message: &str);

    /// Report a failure the component still survived.
    fn error(&self, message: &str);
}

/// Default sink forwarding to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!("{message}");
    }
}

#[cfg(test)]
pub(crate) use capture::CaptureDiagnostics;

#[cfg(test)]
mod capture {
    use std::sync::{Arc, Mutex};

    use super::*;

    /// Test sink recording every message; clones share the buffer.
    #[derive(Debug, Default, Clone)]
    pub(crate) struct CaptureDiagnostics {
        messages: Arc<Mutex<Vec<String>>>,
    }

    impl CaptureDiagnostics {
        pub(crate) fn messages(&self) -> Vec<String> {
            self.messages.lock().unwrap().clone()
        }
    }

    impl Diagnostics for CaptureDiagnostics {
        fn warn(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.messages.lock().unwrap().push(message.to_string());
        }
    }
}
