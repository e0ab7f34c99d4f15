//! Over-the-air SIM applet management
//!
//! This crate assembles and parses the binary formats used to manage
//! Java Card applets on a SIM over the SMS control channel:
//!
//! - CAP file components (`Header.cap`, `Applet.cap`, the manifest) to
//!   recover package and applet AIDs
//! - deterministic AID derivation from human-readable names
//! - INSTALL / DELETE command APDUs
//! - the OTA SMS-PP envelope and concatenated-SMS fragmentation
//!
//! The SMPP session that carries the resulting parts lives behind the
//! [`SmsTransport`] trait; see [`operations`] for scoped session helpers
//! that release the transport on every exit path.

pub mod aid;
pub mod cap;
pub mod commands;
pub mod constants;
pub mod diagnostics;
pub mod envelope;
pub mod error;
pub mod fragment;
pub mod session;
pub mod transport;
pub mod util;

// Re-exports
pub use aid::{Aid, AidGenerator, NamedAid, ProjectAids, Rid};
pub use cap::{CapFile, CapInfo};
pub use commands::{DeleteCommand, InstallCommand};
pub use diagnostics::{Diagnostics, TracingDiagnostics};
pub use envelope::Operation;
pub use error::{Error, Result};
pub use fragment::SmsFragment;
pub use session::OtaSession;
pub use transport::SmsTransport;

/// Convenience functions for common operations
pub mod operations {
    use crate::aid::Aid;
    use crate::session::OtaSession;
    use crate::transport::SmsTransport;
    use crate::Result;

    /// Run `f` against a connected session, releasing the transport on
    /// every exit path.
    ///
    /// The disconnect runs whether `f` succeeds or fails; when both fail,
    /// the failure from `f` wins.
    pub fn with_session<T, R>(
        transport: T,
        f: impl FnOnce(&mut OtaSession<T>) -> Result<R>,
    ) -> Result<R>
    where
        T: SmsTransport,
    {
        let mut session = OtaSession::new(transport);
        session.connect()?;
        let result = f(&mut session);
        let released = session.disconnect();
        match (result, released) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), _) => Err(e),
        }
    }

    /// Install an applet over a fresh transport session.
    pub fn install_applet<T: SmsTransport>(
        transport: T,
        destination: &str,
        aid: &Aid,
        load_data: &[u8],
    ) -> Result<Vec<String>> {
        with_session(transport, |session| {
            session.install_applet(destination, aid, load_data)
        })
    }

    /// Delete an applet over a fresh transport session.
    pub fn delete_applet<T: SmsTransport>(
        transport: T,
        destination: &str,
        aid: &Aid,
    ) -> Result<Vec<String>> {
        with_session(transport, |session| session.delete_applet(destination, aid))
    }
}
