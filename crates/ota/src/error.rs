//! Error type for OTA applet-management operations

use thiserror::Error;

/// Result type for OTA operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for OTA operations
///
/// Truncated CAP components are not represented here: component parsers
/// return partial results with a `truncated` flag so callers choose strict
/// or lenient handling per use case.
#[derive(Debug, Error)]
pub enum Error {
    /// Hex string with odd length or non-hex characters
    #[error("malformed hex input: {0}")]
    MalformedHex(&'static str),

    /// A declared length field cannot describe the actual byte count
    #[error("data too long for its length field: {0} bytes")]
    DataTooLong(usize),

    /// Fragment part size that cannot hold any payload
    #[error("invalid fragment part size: {0}")]
    InvalidPartSize(usize),

    /// Operation name outside the closed install/delete/response set
    #[error("unsupported operation kind: {0:?}")]
    UnsupportedOperation(String),

    /// Destination failed MSISDN validation
    #[error("invalid destination MSISDN: {0:?}")]
    InvalidDestination(String),

    /// Connect, send, or disconnect failure from the message service
    #[error("transport error: {0}")]
    Transport(String),

    /// CAP file error
    #[error("CAP file error: {0}")]
    CapFile(&'static str),

    /// I/O error with CAP file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// APDU construction error
    #[error(transparent)]
    Apdu(#[from] otalink_apdu_core::Error),
}
