//! Error type for APDU command assembly and parsing

/// Result type for APDU operations
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while assembling or parsing an APDU command
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// Buffer does not form a valid command frame
    #[error("invalid command length: {0}")]
    InvalidCommandLength(usize),

    /// Data field cannot be described by a one-byte Lc
    #[error("command data too long for a short APDU: {0} bytes")]
    DataTooLong(usize),

    /// Invalid command data
    #[error("invalid command data: {0}")]
    InvalidCommandData(&'static str),
}
