//! OTA SMS-PP envelope framing
//!
//! An outbound operation is wrapped exactly once: a fixed header selected
//! by the operation kind, a one-byte payload length, then the payload.
//! The envelope is serialized immediately and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::ota_header;
use crate::{Error, Result};

/// Operation kind carried by an OTA envelope.
///
/// The set is closed: every kind maps to exactly one header template and
/// call sites match exhaustively, so no fallback branch exists to mis-tag
/// a destructive operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Applet installation
    Install,
    /// Applet deletion
    Delete,
    /// Response reporting
    Response,
}

impl Operation {
    /// The fixed header bytes for this operation kind.
    pub const fn header(self) -> &'static [u8] {
        match self {
            Self::Install => &ota_header::INSTALL,
            Self::Delete => &ota_header::DELETE,
            Self::Response => &ota_header::RESPONSE,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Install => "install",
            Self::Delete => "delete",
            Self::Response => "response",
        })
    }
}

impl FromStr for Operation {
    type Err = Error;

    /// Parse an operation name. An unknown name is an error; there is no
    /// fallback kind.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "install" => Ok(Self::Install),
            "delete" => Ok(Self::Delete),
            "response" => Ok(Self::Response),
            other => Err(Error::UnsupportedOperation(other.to_string())),
        }
    }
}

/// Wrap a payload in the OTA envelope for the given operation.
///
/// Layout: `header(kind) | len(payload) | payload`. The length field is a
/// single byte, so payloads over 255 bytes are rejected; an oversized OTA
/// message is split at the SMS layer, not here.
pub fn wrap(payload: &[u8], operation: Operation) -> Result<Bytes> {
    if payload.len() > u8::MAX as usize {
        return Err(Error::DataTooLong(payload.len()));
    }

    let header = operation.header();
    let mut out = BytesMut::with_capacity(header.len() + 1 + payload.len());
    out.put_slice(header);
    out.put_u8(payload.len() as u8);
    out.put_slice(payload);
    Ok(out.freeze())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_wrap_install() {
        let payload = hex!("80E4000006050102030405");
        let message = wrap(&payload, Operation::Install).unwrap();

        assert_eq!(&message[..11], Operation::Install.header());
        assert_eq!(message[11] as usize, payload.len());
        assert_eq!(&message[12..], payload);
    }

    #[test]
    fn test_headers_differ_by_operation() {
        let install = wrap(b"x", Operation::Install).unwrap();
        let delete = wrap(b"x", Operation::Delete).unwrap();
        let response = wrap(b"x", Operation::Response).unwrap();

        assert_eq!(install[9], 0x01);
        assert_eq!(delete[9], 0x02);
        assert_eq!(response[9], 0x03);
        assert_eq!(&install[..9], &delete[..9]);
    }

    #[test]
    fn test_stripping_header_recovers_payload() {
        let payload = hex!("DEADBEEF");
        let message = wrap(&payload, Operation::Delete).unwrap();
        let stripped = &message[Operation::Delete.header().len() + 1..];
        assert_eq!(stripped, payload);
    }

    #[test]
    fn test_empty_payload() {
        let message = wrap(&[], Operation::Response).unwrap();
        assert_eq!(message.len(), 12);
        assert_eq!(message[11], 0);
    }

    #[test]
    fn test_oversized_payload_rejected() {
        assert!(matches!(
            wrap(&vec![0u8; 256], Operation::Install),
            Err(Error::DataTooLong(256))
        ));
    }

    #[test]
    fn test_operation_name_round_trip() {
        for op in [Operation::Install, Operation::Delete, Operation::Response] {
            assert_eq!(op.to_string().parse::<Operation>().unwrap(), op);
        }
        assert!(matches!(
            "format".parse::<Operation>(),
            Err(Error::UnsupportedOperation(_))
        ));
    }
}
