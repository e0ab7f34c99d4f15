//! Hex-string boundary helpers
//!
//! AIDs, APDUs, and OTA payloads cross the external boundary as uppercase
//! hexadecimal with no separators; these two functions are the only
//! crossing points.

use crate::{Error, Result};

/// Decode an even-length hex string into bytes.
///
/// Odd-length or non-hex input is a [`Error::MalformedHex`] failure, fatal
/// to the single operation.
pub fn decode_hex(input: &str) -> Result<Vec<u8>> {
    hex::decode(input.trim()).map_err(|e| match e {
        hex::FromHexError::OddLength => Error::MalformedHex("odd number of hex digits"),
        _ => Error::MalformedHex("invalid hex digit"),
    })
}

/// Canonical external rendering: uppercase hex, no separators.
pub fn encode_hex_upper(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex() {
        assert_eq!(decode_hex("A000000151").unwrap(), vec![0xA0, 0x00, 0x00, 0x01, 0x51]);
        assert_eq!(decode_hex("a0ff").unwrap(), vec![0xA0, 0xFF]);
        assert_eq!(decode_hex("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_decode_hex_rejects_odd_length() {
        assert!(matches!(decode_hex("A00"), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_decode_hex_rejects_non_hex() {
        assert!(matches!(decode_hex("ZZ"), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_encode_round_trip() {
        let bytes = vec![0xDE, 0xCA, 0xFF, 0xED];
        assert_eq!(encode_hex_upper(&bytes), "DECAFFED");
        assert_eq!(decode_hex("DECAFFED").unwrap(), bytes);
    }
}
