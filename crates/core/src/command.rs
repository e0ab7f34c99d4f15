//! APDU command definitions and traits
//!
//! This module provides types and traits for working with APDU commands
//! according to ISO/IEC 7816-4.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{Error, Result};

/// Core trait for APDU commands
///
/// Implementors describe the command header and data field; serialization
/// comes from the default [`to_bytes`](Self::to_bytes) method, which
/// refuses to emit a frame whose Lc cannot describe the data field.
pub trait ApduCommand {
    /// Command class (CLA)
    fn class(&self) -> u8;

    /// Instruction code (INS)
    fn instruction(&self) -> u8;

    /// First parameter (P1)
    fn p1(&self) -> u8;

    /// Second parameter (P2)
    fn p2(&self) -> u8;

    /// Command payload data (optional)
    fn data(&self) -> Option<&[u8]>;

    /// Expected response length (optional)
    fn expected_length(&self) -> Option<u8>;

    /// Convert to raw APDU bytes
    fn to_bytes(&self) -> Result<Bytes> {
        if let Some(data) = self.data() {
            if data.len() > u8::MAX as usize {
                return Err(Error::DataTooLong(data.len()));
            }
        }

        let mut buffer = BytesMut::with_capacity(self.command_length());

        // Header: CLA, INS, P1, P2
        buffer.put_u8(self.class());
        buffer.put_u8(self.instruction());
        buffer.put_u8(self.p1());
        buffer.put_u8(self.p2());

        // Add Lc and data if present
        if let Some(data) = self.data() {
            buffer.put_u8(data.len() as u8);
            buffer.put_slice(data);
        }

        // Add Le if present
        if let Some(le) = self.expected_length() {
            buffer.put_u8(le);
        }

        Ok(buffer.freeze())
    }

    /// Calculate length of serialized command
    fn command_length(&self) -> usize {
        // Header (CLA, INS, P1, P2) is always 4 bytes
        let mut length = 4;

        // Add Lc, data length if present
        if let Some(data) = self.data() {
            length += 1 + data.len();
        }

        // Add Le if present
        if self.expected_length().is_some() {
            length += 1;
        }

        length
    }

    /// Convert to a generic [`Command`]
    fn to_command(&self) -> Command {
        Command {
            cla: self.class(),
            ins: self.instruction(),
            p1: self.p1(),
            p2: self.p2(),
            data: self.data().map(Bytes::copy_from_slice),
            le: self.expected_length(),
        }
    }
}

/// Generic APDU command structure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Command class byte
    pub cla: u8,
    /// Instruction byte
    pub ins: u8,
    /// Parameter 1
    pub p1: u8,
    /// Parameter 2
    pub p2: u8,
    /// Command data (optional)
    pub data: Option<Bytes>,
    /// Expected length (optional)
    pub le: Option<u8>,
}

impl Command {
    /// Create a new command with just the header bytes
    pub const fn new(cla: u8, ins: u8, p1: u8, p2: u8) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: None,
            le: None,
        }
    }

    /// Create a new command with data payload
    pub fn new_with_data<T: Into<Bytes>>(cla: u8, ins: u8, p1: u8, p2: u8, data: T) -> Self {
        Self {
            cla,
            ins,
            p1,
            p2,
            data: Some(data.into()),
            le: None,
        }
    }

    /// Set the data field
    pub fn with_data<T: Into<Bytes>>(mut self, data: T) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the expected length field
    pub const fn with_le(mut self, le: u8) -> Self {
        self.le = Some(le);
        self
    }

    /// Parse a command from raw bytes
    ///
    /// The Lc byte must agree with the actual trailing byte count: the
    /// buffer holds either exactly the declared data, or the declared data
    /// followed by a single Le byte.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::InvalidCommandLength(data.len()));
        }

        let mut command = Self::new(data[0], data[1], data[2], data[3]);

        if data.len() > 4 {
            let lc = data[4] as usize;

            if data.len() == 5 {
                // Only Le present, no data
                command.le = Some(data[4]);
            } else if data.len() >= 5 + lc {
                if lc > 0 {
                    command.data = Some(Bytes::copy_from_slice(&data[5..5 + lc]));
                }

                // Check for Le
                if data.len() > 5 + lc {
                    if data.len() == 5 + lc + 1 {
                        command.le = Some(data[5 + lc]);
                    } else {
                        return Err(Error::InvalidCommandLength(data.len()));
                    }
                }
            } else {
                return Err(Error::InvalidCommandLength(data.len()));
            }
        }

        Ok(command)
    }
}

impl ApduCommand for Command {
    fn class(&self) -> u8 {
        self.cla
    }

    fn instruction(&self) -> u8 {
        self.ins
    }

    fn p1(&self) -> u8 {
        self.p1
    }

    fn p2(&self) -> u8 {
        self.p2
    }

    fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    fn expected_length(&self) -> Option<u8> {
        self.le
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_command_serialization() {
        let data = Bytes::from_static(&[0xA0, 0x00, 0x00, 0x01, 0x51, 0x00]);
        let cmd = Command::new_with_data(0x00, 0xA4, 0x04, 0x00, data).with_le(0);
        let bytes = cmd.to_bytes().unwrap();

        assert_eq!(bytes.as_ref(), hex!("00A4040006A00000015100 00"));
    }

    #[test]
    fn test_command_length() {
        let cmd1 = Command::new(0x00, 0xB0, 0x00, 0x00);
        assert_eq!(cmd1.command_length(), 4);

        let cmd2 = Command::new(0x00, 0xB0, 0x00, 0x00).with_le(0xFF);
        assert_eq!(cmd2.command_length(), 5);

        let data = Bytes::from_static(&[0x01, 0x02, 0x03]);
        let cmd3 = Command::new_with_data(0x00, 0xD6, 0x00, 0x00, data.clone());
        assert_eq!(cmd3.command_length(), 8);

        let cmd4 = Command::new_with_data(0x00, 0xD6, 0x00, 0x00, data).with_le(0xFF);
        assert_eq!(cmd4.command_length(), 9);
    }

    #[test]
    fn test_oversized_data_rejected() {
        let cmd = Command::new_with_data(0x80, 0xE6, 0x02, 0x00, vec![0u8; 256]);
        assert_eq!(cmd.to_bytes(), Err(Error::DataTooLong(256)));
    }

    #[test]
    fn test_command_from_bytes() {
        // Simple command with no data or Le
        let cmd = Command::from_bytes(&hex!("00A40400")).unwrap();
        assert_eq!(cmd.cla, 0x00);
        assert_eq!(cmd.ins, 0xA4);
        assert_eq!(cmd.p1, 0x04);
        assert_eq!(cmd.p2, 0x00);
        assert!(cmd.data.is_none());
        assert!(cmd.le.is_none());

        // Command with data but no Le
        let cmd = Command::from_bytes(&hex!("00A4040003010203")).unwrap();
        assert_eq!(cmd.data.as_ref().unwrap().as_ref(), &hex!("010203"));
        assert!(cmd.le.is_none());

        // Command with data and Le
        let cmd = Command::from_bytes(&hex!("00A4040003010203FF")).unwrap();
        assert_eq!(cmd.data.as_ref().unwrap().as_ref(), &hex!("010203"));
        assert_eq!(cmd.le, Some(0xFF));

        // Command with no data but with Le
        let cmd = Command::from_bytes(&hex!("00B00000FF")).unwrap();
        assert!(cmd.data.is_none());
        assert_eq!(cmd.le, Some(0xFF));
    }

    #[test]
    fn test_from_bytes_rejects_inconsistent_lc() {
        // Lc declares 3 bytes but only 2 follow
        assert!(matches!(
            Command::from_bytes(&hex!("00A40400030102")),
            Err(Error::InvalidCommandLength(_))
        ));

        // Two trailing bytes after the declared data cannot be a single Le
        assert!(matches!(
            Command::from_bytes(&hex!("00A4040003010203FFFF")),
            Err(Error::InvalidCommandLength(_))
        ));
    }

    #[test]
    fn test_round_trip() {
        let cmd = Command::new_with_data(0x80, 0xE6, 0x02, 0x00, Bytes::from_static(&[0x01]));
        let parsed = Command::from_bytes(&cmd.to_bytes().unwrap()).unwrap();
        assert_eq!(parsed, cmd);
    }
}
