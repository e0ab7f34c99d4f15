//! INSTALL command
//!
//! Carries an applet AID and its load file data to the SIM's
//! card-management applet.

use bytes::{BufMut, BytesMut};
use otalink_apdu_core::ApduCommand;

use crate::aid::Aid;
use crate::constants::{cla, ins, install_p1};
use crate::{Error, Result};

/// INSTALL command: `80 E6 02 00` with the AID and load file data embedded
/// in the data field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallCommand {
    data: Vec<u8>,
}

impl InstallCommand {
    /// Assemble an INSTALL command for an applet AID and its load file data.
    ///
    /// The data field is `aid_len(1) | aid | load_len(2 BE) | load_data`.
    /// Construction fails when a declared length field cannot represent the
    /// actual byte count: the AID length must fit one byte, the load data
    /// length two bytes, and the whole data field a one-byte Lc.
    pub fn new(aid: &Aid, load_data: &[u8]) -> Result<Self> {
        if aid.len() > u8::MAX as usize {
            return Err(Error::DataTooLong(aid.len()));
        }
        if load_data.len() > u16::MAX as usize {
            return Err(Error::DataTooLong(load_data.len()));
        }

        let mut data = BytesMut::with_capacity(3 + aid.len() + load_data.len());
        data.put_u8(aid.len() as u8);
        data.put_slice(aid.as_bytes());
        data.put_u16(load_data.len() as u16);
        data.put_slice(load_data);

        if data.len() > u8::MAX as usize {
            return Err(Error::DataTooLong(data.len()));
        }
        Ok(Self {
            data: data.to_vec(),
        })
    }
}

impl ApduCommand for InstallCommand {
    fn class(&self) -> u8 {
        cla::GP
    }

    fn instruction(&self) -> u8 {
        ins::INSTALL
    }

    fn p1(&self) -> u8 {
        install_p1::FOR_INSTALL
    }

    fn p2(&self) -> u8 {
        0x00
    }

    fn data(&self) -> Option<&[u8]> {
        Some(&self.data)
    }

    fn expected_length(&self) -> Option<u8> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn test_install_serialization() {
        let aid = Aid::from_bytes(hex!("A000000151000000").to_vec());
        let cmd = InstallCommand::new(&aid, &hex!("AABBCC")).unwrap();

        assert_eq!(cmd.class(), cla::GP);
        assert_eq!(cmd.instruction(), ins::INSTALL);
        assert_eq!(cmd.p1(), install_p1::FOR_INSTALL);
        assert_eq!(cmd.p2(), 0x00);

        // aid_len + aid + load_len(2 BE) + load_data
        let expected_data = hex!("08A0000001510000000003AABBCC");
        assert_eq!(cmd.data(), Some(expected_data.as_ref()));

        let raw = cmd.to_bytes().unwrap();
        assert_eq!(raw.as_ref(), hex!("80E602000E08A0000001510000000003AABBCC"));
    }

    #[test]
    fn test_install_with_empty_load_data() {
        let aid = Aid::from_bytes(hex!("A000000151").to_vec());
        let cmd = InstallCommand::new(&aid, &[]).unwrap();
        assert_eq!(cmd.data(), Some(hex!("05A0000001510000").as_ref()));
    }

    #[test]
    fn test_install_rejects_oversized_load_data() {
        let aid = Aid::from_bytes(hex!("A000000151").to_vec());
        assert!(matches!(
            InstallCommand::new(&aid, &vec![0u8; 0x1_0000]),
            Err(Error::DataTooLong(_))
        ));
    }

    #[test]
    fn test_install_rejects_data_overflowing_lc() {
        // 5 + 3 bytes of framing leaves room for 247 load bytes at most
        let aid = Aid::from_bytes(hex!("A000000151").to_vec());
        assert!(InstallCommand::new(&aid, &vec![0u8; 247]).is_ok());
        assert!(matches!(
            InstallCommand::new(&aid, &vec![0u8; 248]),
            Err(Error::DataTooLong(_))
        ));
    }
}
