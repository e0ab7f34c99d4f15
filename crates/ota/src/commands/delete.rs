//! DELETE command
//!
//! Removes an applet from the SIM by AID.

use bytes::{BufMut, BytesMut};
use otalink_apdu_core::ApduCommand;

use crate::aid::Aid;
use crate::constants::{cla, ins};
use crate::{Error, Result};

/// DELETE command: `80 E4 00 00` with the AID in the data field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteCommand {
    data: Vec<u8>,
}

impl DeleteCommand {
    /// Assemble a DELETE command for an applet AID.
    ///
    /// The data field is `aid_len(1) | aid`; there is no payload.
    pub fn new(aid: &Aid) -> Result<Self> {
        if aid.len() > u8::MAX as usize {
            return Err(Error::DataTooLong(aid.len()));
        }

        let mut data = BytesMut::with_capacity(1 + aid.len());
        data.put_u8(aid.len() as u8);
        data.put_slice(aid.as_bytes());
        Ok(Self {
            data: data.to_vec(),
        })
    }
}

impl ApduCommand for DeleteCommand {
    fn class(&self) -> u8 {
        cla::GP
    }

    fn instruction(&self) -> u8 {
        ins::DELETE
    }

    fn p1(&self) -> u8 {
        0x00
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
