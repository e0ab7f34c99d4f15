//! Concatenated-SMS fragmentation
//!
//! An OTA message larger than one SMS segment is split into ordered parts,
//! each tagged with a concatenation user-data-header (3GPP TS 23.040,
//! 8-bit reference) so the receiving SIM reassembles by header rather than
//! by arrival order.

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::sms;
use crate::{Error, Result};

/// Information element identifier for 8-bit-reference concatenation.
const CONCAT_8BIT_IEI: u8 = 0x00;

/// One part of a fragmented OTA message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsFragment {
    reference: u8,
    total: u8,
    index: u8,
    data: Bytes,
}

impl SmsFragment {
    /// Reference number shared by all parts of one logical message.
    pub const fn reference(&self) -> u8 {
        self.reference
    }

    /// Total part count.
    pub const fn total(&self) -> u8 {
        self.total
    }

    /// 1-based part index.
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Payload chunk carried by this part.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Serialize as UDH `05 00 03 ref total index` followed by the chunk.
    pub fn to_bytes(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(sms::CONCAT_UDH_LEN + self.data.len());
        out.put_u8(0x05); // UDHL
        out.put_u8(CONCAT_8BIT_IEI);
        out.put_u8(0x03); // IE length
        out.put_u8(self.reference);
        out.put_u8(self.total);
        out.put_u8(self.index);
        out.put_slice(&self.data);
        out.freeze()
    }
}

/// Split a message into parts of at most `max_part_size` payload bytes.
///
/// All parts share `reference`; indices are 1-based and strictly
/// increasing in emission order. This layer never reorders or
/// deduplicates; the UDH lets the receiver restore order itself. An empty
/// message yields a single empty part. Fails when `max_part_size` is zero
/// or the message would need more than 255 parts.
pub fn fragment(message: &[u8], max_part_size: usize, reference: u8) -> Result<Vec<SmsFragment>> {
    if max_part_size == 0 {
        return Err(Error::InvalidPartSize(max_part_size));
    }

    let total = message.len().div_ceil(max_part_size).max(1);
    if total > u8::MAX as usize {
        return Err(Error::DataTooLong(message.len()));
    }

    if message.is_empty() {
        return Ok(vec![SmsFragment {
            reference,
            total: 1,
            index: 1,
            data: Bytes::new(),
        }]);
    }

    Ok(message
        .chunks(max_part_size)
        .enumerate()
        .map(|(i, chunk)| SmsFragment {
            reference,
            total: total as u8,
            index: (i + 1) as u8,
            data: Bytes::copy_from_slice(chunk),
        })
        .collect())
}
