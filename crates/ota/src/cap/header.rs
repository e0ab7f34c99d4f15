//! Header.cap component parsing

use super::reader::{ComponentReader, Truncated};
use crate::aid::Aid;

/// Magic constant opening a Header component payload.
pub const CAP_MAGIC: u32 = 0xDECAFFED;

/// Fields recovered from a Header.cap component.
///
/// Parsing is lenient: a short buffer yields whatever was recovered before
/// the end, with `truncated` set. The magic is surfaced, not enforced.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderInfo {
    /// Package AID, when the component declares a non-empty one.
    pub package_aid: Option<Aid>,
    /// Package (major, minor) version.
    pub version: Option<(u8, u8)>,
    /// The four magic bytes, big-endian.
    pub magic: Option<u32>,
    /// True when the buffer ended before the layout did.
    pub truncated: bool,
}

impl HeaderInfo {
    /// Whether the component carries the JavaCard CAP magic.
    pub fn has_valid_magic(&self) -> bool {
        self.magic == Some(CAP_MAGIC)
    }
}

/// Parse a raw Header.cap component.
///
/// Layout consumed in order: `tag(1) | size(2) | magic(4) | minor(1) |
/// major(1) | flags(1) | aid_len(1) | aid(aid_len)`. A zero-length AID
/// yields no AID rather than an empty one.
pub fn parse_header(data: &[u8]) -> HeaderInfo {
    let mut info = HeaderInfo::default();
    let mut reader = ComponentReader::new(data);

    let outcome = (|| {
        reader.skip(1)?; // tag
        reader.read_u16()?; // declared size, unchecked
        info.magic = Some(reader.read_u32()?);
        let minor = reader.read_u8()?;
        let major = reader.read_u8()?;
        info.version = Some((major, minor));
        reader.skip(1)?; // flags
        let aid_len = reader.read_u8()? as usize;
        if aid_len > 0 {
            info.package_aid = Some(Aid::from_bytes(reader.read_bytes(aid_len)?));
        }
        Ok::<(), Truncated>(())
    })();

    info.truncated = outcome.is_err();
    info
}
