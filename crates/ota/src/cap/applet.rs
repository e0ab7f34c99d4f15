//! Applet.cap component parsing

use super::reader::{ComponentReader, Truncated};
use crate::aid::Aid;

/// Applet AIDs recovered from an Applet.cap component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppletInfo {
    /// AIDs in file order, one per fully parsed record.
    pub aids: Vec<Aid>,
    /// Record count declared by the component.
    pub declared_count: usize,
    /// True when the buffer ended mid-record.
    pub truncated: bool,
}

/// Parse a raw Applet.cap component.
///
/// Layout: `tag(1) | size(2) | count(1)` followed by `count` records of
/// `aid_len(1) | aid(aid_len) | install_method_offset(2)`. Truncation
/// mid-record stops the loop and keeps every AID parsed so far. A record
/// with `aid_len == 0` contributes no AID, but its offset field is still
/// consumed to keep the cursor aligned.
pub fn parse_applets(data: &[u8]) -> AppletInfo {
    let mut info = AppletInfo::default();
    let mut reader = ComponentReader::new(data);

    let outcome = (|| {
        reader.skip(1)?; // tag
        reader.read_u16()?; // declared size, unchecked
        info.declared_count = reader.read_u8()? as usize;
        for _ in 0..info.declared_count {
            let aid_len = reader.read_u8()? as usize;
            if aid_len > 0 {
                info.aids.push(Aid::from_bytes(reader.read_bytes(aid_len)?));
            }
            reader.skip(2)?; // install_method_offset
        }
        Ok::<(), Truncated>(())
    })();

    info.truncated = outcome.is_err();
    info
}
