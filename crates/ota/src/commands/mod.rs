//! Applet-management command builders
//!
//! Remote applet management uses two commands: INSTALL and DELETE. Builders
//! validate every declared length field against the actual byte counts
//! before a frame is assembled, so a mismatch fails loudly instead of
//! producing a malformed APDU.

mod delete;
mod install;

pub use delete::DeleteCommand;
pub use install::InstallCommand;
