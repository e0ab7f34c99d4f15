//! AID (Application Identifier) model and deterministic generation
//!
//! An AID is a 5-16 byte value naming a smart-card package or applet:
//! a fixed 5-byte Registered Identifier (RID) followed by a proprietary
//! extension (PIX). The generator derives conformant AIDs from human
//! names so that a generation step and a later install/delete step run in
//! different processes agree on the same identifiers.

use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::{Error, Result, util};

/// Shortest AID permitted by ISO 7816-5.
pub const MIN_AID_LEN: usize = 5;
/// Longest AID permitted by ISO 7816-5.
pub const MAX_AID_LEN: usize = 16;

/// Digest bytes contributing to a package PIX.
const PACKAGE_FINGERPRINT_LEN: usize = 5;
/// Digest bytes distinguishing an applet within its package.
const APPLET_FINGERPRINT_LEN: usize = 2;

/// Application Identifier.
///
/// Out-of-range lengths are tolerated (warned about at generation time) to
/// stay usable against CAP files found in the wild.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Aid(Vec<u8>);

impl Aid {
    /// Wrap raw AID bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse an AID from its canonical hex rendering.
    pub fn from_hex(s: &str) -> Result<Self> {
        Ok(Self(util::decode_hex(s)?))
    }

    /// Raw AID bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Byte length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a zero-byte AID (never well-formed, but representable).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the length falls in the standard 5-16 byte range.
    pub fn has_standard_length(&self) -> bool {
        (MIN_AID_LEN..=MAX_AID_LEN).contains(&self.0.len())
    }

    /// Registered Identifier prefix: the first five bytes, when present.
    pub fn rid(&self) -> Option<&[u8]> {
        self.0.get(..MIN_AID_LEN)
    }

    /// Proprietary Identifier eXtension: everything after the RID.
    pub fn pix(&self) -> &[u8] {
        self.0.get(MIN_AID_LEN..).unwrap_or(&[])
    }
}

impl fmt::Display for Aid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&util::encode_hex_upper(&self.0))
    }
}

impl FromStr for Aid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl AsRef<[u8]> for Aid {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Registered Identifier prefixes available to the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rid {
    /// Test RID
    Test,
    /// Custom development RID
    #[default]
    Custom,
    /// Demo applications RID
    Demo,
    /// Research RID
    Research,
}

impl Rid {
    /// The fixed five-byte prefix for this RID.
    pub const fn bytes(self) -> [u8; 5] {
        match self {
            Self::Test => [0xA0, 0x00, 0x00, 0x00, 0x01],
            Self::Custom => [0xA0, 0x00, 0x00, 0x01, 0x51],
            Self::Demo => [0xA0, 0x00, 0x00, 0x00, 0x62],
            Self::Research => [0xA0, 0x00, 0x00, 0x00, 0x87],
        }
    }

    /// Resolve a RID from its configuration name.
    ///
    /// Unrecognized names fall back to [`Rid::Custom`] with a warning
    /// rather than failing.
    pub fn from_name(name: &str, diagnostics: &dyn Diagnostics) -> Self {
        match name {
            "test" => Self::Test,
            "custom" => Self::Custom,
            "demo" => Self::Demo,
            "research" => Self::Research,
            other => {
                diagnostics.warn(&format!("unknown RID type {other:?}, using custom"));
                Self::Custom
            }
        }
    }
}

/// Deterministic AID generator.
///
/// The same (name, version) input always produces the same AID across
/// process runs: derivation uses only the MD5 digest of the name, no
/// randomness and no time-based salt.
#[derive(Debug)]
pub struct AidGenerator {
    rid: Rid,
    diagnostics: Box<dyn Diagnostics>,
}

impl AidGenerator {
    /// Create a generator for the given RID prefix.
    pub fn new(rid: Rid) -> Self {
        Self {
            rid,
            diagnostics: Box::new(TracingDiagnostics),
        }
    }

    /// Route warnings to an explicit sink instead of the tracing subscriber.
    pub fn with_diagnostics(mut self, sink: impl Diagnostics + 'static) -> Self {
        self.diagnostics = Box::new(sink);
        self
    }

    /// The RID this generator derives under.
    pub const fn rid(&self) -> Rid {
        self.rid
    }

    /// Derive a package AID from a package name and decimal version string.
    ///
    /// The PIX is the first five bytes of MD5(name) followed by the version
    /// byte. A version outside 0-255 (or non-numeric) falls back to 0x01.
    pub fn package_aid(&self, package_name: &str, version: &str) -> Aid {
        let mut bytes = self.rid.bytes().to_vec();
        bytes.extend_from_slice(&fingerprint(package_name, PACKAGE_FINGERPRINT_LEN));
        bytes.push(self.version_byte(version));
        self.checked(Aid(bytes), "package")
    }

    /// Derive an applet AID by extending a package AID with a two-byte
    /// fingerprint of the applet name.
    pub fn applet_aid(&self, package_aid: &Aid, applet_name: &str) -> Aid {
        let mut bytes = package_aid.as_bytes().to_vec();
        bytes.extend_from_slice(&fingerprint(applet_name, APPLET_FINGERPRINT_LEN));
        self.checked(Aid(bytes), "applet")
    }

    /// Generate the full AID set for a project: one package AID plus one
    /// applet AID per name, in input order.
    ///
    /// Duplicate applet names yield duplicate (equal) AIDs; nothing is
    /// deduplicated.
    pub fn project_aids(
        &self,
        package_name: &str,
        applet_names: &[impl AsRef<str>],
        version: &str,
    ) -> ProjectAids {
        let package_aid = self.package_aid(package_name, version);
        let applets = applet_names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                NamedAid {
                    name: name.to_string(),
                    aid: self.applet_aid(&package_aid, name),
                }
            })
            .collect();

        ProjectAids {
            package_name: package_name.to_string(),
            package_aid,
            applets,
            version: self.version_byte(version),
        }
    }

    fn version_byte(&self, version: &str) -> u8 {
        version.parse::<u8>().unwrap_or_else(|_| {
            self.diagnostics
                .warn(&format!("version {version:?} is not a decimal 0-255, using 01"));
            0x01
        })
    }

    fn checked(&self, aid: Aid, kind: &str) -> Aid {
        if !aid.has_standard_length() {
            self.diagnostics.warn(&format!(
                "generated {kind} AID is {} bytes, outside the standard 5-16 byte range",
                aid.len()
            ));
        }
        aid
    }
}

/// First `len` bytes of the MD5 digest of `name`.
fn fingerprint(name: &str, len: usize) -> Vec<u8> {
    Md5::digest(name.as_bytes())[..len].to_vec()
}

/// An applet name paired with its derived AID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAid {
    /// Applet name the AID was derived from.
    pub name: String,
    /// Derived applet AID.
    pub aid: Aid,
}

/// Complete AID set for a Java Card project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAids {
    /// Dotted package name.
    pub package_name: String,
    /// Derived package AID.
    pub package_aid: Aid,
    /// One entry per requested applet, in input order.
    pub applets: Vec<NamedAid>,
    /// Resolved package version byte.
    pub version: u8,
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::diagnostics::CaptureDiagnostics;

    // MD5("abc") = 900150983cd24fb0d6963f7d28e17f72
    // MD5("a")   = 0cc175b9c0f1b6a831c399e269772661
    // MD5("b")   = 92eb5ffee6ae2fec3ad71c777531578f

    #[test]
    fn test_package_aid_layout() {
        let generator = AidGenerator::new(Rid::Custom);
        let aid = generator.package_aid("abc", "01");
        assert_eq!(aid.to_string(), "A000000151900150983C01");
        assert_eq!(aid.len(), 11);
        assert_eq!(aid.rid(), Some(&Rid::Custom.bytes()[..]));
    }

    #[test]
    fn test_applet_aid_extends_package_aid() {
        let generator = AidGenerator::new(Rid::Custom);
        let package = generator.package_aid("abc", "01");
        let applet = generator.applet_aid(&package, "a");
        assert_eq!(applet.to_string(), format!("{package}0CC1"));
        assert_eq!(applet.len(), package.len() + 2);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let generator = AidGenerator::new(Rid::Demo);
        let first = generator.package_aid("com.example.wallet", "3");
        let second = generator.package_aid("com.example.wallet", "3");
        assert_eq!(first, second);
    }

    #[test]
    fn test_distinct_names_do_not_collide() {
        let generator = AidGenerator::new(Rid::Custom);
        let aids: HashSet<String> = (0..512)
            .map(|i| generator.package_aid(&format!("com.example.app{i}"), "01").to_string())
            .collect();
        assert_eq!(aids.len(), 512);
    }

    #[test]
    fn test_version_parsing() {
        let generator = AidGenerator::new(Rid::Custom);

        // Decimal version lands as the final AID byte
        let aid = generator.package_aid("abc", "16");
        assert_eq!(aid.as_bytes()[10], 0x10);

        // Out-of-range version falls back to 0x01 rather than failing
        let sink = CaptureDiagnostics::default();
        let generator = AidGenerator::new(Rid::Custom).with_diagnostics(sink.clone());
        let aid = generator.package_aid("abc", "256");
        assert_eq!(aid.as_bytes()[10], 0x01);
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_project_aids() {
        let generator = AidGenerator::new(Rid::Custom);
        let project = generator.project_aids("com.example.app", &["A", "B"], "01");

        assert_eq!(project.package_name, "com.example.app");
        assert_eq!(project.version, 0x01);
        assert_eq!(project.applets.len(), 2);
        assert_eq!(project.applets[0].name, "A");
        assert_eq!(project.applets[1].name, "B");

        // Every applet AID extends the package AID by exactly two bytes
        let package_hex = project.package_aid.to_string();
        for applet in &project.applets {
            let hex = applet.aid.to_string();
            assert!(hex.starts_with(&package_hex));
            assert_eq!(hex.len(), package_hex.len() + 4);
        }

        // Sibling applets differ only in those trailing four hex chars
        assert_ne!(
            project.applets[0].aid.to_string(),
            project.applets[1].aid.to_string()
        );
    }

    #[test]
    fn test_duplicate_applet_names_yield_equal_aids() {
        let generator = AidGenerator::new(Rid::Custom);
        let project = generator.project_aids("com.example.app", &["A", "A"], "01");
        assert_eq!(project.applets[0].aid, project.applets[1].aid);
    }

    #[test]
    fn test_rid_from_name_falls_back_to_custom() {
        let sink = CaptureDiagnostics::default();
        assert_eq!(Rid::from_name("research", &sink), Rid::Research);
        assert!(sink.messages().is_empty());

        assert_eq!(Rid::from_name("bogus", &sink), Rid::Custom);
        assert_eq!(sink.messages().len(), 1);
    }

    #[test]
    fn test_aid_from_hex_rejects_malformed_input() {
        assert!(Aid::from_hex("A0000001").is_ok());
        assert!(matches!(Aid::from_hex("A0X"), Err(Error::MalformedHex(_))));
        assert!(matches!(Aid::from_hex("A00"), Err(Error::MalformedHex(_))));
    }

    #[test]
    fn test_standard_length_check() {
        assert!(Aid::from_bytes(vec![0u8; 5]).has_standard_length());
        assert!(Aid::from_bytes(vec![0u8; 16]).has_standard_length());
        assert!(!Aid::from_bytes(vec![0u8; 4]).has_standard_length());
        assert!(!Aid::from_bytes(vec![0u8; 17]).has_standard_length());
    }
}
