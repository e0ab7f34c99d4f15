//! CAP (Converted APplet) container parsing
//!
//! A CAP file is a zip archive of named components. This module reads the
//! components relevant to identification (`Header.cap`, `Applet.cap`,
//! `META-INF/MANIFEST.MF`) and recovers package and applet AIDs. A missing
//! entry is a missing-data condition for that slice of the output, never an
//! error, and a failed Header parse does not prevent the Applet parse.

mod applet;
mod header;
mod manifest;
mod reader;

pub use applet::{AppletInfo, parse_applets};
pub use header::{CAP_MAGIC, HeaderInfo, parse_header};
pub use manifest::{ManifestInfo, parse_manifest};

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::{Error, Result};

/// Well-known entry suffixes inside a CAP archive.
const HEADER_ENTRY: &str = "Header.cap";
const APPLET_ENTRY: &str = "Applet.cap";
const MANIFEST_ENTRY: &str = "META-INF/MANIFEST.MF";

/// Raw component data extracted from a CAP archive.
#[derive(Debug, Default)]
pub struct CapFile {
    header: Option<Vec<u8>>,
    applet: Option<Vec<u8>>,
    manifest: Option<String>,
    files: Vec<String>,
}

impl CapFile {
    /// Open a CAP archive and extract the identification components.
    ///
    /// Components may sit under a package directory inside the archive, so
    /// entries are matched by well-known suffix.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let mut zip =
            ZipArchive::new(file).map_err(|_| Error::CapFile("not a valid zip archive"))?;

        let mut cap = Self::default();
        for i in 0..zip.len() {
            if let Ok(entry) = zip.by_index(i) {
                cap.files.push(entry.name().to_string());
            }
        }

        if let Some(name) = cap.find_entry(HEADER_ENTRY) {
            if let Ok(mut entry) = zip.by_name(&name) {
                let mut data = Vec::new();
                entry.read_to_end(&mut data)?;
                cap.header = Some(data);
            }
        }

        if let Some(name) = cap.find_entry(APPLET_ENTRY) {
            if let Ok(mut entry) = zip.by_name(&name) {
                let mut data = Vec::new();
                entry.read_to_end(&mut data)?;
                cap.applet = Some(data);
            }
        }

        if let Some(name) = cap.find_entry(MANIFEST_ENTRY) {
            if let Ok(mut entry) = zip.by_name(&name) {
                let mut text = String::new();
                entry.read_to_string(&mut text)?;
                cap.manifest = Some(text);
            }
        }

        Ok(cap)
    }

    fn find_entry(&self, suffix: &str) -> Option<String> {
        self.files.iter().find(|name| name.ends_with(suffix)).cloned()
    }

    /// Raw bytes of the Header component, when present.
    pub fn header_bytes(&self) -> Option<&[u8]> {
        self.header.as_deref()
    }

    /// Raw bytes of the Applet component, when present.
    pub fn applet_bytes(&self) -> Option<&[u8]> {
        self.applet.as_deref()
    }

    /// Manifest text, when present.
    pub fn manifest_text(&self) -> Option<&str> {
        self.manifest.as_deref()
    }

    /// Entry names found in the archive.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Parse every present component into a [`CapInfo`].
    pub fn info(&self) -> CapInfo {
        CapInfo {
            header: self.header.as_deref().map(parse_header).unwrap_or_default(),
            applets: self.applet.as_deref().map(parse_applets).unwrap_or_default(),
            manifest: self
                .manifest
                .as_deref()
                .map(parse_manifest)
                .unwrap_or_default(),
        }
    }
}

/// Identification data recovered from a CAP archive.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CapInfo {
    /// Header component fields.
    pub header: HeaderInfo,
    /// Applet component fields.
    pub applets: AppletInfo,
    /// Manifest metadata.
    pub manifest: ManifestInfo,
}
