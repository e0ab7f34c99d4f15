//! META-INF/MANIFEST.MF metadata extraction

/// Descriptive fields recognized in a CAP manifest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestInfo {
    /// `Package-AID` value.
    pub package_aid: Option<String>,
    /// `Applet-AID` value.
    pub applet_aid: Option<String>,
    /// `Package-Name` value.
    pub package_name: Option<String>,
    /// `Package-Version` value.
    pub package_version: Option<String>,
}

/// Extract the recognized keys from manifest text.
///
/// Lines are `Key: Value` pairs split at the first colon, so values may
/// themselves contain colons; both sides are trimmed. Unknown keys are
/// ignored and the last occurrence of a repeated key wins.
pub fn parse_manifest(text: &str) -> ManifestInfo {
    let mut info = ManifestInfo::default();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim() {
            "Package-AID" => info.package_aid = Some(value.to_string()),
            "Applet-AID" => info.applet_aid = Some(value.to_string()),
            "Package-Name" => info.package_name = Some(value.to_string()),
            "Package-Version" => info.package_version = Some(value.to_string()),
            _ => {}
        }
    }
    info
}
