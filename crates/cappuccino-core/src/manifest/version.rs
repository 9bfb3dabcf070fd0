//! Version comparison between the engine and a manifest

use semver::Version;

/// Compare the engine version against the version a manifest declares.
/// Returns a warning message if the engine is older than the manifest expects.
pub fn check_compatibility(engine_version: &str, manifest_version: &str) -> Option<String> {
    let engine = parse_version(engine_version)?;
    let manifest = parse_version(manifest_version)?;

    if engine < manifest {
        Some(format!(
            "This manifest was written for engine version {} or newer, you are running {}",
            manifest_version, engine_version
        ))
    } else {
        None
    }
}

/// Parse a version string, tolerating a leading `v` and a missing patch component
fn parse_version(version_str: &str) -> Option<Version> {
    let cleaned = version_str.trim();
    let cleaned = cleaned.strip_prefix('v').unwrap_or(cleaned);

    Version::parse(cleaned)
        .or_else(|_| Version::parse(&format!("{}.0", cleaned)))
        .ok()
}
