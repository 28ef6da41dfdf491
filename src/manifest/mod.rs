//! Readers that pull the application version out of a build manifest

pub mod gradle;
pub mod maven;

use crate::error::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Version used when the manifest has none
pub const DEFAULT_APP_VERSION: &str = "0.0.1";

static CORE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[Vv]?(\d+\.\d+\.\d+)").expect("core version pattern is valid")
});

/// Read the raw application version from a Maven POM or Gradle build file.
///
/// The reader is picked by extension (`.xml`, `.gradle`, `.properties`); other files are tried as
/// a POM first, then as properties.
///
/// # Returns
/// * `Ok(Some(version))` - raw version string as written in the manifest
/// * `Ok(None)` - file missing or no version declared
/// * `Err` - the file could not be read, or a `.xml` file is not a valid POM
pub fn read_app_version(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        debug!(path = %path.display(), "manifest not found");
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let version = match extension.as_deref() {
        Some("xml") | Some("pom") => maven::app_version(&content)?,
        Some("gradle") | Some("properties") => gradle::app_version(&content),
        _ => match maven::app_version(&content) {
            Ok(Some(version)) => Some(version),
            Ok(None) | Err(_) => gradle::app_version(&content),
        },
    };

    debug!(path = %path.display(), ?version, "read manifest version");
    Ok(version)
}

/// Reduce a raw manifest version to its `major.minor.patch` core.
///
/// A leading `v`/`V` and anything after the core (`-SNAPSHOT`, `-PR123.1`, ...) is dropped; when
/// no core can be found `default_version` is returned.
pub fn normalize_version(raw: Option<&str>, default_version: &str) -> String {
    let result = raw
        .and_then(extract_core)
        .unwrap_or_else(|| default_version.trim().to_string());
    debug!(?raw, default_version, %result, "normalized app version");
    result
}

/// Leading `major.minor.patch` of a raw manifest version, ignoring whitespace and a `v` prefix
pub fn extract_core(raw: &str) -> Option<String> {
    CORE_VERSION
        .captures(raw.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
