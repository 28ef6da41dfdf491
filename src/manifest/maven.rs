//! Maven POM reader

use crate::error::{NextTagError, Result};
use serde::Deserialize;

/// The only part of a POM we care about; everything else is ignored.
#[derive(Debug, Deserialize)]
struct Project {
    #[serde(default)]
    version: Option<String>,
}

/// Extract `project/version` from POM content.
///
/// A `<version>` nested in `<parent>` or a dependency is not the project version.
pub fn app_version(content: &str) -> Result<Option<String>> {
    let project: Project = quick_xml::de::from_str(content)
        .map_err(|e| NextTagError::manifest(format!("Failed to parse POM: {}", e)))?;

    Ok(project
        .version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}
