use std::fmt;

/// Non-fatal conditions met while deriving a tag.
/// These are reported to the user but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// No manifest path configured, or the file does not exist
    ManifestMissing { path: Option<String> },
    /// The manifest exists but declares no usable `major.minor.patch` version
    ManifestWithoutVersion { path: String, default_version: String },
    /// No published tag matched the search prefix; the prefix itself is the starting point
    NoMatchingTags { search_prefix: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::ManifestMissing { path: Some(path) } => {
                write!(f, "Manifest '{}' not found, using the default version", path)
            }
            BoundaryWarning::ManifestMissing { path: None } => {
                write!(f, "No manifest configured, using the default version")
            }
            BoundaryWarning::ManifestWithoutVersion {
                path,
                default_version,
            } => {
                write!(
                    f,
                    "Manifest '{}' has no usable version, using '{}'",
                    path, default_version
                )
            }
            BoundaryWarning::NoMatchingTags { search_prefix } => {
                if search_prefix.is_empty() {
                    write!(f, "No existing tags found")
                } else {
                    write!(
                        f,
                        "No existing tags start with '{}', starting from it",
                        search_prefix
                    )
                }
            }
        }
    }
}
