//! Main workflow orchestration logic
//!
//! Turns a fully layered [`Config`] and a [`TagSource`] into the next tag name. Argument parsing
//! and picking the source stay in `main.rs`, so the workflow runs the same against a mock.

use std::path::Path;

use tracing::{debug, info};

use crate::boundary::BoundaryWarning;
use crate::cli::output::TagOutputs;
use crate::config::Config;
use crate::domain::{bump, BranchContext, BumpKind, PrefixPlanner};
use crate::error::Result;
use crate::manifest::{extract_core, normalize_version, read_app_version};
use crate::remote::{ListingKind, TagSource};
use crate::resolver::{LatestTagResolver, Origin};

/// Result of a successful tag derivation
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    pub outputs: TagOutputs,

    /// Non-fatal conditions met along the way, in the order they occurred
    pub warnings: Vec<BoundaryWarning>,
}

/// Derive the next tag.
///
/// 1. Resolve the application version from the manifest, or the default
/// 2. Take the tag prefix, or the application version, as the starting version
/// 3. Classify the branch; only release branches use the configured bump, others bump the build
/// 4. Plan the search prefix and list published names
/// 5. Resolve the latest matching tag, falling back to the search prefix
/// 6. Bump it and render the release or pre-release form
///
/// # Errors
/// * `InvalidBumpKind` - the configured bump is not one of the four kinds
/// * `NoVersionFound` - the starting version, or the search prefix fallback, is not a version
/// * Any error from the tag source or the manifest reader
pub fn run_tag_workflow<S>(config: &Config, source: &S) -> Result<WorkflowResult>
where
    S: TagSource + ?Sized,
{
    let grammar = config.grammar()?;
    let configured_bump: BumpKind = config.tagging.bump.parse()?;
    let mut warnings = Vec::new();

    let tag_prefix = config
        .tagging
        .tag_prefix
        .as_deref()
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty());
    // an unset manifest only matters when nothing else provides the starting version
    let app_version = resolve_app_version(config, tag_prefix.is_none(), &mut warnings)?;
    let prefix = tag_prefix
        .map(str::to_string)
        .unwrap_or_else(|| app_version.clone());
    let current = grammar.parse(&prefix)?;

    let branch = BranchContext::new(
        config.tagging.branch.as_deref(),
        &config.tagging.release_branch,
    );
    let is_release_branch = branch.is_release_branch();
    let bump_kind = if is_release_branch {
        configured_bump
    } else {
        BumpKind::Build
    };
    let suffix = branch.suffix(config.tagging.pr_number.as_deref());
    info!(branch = ?branch.name, is_release_branch, %bump_kind, "classified branch");

    let search_prefix = PrefixPlanner::new(grammar.label_delimiter()).plan(
        &current,
        bump_kind,
        suffix.as_deref(),
        is_release_branch,
    );
    debug!(%search_prefix, "planned search prefix");

    let kind = if config.remote.releases_only {
        ListingKind::Releases
    } else {
        ListingKind::Tags
    };
    let names = source.list_names(kind)?;
    debug!(count = names.len(), ?kind, "listed published names");

    let resolver = LatestTagResolver::new(
        &grammar,
        config.sort_tags(),
        config.tagging.ignore_v_when_searching,
    );
    let (latest, origin) = resolver.resolve_with_origin(&names, &search_prefix)?;
    if origin == Origin::Fallback {
        warnings.push(BoundaryWarning::NoMatchingTags {
            search_prefix: search_prefix.clone(),
        });
    }

    let next = bump(&latest, bump_kind);
    let rendered = if is_release_branch {
        next.to_release_string()
    } else {
        grammar.to_full_string(&next)
    };
    let without_v = strip_v(&rendered).to_string();
    let with_v = format!("v{}", without_v);
    let tag_name = if config.tagging.prepend_v {
        with_v.clone()
    } else {
        without_v.clone()
    };
    info!(latest = %grammar.to_full_string(&latest), next = %tag_name, "derived next tag");

    Ok(WorkflowResult {
        outputs: TagOutputs {
            tag_name,
            tag_name_with_v: with_v,
            tag_name_without_v: without_v,
            app_version,
            prefix,
            search_prefix,
            suffix,
            bump_item: bump_kind.to_string(),
            latest_git_tag: grammar.to_full_string(&latest),
            is_release_branch,
        },
        warnings,
    })
}

fn resolve_app_version(
    config: &Config,
    report_unset: bool,
    warnings: &mut Vec<BoundaryWarning>,
) -> Result<String> {
    let default_version = &config.manifest.default_version;

    let raw = match config.manifest.filepath.as_deref() {
        None => {
            if report_unset {
                warnings.push(BoundaryWarning::ManifestMissing { path: None });
            }
            None
        }
        Some(filepath) if !Path::new(filepath).exists() => {
            warnings.push(BoundaryWarning::ManifestMissing {
                path: Some(filepath.to_string()),
            });
            None
        }
        Some(filepath) => {
            let raw = read_app_version(Path::new(filepath))?;
            if raw.as_deref().and_then(extract_core).is_none() {
                warnings.push(BoundaryWarning::ManifestWithoutVersion {
                    path: filepath.to_string(),
                    default_version: default_version.trim().to_string(),
                });
            }
            raw
        }
    };

    Ok(normalize_version(raw.as_deref(), default_version))
}

fn strip_v(name: &str) -> &str {
    name.strip_prefix('v')
        .or_else(|| name.strip_prefix('V'))
        .unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NextTagError;
    use crate::remote::MockTagSource;

    fn config(branch: &str, bump: &str, tag_prefix: &str) -> Config {
        let mut config = Config::default();
        config.tagging.branch = Some(branch.to_string());
        config.tagging.bump = bump.to_string();
        config.tagging.tag_prefix = Some(tag_prefix.to_string());
        config
    }

    #[test]
    fn test_release_branch_patch_bump() {
        let source = MockTagSource::with_tags(&["1.2.0", "1.2.3", "1.3.0", "1.2.3-feat+4"]);
        let result = run_tag_workflow(&config("main", "patch", "1.2.0"), &source).unwrap();

        assert_eq!(result.outputs.search_prefix, "1.2");
        assert_eq!(result.outputs.latest_git_tag, "1.2.3");
        assert_eq!(result.outputs.tag_name, "1.2.4");
        assert_eq!(result.outputs.bump_item, "patch");
        assert!(result.outputs.is_release_branch);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_feature_branch_bumps_build() {
        let source = MockTagSource::with_tags(&["1.2.3-login+1", "1.2.3-login+2", "1.2.3"]);
        let result = run_tag_workflow(
            &config("refs/heads/feature/login", "minor", "1.2.3"),
            &source,
        )
        .unwrap();

        assert_eq!(result.outputs.suffix.as_deref(), Some("login"));
        assert_eq!(result.outputs.bump_item, "build");
        assert_eq!(result.outputs.search_prefix, "1.2.3-login");
        assert_eq!(result.outputs.tag_name, "1.2.3-login+3");
        assert!(!result.outputs.is_release_branch);
    }

    #[test]
    fn test_no_match_falls_back_with_warning() {
        let source = MockTagSource::new();
        let result = run_tag_workflow(&config("main", "patch", "2.0.0"), &source).unwrap();

        assert_eq!(result.outputs.latest_git_tag, "2.0.0");
        assert_eq!(result.outputs.tag_name, "2.0.1");
        assert!(result.warnings.contains(&BoundaryWarning::NoMatchingTags {
            search_prefix: "2.0".to_string()
        }));
    }

    #[test]
    fn test_prepend_v() {
        let source = MockTagSource::with_tags(&["1.0.0"]);
        let mut config = config("main", "minor", "1.0.0");
        config.tagging.prepend_v = true;
        let result = run_tag_workflow(&config, &source).unwrap();

        assert_eq!(result.outputs.tag_name, "v1.1.0");
        assert_eq!(result.outputs.tag_name_with_v, "v1.1.0");
        assert_eq!(result.outputs.tag_name_without_v, "1.1.0");
    }

    #[test]
    fn test_invalid_bump_is_rejected() {
        let source = MockTagSource::new();
        let err = run_tag_workflow(&config("main", "huge", "1.0.0"), &source).unwrap_err();
        assert!(matches!(err, NextTagError::InvalidBumpKind(_)));
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_missing_manifest_uses_default() {
        let source = MockTagSource::new();
        let mut config = Config::default();
        config.tagging.branch = Some("main".to_string());
        let result = run_tag_workflow(&config, &source).unwrap();

        assert_eq!(result.outputs.app_version, "0.0.1");
        assert_eq!(result.outputs.prefix, "0.0.1");
        assert_eq!(result.outputs.search_prefix, "0.0");
        assert_eq!(result.outputs.tag_name, "0.0.1");
        assert_eq!(
            result.warnings[0],
            BoundaryWarning::ManifestMissing { path: None }
        );
    }

    #[test]
    fn test_releases_only_lists_releases() {
        let mut source = MockTagSource::new();
        source.add_release("3.1.0");
        let mut config = config("main", "patch", "3.1.0");
        config.remote.releases_only = true;
        let result = run_tag_workflow(&config, &source).unwrap();

        assert_eq!(source.requests(), vec![ListingKind::Releases]);
        assert_eq!(result.outputs.tag_name, "3.1.1");
    }

    #[test]
    fn test_manifest_version_is_normalized() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("build.gradle");
        std::fs::write(&path, "version 'v4.1.0-SNAPSHOT'\n").unwrap();
        let mut config = Config::default();
        config.tagging.branch = Some("main".to_string());
        config.manifest.filepath = Some(path.to_string_lossy().into_owned());

        let result = run_tag_workflow(&config, &MockTagSource::new()).unwrap();

        assert_eq!(result.outputs.app_version, "4.1.0");
        assert!(!result
            .warnings
            .iter()
            .any(|w| matches!(w, BoundaryWarning::ManifestWithoutVersion { .. })));
    }

    #[test]
    fn test_label_separator_kept_when_searching() {
        let source = MockTagSource::with_tags(&["1.2.3_rc1+4", "1.2.3-rc1+9"]);
        let result = run_tag_workflow(&config("feature/x", "patch", "1.2.3_rc1"), &source).unwrap();

        assert_eq!(result.outputs.search_prefix, "1.2.3_rc1");
        assert_eq!(result.outputs.latest_git_tag, "1.2.3_rc1+4");
        assert_eq!(result.outputs.tag_name, "1.2.3_rc1+5");
    }

    #[test]
    fn test_strip_v() {
        assert_eq!(strip_v("v1.0.0"), "1.0.0");
        assert_eq!(strip_v("V1.0.0"), "1.0.0");
        assert_eq!(strip_v("1.0.0"), "1.0.0");
    }
}
