use crate::domain::version::VersionRecord;
use crate::error::{NextTagError, Result};
use std::fmt;
use std::str::FromStr;

/// Granularity of a version bump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
    Build,
}

impl BumpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
            BumpKind::Build => "build",
        }
    }
}

impl FromStr for BumpKind {
    type Err = NextTagError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            "build" => Ok(BumpKind::Build),
            _ => Err(NextTagError::InvalidBumpKind(s.to_string())),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produce the next version for `kind`, leaving `record` untouched.
///
/// - **Major**: major += 1, minor = patch = 0, legacy build, label and build cleared
/// - **Minor**: minor += 1, patch = 0, label and build cleared
/// - **Patch**: patch += 1, label and build cleared
/// - **Build**: build += 1, everything else preserved
pub fn bump(record: &VersionRecord, kind: BumpKind) -> VersionRecord {
    let mut next = record.clone();
    match kind {
        BumpKind::Major => {
            next.major = next.major.saturating_add(1);
            next.minor = Some(0);
            next.patch = Some(0);
            next.minor_separator = next.minor_separator.or(Some('.'));
            next.patch_separator = next.patch_separator.or(Some('.'));
            next.legacy_build_separator = None;
            next.legacy_build_number = None;
            clear_prerelease(&mut next);
        }
        BumpKind::Minor => {
            next.minor = Some(record.minor_or_zero().saturating_add(1));
            next.patch = Some(0);
            next.minor_separator = next.minor_separator.or(Some('.'));
            next.patch_separator = next.patch_separator.or(Some('.'));
            clear_prerelease(&mut next);
        }
        BumpKind::Patch => {
            next.patch = Some(record.patch_or_zero().saturating_add(1));
            next.minor = Some(record.minor_or_zero());
            next.minor_separator = next.minor_separator.or(Some('.'));
            next.patch_separator = next.patch_separator.or(Some('.'));
            clear_prerelease(&mut next);
        }
        BumpKind::Build => {
            next.build = Some(record.build.unwrap_or(0).saturating_add(1));
        }
    }
    next
}

fn clear_prerelease(record: &mut VersionRecord) {
    record.label_separator = None;
    record.label = None;
    record.build = None;
}
