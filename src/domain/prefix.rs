use crate::domain::bump::BumpKind;
use crate::domain::version::{VersionRecord, DEFAULT_LABEL_DELIMITER};
use tracing::debug;

/// Derives the search prefix used to narrow remote tag names before parsing them.
///
/// The same string doubles as the starting version when nothing matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixPlanner {
    label_delimiter: char,
}

impl PrefixPlanner {
    pub fn new(label_delimiter: char) -> Self {
        PrefixPlanner { label_delimiter }
    }

    /// Plan the prefix for `kind` starting from `current`.
    ///
    /// - Major: empty, every tag matches
    /// - Minor: `{major}.`
    /// - Patch: `{major}.{minor}`
    /// - Build: `{major}.{minor}.{patch}`, followed off release branches by the label with its own
    ///   separator, or else by the branch suffix with the configured delimiter
    ///
    /// A `v` is prepended when `current` has one.
    pub fn plan(
        &self,
        current: &VersionRecord,
        kind: BumpKind,
        branch_suffix: Option<&str>,
        is_release_branch: bool,
    ) -> String {
        let mut prefix = match kind {
            BumpKind::Major => String::new(),
            BumpKind::Minor => format!("{}.", current.major),
            BumpKind::Patch => format!("{}.{}", current.major, current.minor_or_zero()),
            BumpKind::Build => {
                let core = format!(
                    "{}.{}.{}",
                    current.major,
                    current.minor_or_zero(),
                    current.patch_or_zero()
                );
                // an existing label keeps its own separator, a branch suffix takes the configured one
                let label = match current.label.as_deref().filter(|label| !label.is_empty()) {
                    Some(label) => Some((
                        current.label_separator.unwrap_or(self.label_delimiter),
                        label,
                    )),
                    None => branch_suffix
                        .filter(|suffix| !suffix.is_empty())
                        .map(|suffix| (self.label_delimiter, suffix)),
                };
                match label {
                    Some((separator, label)) if !is_release_branch => {
                        format!("{}{}{}", core, separator, label)
                    }
                    _ => core,
                }
            }
        };

        if current.has_v {
            prefix.insert(0, 'v');
        }

        debug!(%kind, branch_suffix, is_release_branch, %prefix, "planned search prefix");
        prefix
    }
}

impl Default for PrefixPlanner {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_DELIMITER)
    }
}
