use tracing::debug;

/// Represents the branch being tagged relative to the release branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchContext {
    pub name: Option<String>,
    pub is_release: bool,
}

impl BranchContext {
    /// Build a context from a raw branch or ref name.
    ///
    /// `refs/heads/` and `refs/tags/` are stripped; the branch is a release branch when it starts
    /// with `release_branch`.
    pub fn new(branch: Option<&str>, release_branch: &str) -> Self {
        let name = branch.and_then(strip_refs);
        let is_release = name
            .as_deref()
            .map(|name| name.starts_with(release_branch))
            .unwrap_or(false);

        BranchContext { name, is_release }
    }

    pub fn is_release_branch(&self) -> bool {
        self.is_release
    }

    /// Label used for pre-release tags: `PR{n}` for pull requests, otherwise the branch basename
    /// with dots replaced by dashes.
    pub fn suffix(&self, pr_number: Option<&str>) -> Option<String> {
        let pr_number = pr_number.map(str::trim).filter(|pr| !pr.is_empty());
        let suffix = match pr_number {
            Some(pr) => Some(format!("PR{}", pr)),
            None => self
                .name
                .as_deref()
                .and_then(basename)
                .map(|base| base.replace('.', "-")),
        };
        debug!(branch = ?self.name, ?suffix, "derived tag suffix");
        suffix
    }
}

/// Remove `refs/heads/` and `refs/tags/` from a ref name
pub fn strip_refs(path: &str) -> Option<String> {
    if path.is_empty() {
        return None;
    }
    Some(path.replacen("refs/heads/", "", 1).replacen("refs/tags/", "", 1))
}

/// Last `/`-separated segment of a path
pub fn basename(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    path.rsplit('/').next()
}
