use crate::error::{NextTagError, Result};
use crate::remote::{ListingKind, TagSource};
use git2::{ErrorCode, Repository};
use std::path::Path;
use tracing::debug;

/// Tag source backed by a local git repository
pub struct LocalTagSource {
    repo: Repository,
}

impl LocalTagSource {
    /// Open or discover a git repository at or above `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Repository::discover(path)?;
        Ok(LocalTagSource { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Repository) -> Self {
        LocalTagSource { repo }
    }

    /// Name of the branch `HEAD` points at, `None` when detached or unborn
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                return Ok(None)
            }
            Err(e) => return Err(e.into()),
        };

        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_string))
    }
}

impl TagSource for LocalTagSource {
    fn list_names(&self, kind: ListingKind) -> Result<Vec<String>> {
        if kind == ListingKind::Releases {
            return Err(NextTagError::config(
                "releases only exist on a hosted repository; use the github source",
            ));
        }

        let names: Vec<String> = self
            .repo
            .tag_names(None)?
            .iter()
            .flatten()
            .map(str::to_string)
            .collect();
        debug!(count = names.len(), "listed local tags");
        Ok(names)
    }
}
