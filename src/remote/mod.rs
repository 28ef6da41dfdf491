//! Listing of previously published tag names
//!
//! The [TagSource] trait is the seam between the tagging workflow and wherever tags live:
//!
//! - [github::GitHubTagSource]: tags or releases of a GitHub repository, paginated over the REST API
//! - [local::LocalTagSource]: tags of a local git repository via `git2`
//! - [mock::MockTagSource]: canned names for tests
//!
//! Sources make a single best-effort fetch. They never retry and never order or filter names;
//! that is the resolver's job.

pub mod github;
pub mod local;
pub mod mock;

pub use github::GitHubTagSource;
pub use local::LocalTagSource;
pub use mock::MockTagSource;

use crate::error::{NextTagError, Result};
use std::fmt;

/// Which kind of published name to list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    /// Plain git tags
    Tags,
    /// Tag names attached to published releases
    Releases,
}

/// Source of previously published tag names
pub trait TagSource {
    /// List every published name of the given kind.
    ///
    /// Names are returned in the order the source provides them. Hosted sources return the most
    /// recent first, which is what lets the resolver stop at the first match when sorting is off.
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - All names, possibly empty
    /// * `Err` - If the listing is unsupported or the fetch fails
    fn list_names(&self, kind: ListingKind) -> Result<Vec<String>>;
}

/// A hosted repository identified as `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl RepoSlug {
    /// Parse an `owner/repo` string
    pub fn parse(value: &str) -> Result<Self> {
        let mut parts = value.trim().splitn(2, '/');
        let owner = parts.next().unwrap_or_default().trim();
        let repo = parts.next().unwrap_or_default().trim();

        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(NextTagError::config(format!(
                "Repository must look like 'owner/repo', got '{}'",
                value
            )));
        }

        Ok(RepoSlug {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
