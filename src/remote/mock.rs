use crate::error::{NextTagError, Result};
use crate::remote::{ListingKind, TagSource};
use std::cell::RefCell;

/// Mock tag source for testing without network or git access
#[derive(Default)]
pub struct MockTagSource {
    tags: Vec<String>,
    releases: Vec<String>,
    failure: Option<String>,
    requests: RefCell<Vec<ListingKind>>,
}

impl MockTagSource {
    /// Create a new empty mock source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock source listing `tags`, in order
    pub fn with_tags<S: AsRef<str>>(tags: &[S]) -> Self {
        let mut source = Self::new();
        for tag in tags {
            source.add_tag(tag.as_ref());
        }
        source
    }

    pub fn add_tag(&mut self, name: impl Into<String>) {
        self.tags.push(name.into());
    }

    pub fn add_release(&mut self, tag_name: impl Into<String>) {
        self.releases.push(tag_name.into());
    }

    /// Make every listing fail with a remote error
    pub fn fail_with(&mut self, message: impl Into<String>) {
        self.failure = Some(message.into());
    }

    /// Listings requested so far
    pub fn requests(&self) -> Vec<ListingKind> {
        self.requests.borrow().clone()
    }
}

impl TagSource for MockTagSource {
    fn list_names(&self, kind: ListingKind) -> Result<Vec<String>> {
        self.requests.borrow_mut().push(kind);
        if let Some(message) = &self.failure {
            return Err(NextTagError::remote(message.clone()));
        }
        Ok(match kind {
            ListingKind::Tags => self.tags.clone(),
            ListingKind::Releases => self.releases.clone(),
        })
    }
}
