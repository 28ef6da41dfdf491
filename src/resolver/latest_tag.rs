use crate::domain::{compare, VersionGrammar, VersionRecord};
use crate::error::Result;
use tracing::{debug, trace};

/// Where a resolved version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// A tag name passed the prefix filter and parsed
    Matched,
    /// Nothing matched; the search prefix itself was parsed
    Fallback,
}

/// Picks the latest tag for a search prefix out of an unordered list of names
pub struct LatestTagResolver<'a> {
    grammar: &'a VersionGrammar,
    sort: bool,
    ignore_v_prefix: bool,
}

impl<'a> LatestTagResolver<'a> {
    /// Create a resolver.
    ///
    /// With `sort` off the first matching name wins, which assumes the names arrive newest
    /// first. A matching name that is not a version is skipped and the scan moves on to the next
    /// one; it does not end the search in a prefix fallback.
    /// With `ignore_v_prefix` a leading `v` is disregarded on both sides of the filter.
    pub fn new(grammar: &'a VersionGrammar, sort: bool, ignore_v_prefix: bool) -> Self {
        LatestTagResolver {
            grammar,
            sort,
            ignore_v_prefix,
        }
    }

    /// Resolve the latest version among `names` starting with `prefix`.
    ///
    /// Names that fail to parse are skipped. When nothing matches, `prefix` is parsed instead.
    ///
    /// # Errors
    /// `NoVersionFound` only when the prefix fallback itself is not a version.
    pub fn resolve<I, S>(&self, names: I, prefix: &str) -> Result<VersionRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.resolve_with_origin(names, prefix)
            .map(|(record, _)| record)
    }

    /// Like [`resolve`](Self::resolve), also reporting whether the prefix fallback was used.
    pub fn resolve_with_origin<I, S>(&self, names: I, prefix: &str) -> Result<(VersionRecord, Origin)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let search = self.search_key(prefix);
        let mut candidates = names
            .into_iter()
            .filter(|name| self.search_key(name.as_ref()).starts_with(search))
            .filter_map(|name| self.parse_candidate(name.as_ref()));

        let latest = if self.sort {
            let mut matched: Vec<VersionRecord> = candidates.collect();
            debug!(count = matched.len(), prefix, "collected matching tags");
            // stable sort: among equal records the last supplied wins
            matched.sort_by(compare);
            matched.pop()
        } else {
            candidates.next()
        };

        match latest {
            Some(record) => {
                debug!(%record, "latest matching tag");
                Ok((record, Origin::Matched))
            }
            None => {
                debug!(prefix, "no tags matched, falling back to prefix");
                Ok((self.grammar.parse(prefix)?, Origin::Fallback))
            }
        }
    }

    fn search_key<'s>(&self, value: &'s str) -> &'s str {
        if self.ignore_v_prefix {
            value
                .strip_prefix('v')
                .or_else(|| value.strip_prefix('V'))
                .unwrap_or(value)
        } else {
            value
        }
    }

    fn parse_candidate(&self, name: &str) -> Option<VersionRecord> {
        match self.grammar.parse(name) {
            Ok(record) => Some(record),
            Err(_) => {
                trace!(name, "ignoring tag that is not a version");
                None
            }
        }
    }
}
