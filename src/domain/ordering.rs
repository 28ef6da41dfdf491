//! Precedence between version records when picking the latest tag
//!
//! Fields are compared in order: major, minor, patch, legacy build number, label, build. For the
//! optional fields an absent value ranks *above* any present one, so `1.0.0` sorts after
//! `1.0.0-rc1` and `1.0.0-rc1` after `1.0.0-rc1+3`. The `v` prefix and separators are ignored.

use crate::domain::version::VersionRecord;
use std::cmp::Ordering;

/// Total order over version records, see the module docs.
pub fn compare(a: &VersionRecord, b: &VersionRecord) -> Ordering {
    a.major
        .cmp(&b.major)
        .then_with(|| a.minor_or_zero().cmp(&b.minor_or_zero()))
        .then_with(|| a.patch_or_zero().cmp(&b.patch_or_zero()))
        .then_with(|| absent_last(&a.legacy_build_number, &b.legacy_build_number))
        .then_with(|| absent_last(&a.label, &b.label))
        .then_with(|| absent_last(&a.build, &b.build))
}

fn absent_last<T: Ord>(a: &Option<T>, b: &Option<T>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.cmp(b),
    }
}
