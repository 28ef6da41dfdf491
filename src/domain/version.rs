//! Version records and the tolerant tag grammar that produces them
//!
//! Accepted shape: `[v]major[.minor[.patch]][_legacy][(-|_)label][(+|.)build]`, anchored at both
//! ends. A `.` build separator is only recognised after a label, so `1.2.3.4` is rejected instead
//! of silently turning the fourth number into a build counter.

use crate::error::{NextTagError, Result};
use regex::{Captures, Regex};
use std::fmt;
use tracing::debug;

/// Default character between the core version and the label
pub const DEFAULT_LABEL_DELIMITER: char = '-';
/// Default character in front of the build counter
pub const DEFAULT_BUILD_DELIMITER: char = '+';

const CORE_SEPARATOR: char = '.';
const LEGACY_BUILD_SEPARATOR: char = '_';
const LABEL_CHARS: &str = "A-Za-z0-9/_-";

/// Structured form of a version tag.
///
/// Separators are stored as they were found so that re-rendering stays byte-stable. Absent
/// `minor`/`patch` render as `0`, but stay distinguishable from an explicit zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VersionRecord {
    pub has_v: bool,
    pub major: u32,
    pub minor: Option<u32>,
    pub patch: Option<u32>,
    pub minor_separator: Option<char>,
    pub patch_separator: Option<char>,
    pub legacy_build_separator: Option<char>,
    pub legacy_build_number: Option<u32>,
    pub label_separator: Option<char>,
    pub label: Option<String>,
    pub build: Option<u32>,
}

impl VersionRecord {
    /// Create a record with a full `major.minor.patch` core
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        VersionRecord {
            major,
            minor: Some(minor),
            patch: Some(patch),
            minor_separator: Some(CORE_SEPARATOR),
            patch_separator: Some(CORE_SEPARATOR),
            ..Default::default()
        }
    }

    pub fn with_v(mut self) -> Self {
        self.has_v = true;
        self
    }

    pub fn with_legacy_build(mut self, number: u32) -> Self {
        self.legacy_build_separator = Some(LEGACY_BUILD_SEPARATOR);
        self.legacy_build_number = Some(number);
        self
    }

    /// Attach a label; an empty label clears it since labels are never empty.
    pub fn with_label(mut self, separator: char, label: impl Into<String>) -> Self {
        let label = label.into();
        if label.is_empty() {
            self.label_separator = None;
            self.label = None;
        } else {
            self.label_separator = Some(separator);
            self.label = Some(label);
        }
        self
    }

    pub fn with_build(mut self, build: u32) -> Self {
        self.build = Some(build);
        self
    }

    pub fn minor_or_zero(&self) -> u32 {
        self.minor.unwrap_or(0)
    }

    pub fn patch_or_zero(&self) -> u32 {
        self.patch.unwrap_or(0)
    }

    /// `major.minor.patch` with the stored separators, no prefix or decorations
    pub fn to_core_string(&self) -> String {
        format!(
            "{}{}{}{}{}",
            self.major,
            self.minor_separator.unwrap_or(CORE_SEPARATOR),
            self.minor_or_zero(),
            self.patch_separator.unwrap_or(CORE_SEPARATOR),
            self.patch_or_zero()
        )
    }

    /// Core version with the `v` prefix when the record carries one
    pub fn to_release_string(&self) -> String {
        if self.has_v {
            format!("v{}", self.to_core_string())
        } else {
            self.to_core_string()
        }
    }

    fn render(&self, label_delimiter: char, build_delimiter: char) -> String {
        let mut out = self.to_release_string();
        if let Some(number) = self.legacy_build_number {
            out.push(self.legacy_build_separator.unwrap_or(LEGACY_BUILD_SEPARATOR));
            out.push_str(&number.to_string());
        }
        if let Some(label) = &self.label {
            out.push(self.label_separator.unwrap_or(label_delimiter));
            out.push_str(label);
        }
        if let Some(build) = self.build {
            out.push(build_delimiter);
            out.push_str(&build.to_string());
        }
        out
    }
}

impl fmt::Display for VersionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_LABEL_DELIMITER, DEFAULT_BUILD_DELIMITER))
    }
}

/// Parser and renderer for version tags with configurable label/build delimiters
#[derive(Debug, Clone)]
pub struct VersionGrammar {
    label_delimiter: char,
    build_delimiter: char,
    pattern: Regex,
}

impl VersionGrammar {
    /// Build a grammar for the given delimiters.
    ///
    /// The label delimiter is accepted in addition to `-` and `_`; the build delimiter in addition
    /// to `+` (and `.` after a label).
    pub fn new(label_delimiter: char, build_delimiter: char) -> Result<Self> {
        validate_delimiters(label_delimiter, build_delimiter)?;

        let label_seps = char_class(&['-', '_', label_delimiter]);
        let build_seps = char_class(&['+', build_delimiter]);
        let labelled_build_seps = char_class(&['+', '.', build_delimiter]);
        let source = format!(
            r"^(?P<v>[vV])?(?P<major>\d+)(?:(?P<minor_sep>\.)(?P<minor>\d+)?(?:(?P<patch_sep>\.)(?P<patch>\d+)?)?)?(?:(?P<legacy_sep>_)(?P<legacy>\d+))?(?:(?P<label_sep>[{label_seps}])(?P<label>[{LABEL_CHARS}]+)(?:[{labelled_build_seps}](?P<labelled_build>\d+))?|[{build_seps}](?P<build>\d+))?$"
        );
        let pattern = Regex::new(&source)
            .map_err(|e| NextTagError::config(format!("Invalid version grammar: {}", e)))?;

        Ok(VersionGrammar {
            label_delimiter,
            build_delimiter,
            pattern,
        })
    }

    pub fn label_delimiter(&self) -> char {
        self.label_delimiter
    }

    pub fn build_delimiter(&self) -> char {
        self.build_delimiter
    }

    /// Parse a raw tag or version string.
    ///
    /// Numeric groups that match textually but do not fit a `u32` become `0` for the core and
    /// `None` for the legacy build number and build counter.
    ///
    /// # Errors
    /// `NextTagError::NoVersionFound` when the anchored grammar does not match.
    pub fn parse(&self, raw: &str) -> Result<VersionRecord> {
        let caps = self
            .pattern
            .captures(raw)
            .ok_or_else(|| NextTagError::NoVersionFound(raw.to_string()))?;

        let record = VersionRecord {
            has_v: caps.name("v").is_some(),
            major: number(&caps, "major").unwrap_or(0),
            minor: caps.name("minor").map(|_| number(&caps, "minor").unwrap_or(0)),
            patch: caps.name("patch").map(|_| number(&caps, "patch").unwrap_or(0)),
            minor_separator: separator(&caps, "minor_sep"),
            patch_separator: separator(&caps, "patch_sep"),
            legacy_build_separator: separator(&caps, "legacy_sep"),
            legacy_build_number: number(&caps, "legacy"),
            label_separator: separator(&caps, "label_sep"),
            label: caps.name("label").map(|m| m.as_str().to_string()),
            build: number(&caps, "labelled_build").or_else(|| number(&caps, "build")),
        };

        debug!(raw, ?record, "parsed version");
        Ok(record)
    }

    /// See [`VersionRecord::to_core_string`]
    pub fn to_core_string(&self, record: &VersionRecord) -> String {
        record.to_core_string()
    }

    /// Complete tag: `v` prefix, core, legacy build, label and build counter.
    ///
    /// Missing separators fall back to this grammar's delimiters.
    pub fn to_full_string(&self, record: &VersionRecord) -> String {
        record.render(self.label_delimiter, self.build_delimiter)
    }
}

impl Default for VersionGrammar {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_DELIMITER, DEFAULT_BUILD_DELIMITER)
            .expect("default delimiters form a valid grammar")
    }
}

fn validate_delimiters(label_delimiter: char, build_delimiter: char) -> Result<()> {
    for (name, c) in [("label", label_delimiter), ("build", build_delimiter)] {
        if c.is_alphanumeric() || c.is_whitespace() || c.is_control() {
            return Err(NextTagError::config(format!(
                "{} delimiter '{}' must be a punctuation character",
                name, c
            )));
        }
    }
    if label_delimiter == build_delimiter {
        return Err(NextTagError::config(format!(
            "label and build delimiters must differ (both are '{}')",
            label_delimiter
        )));
    }
    if label_delimiter == CORE_SEPARATOR {
        return Err(NextTagError::config(
            "label delimiter cannot be '.', it separates the core version",
        ));
    }
    if matches!(build_delimiter, '/' | '_' | '-') {
        return Err(NextTagError::config(format!(
            "build delimiter '{}' is a valid label character",
            build_delimiter
        )));
    }
    Ok(())
}

fn char_class(chars: &[char]) -> String {
    let mut seen: Vec<char> = Vec::with_capacity(chars.len());
    for c in chars {
        if !seen.contains(c) {
            seen.push(*c);
        }
    }
    seen.iter().map(|c| regex::escape(&c.to_string())).collect()
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse::<u32>().ok())
}

fn separator(caps: &Captures<'_>, name: &str) -> Option<char> {
    caps.name(name).and_then(|m| m.as_str().chars().next())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> VersionRecord {
        VersionGrammar::default().parse(raw).unwrap()
    }

    #[test]
    fn test_parse_plain_core() {
        assert_eq!(parse("2.3.1"), VersionRecord::new(2, 3, 1));
    }

    #[test]
    fn test_parse_with_v() {
        assert_eq!(parse("v2.3.1"), VersionRecord::new(2, 3, 1).with_v());
        assert_eq!(parse("V2.3.1"), VersionRecord::new(2, 3, 1).with_v());
    }

    #[test]
    fn test_parse_label_and_build() {
        let expected = VersionRecord::new(2, 3, 1)
            .with_v()
            .with_label('-', "PR1234")
            .with_build(1);
        assert_eq!(parse("v2.3.1-PR1234+1"), expected);
    }

    #[test]
    fn test_parse_legacy_dot_build_after_label() {
        let record = parse("1.0.1-PR123.1");
        assert_eq!(record.label.as_deref(), Some("PR123"));
        assert_eq!(record.build, Some(1));
    }

    #[test]
    fn test_parse_build_without_label() {
        let record = parse("v2.22.0+24");
        assert_eq!(record, VersionRecord::new(2, 22, 0).with_v().with_build(24));
        assert_eq!(record.minor_separator, Some('.'));
        assert_eq!(record.patch_separator, Some('.'));
    }

    #[test]
    fn test_parse_legacy_build_number() {
        let record = parse("1.2.3_7");
        assert_eq!(record, VersionRecord::new(1, 2, 3).with_legacy_build(7));
    }

    #[test]
    fn test_parse_legacy_build_then_label() {
        let record = parse("1.2.3_7-rc1");
        assert_eq!(record.legacy_build_number, Some(7));
        assert_eq!(record.label.as_deref(), Some("rc1"));
    }

    #[test]
    fn test_parse_underscore_label_is_not_legacy_build() {
        let record = parse("1.2.3_rc1");
        assert_eq!(record.legacy_build_number, None);
        assert_eq!(record.label_separator, Some('_'));
        assert_eq!(record.label.as_deref(), Some("rc1"));
    }

    #[test]
    fn test_parse_partial_core_keeps_absence() {
        let record = parse("1.2");
        assert_eq!(record.minor, Some(2));
        assert_eq!(record.patch, None);
        assert_eq!(record.patch_separator, None);

        let record = parse("1.");
        assert_eq!(record.minor_separator, Some('.'));
        assert_eq!(record.minor, None);

        let record = parse("3");
        assert_eq!(record.major, 3);
        assert_eq!(record.minor_separator, None);
    }

    #[test]
    fn test_parse_explicit_zero_differs_from_absent() {
        assert_ne!(parse("1.0"), parse("1"));
    }

    #[test]
    fn test_parse_rejects_missing_major() {
        let grammar = VersionGrammar::default();
        for raw in ["", "v", "release-1.2.3", "x1.2.3", "-1.2.3"] {
            assert!(
                matches!(grammar.parse(raw), Err(NextTagError::NoVersionFound(_))),
                "{} should not parse",
                raw
            );
        }
    }

    #[test]
    fn test_parse_rejects_bare_fourth_number() {
        assert!(VersionGrammar::default().parse("1.2.3.4").is_err());
    }

    #[test]
    fn test_parse_rejects_trailing_garbage() {
        let grammar = VersionGrammar::default();
        assert!(grammar.parse("1.2.3 ").is_err());
        assert!(grammar.parse("1.2.3-rc.x").is_err());
        assert!(grammar.parse("1.2.3+abc").is_err());
    }

    #[test]
    fn test_parse_overflow_coercion() {
        let record = parse("99999999999.1.2");
        assert_eq!(record.major, 0);
        assert_eq!(record.minor, Some(1));

        let record = parse("1.2.3-rc+99999999999");
        assert_eq!(record.build, None);
        assert_eq!(record.label.as_deref(), Some("rc"));

        let record = parse("1.2.3_99999999999");
        assert_eq!(record.legacy_build_number, None);
        assert_eq!(record.legacy_build_separator, Some('_'));
    }

    #[test]
    fn test_render_full_round_trip() {
        let grammar = VersionGrammar::default();
        for raw in ["v2.3.1-PR1234+45", "v2.22.0+24", "1.2.3_4-feature/x+2", "0.0.1"] {
            let record = grammar.parse(raw).unwrap();
            assert_eq!(grammar.to_full_string(&record), raw);
            assert_eq!(grammar.parse(&grammar.to_full_string(&record)).unwrap(), record);
        }
    }

    #[test]
    fn test_render_normalizes_dot_build() {
        let grammar = VersionGrammar::default();
        let record = grammar.parse("1.0.1-PR123.1").unwrap();
        assert_eq!(grammar.to_full_string(&record), "1.0.1-PR123+1");
    }

    #[test]
    fn test_render_core_defaults_absent_numbers() {
        let record = parse("v4");
        assert_eq!(record.to_core_string(), "4.0.0");
        assert_eq!(record.to_release_string(), "v4.0.0");
    }

    #[test]
    fn test_custom_delimiters() {
        let grammar = VersionGrammar::new('~', '#').unwrap();
        let record = grammar.parse("1.2.3~beta#4").unwrap();
        assert_eq!(record.label_separator, Some('~'));
        assert_eq!(record.label.as_deref(), Some("beta"));
        assert_eq!(record.build, Some(4));

        let synthesized = VersionRecord::new(1, 2, 3).with_build(5);
        assert_eq!(grammar.to_full_string(&synthesized), "1.2.3#5");
        // default separators still parse
        assert_eq!(grammar.parse("1.2.3-beta+4").unwrap().build, Some(4));
    }

    #[test]
    fn test_invalid_delimiters_rejected() {
        assert!(VersionGrammar::new('a', '+').is_err());
        assert!(VersionGrammar::new('-', '-').is_err());
        assert!(VersionGrammar::new('.', '+').is_err());
        assert!(VersionGrammar::new('-', '/').is_err());
        assert!(VersionGrammar::new(' ', '+').is_err());
    }

    #[test]
    fn test_with_empty_label_clears() {
        let record = VersionRecord::new(1, 0, 0).with_label('-', "");
        assert_eq!(record.label, None);
        assert_eq!(record.label_separator, None);
    }

    #[test]
    fn test_display_uses_default_delimiters() {
        let record = VersionRecord::new(1, 2, 3).with_label('-', "rc1").with_build(2);
        assert_eq!(record.to_string(), "1.2.3-rc1+2");
    }
}
