//! Gradle build file / properties reader

/// Extract the `version` property from a Gradle build or properties file.
///
/// Lines look like `version = '1.0.0-SNAPSHOT'`, `version: 1.0.0` or the Groovy DSL form
/// `version '1.0.0'`; quotes are removed.
pub fn app_version(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            return None;
        }
        // properties keys end at the first separator or whitespace
        let key_end = line.find(|c: char| c == '=' || c == ':' || c.is_whitespace())?;
        let (key, rest) = line.split_at(key_end);
        if key != "version" {
            return None;
        }
        let rest = rest.trim_start();
        let value: String = rest
            .strip_prefix('=')
            .or_else(|| rest.strip_prefix(':'))
            .unwrap_or(rest)
            .trim()
            .chars()
            .filter(|c| *c != '\'' && *c != '"')
            .collect();
        Some(value).filter(|v| !v.is_empty())
    })
}
