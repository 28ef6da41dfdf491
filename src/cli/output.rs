//! Encoding of derived tag outputs for stdout and for the GitHub Actions output file

use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// How outputs are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// One `key=value` line per output
    #[default]
    Text,
    /// A single JSON object
    Json,
}

/// Everything a run derives, keyed the way CI workflows consume it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagOutputs {
    /// The next tag, with or without `v` depending on configuration
    pub tag_name: String,
    pub tag_name_with_v: String,
    pub tag_name_without_v: String,
    /// Normalized application version from the manifest, or the default
    pub app_version: String,
    /// Starting point of the search: the tag prefix if configured, else the app version
    pub prefix: String,
    pub search_prefix: String,
    pub suffix: Option<String>,
    pub bump_item: String,
    /// The tag that was bumped, or the starting point when nothing matched
    pub latest_git_tag: String,
    pub is_release_branch: bool,
}

impl TagOutputs {
    /// Ordered `(key, value)` pairs; an absent suffix is an empty value
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("tag_name", self.tag_name.clone()),
            ("tag_name_with_v", self.tag_name_with_v.clone()),
            ("tag_name_without_v", self.tag_name_without_v.clone()),
            ("app_version", self.app_version.clone()),
            ("prefix", self.prefix.clone()),
            ("search_prefix", self.search_prefix.clone()),
            ("suffix", self.suffix.clone().unwrap_or_default()),
            ("bump_item", self.bump_item.clone()),
            ("latest_git_tag", self.latest_git_tag.clone()),
            ("is_release_branch", self.is_release_branch.to_string()),
        ]
    }

    pub fn to_key_values(&self) -> String {
        self.to_pairs()
            .into_iter()
            .map(|(key, value)| format!("{}={}\n", key, value))
            .collect()
    }

    /// Render for stdout in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_key_values()),
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(self)?)),
        }
    }

    /// Append `key=value` lines to a GitHub Actions output file, creating it if needed
    pub fn append_to_file(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.to_key_values().as_bytes())?;
        Ok(())
    }
}
