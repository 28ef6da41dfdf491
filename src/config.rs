use crate::domain::version::{DEFAULT_BUILD_DELIMITER, DEFAULT_LABEL_DELIMITER};
use crate::domain::VersionGrammar;
use crate::error::{NextTagError, Result};
use crate::manifest::DEFAULT_APP_VERSION;
use crate::remote::github::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// File name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "nexttag.toml";

/// Represents the complete configuration for next-tag.
///
/// Layered as: defaults, then the config file, then `INPUT_*`/`GITHUB_*` environment variables,
/// then command line flags.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub delimiters: DelimitersConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

fn default_app_version() -> String {
    DEFAULT_APP_VERSION.to_string()
}

fn default_bump() -> String {
    "patch".to_string()
}

fn default_release_branch() -> String {
    "main".to_string()
}

fn default_label_delimiter() -> char {
    DEFAULT_LABEL_DELIMITER
}

fn default_build_delimiter() -> char {
    DEFAULT_BUILD_DELIMITER
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Where the application version comes from
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    /// Path to a Maven POM or Gradle build/properties file
    #[serde(default)]
    pub filepath: Option<String>,

    /// Version used when the manifest declares none
    #[serde(default = "default_app_version")]
    pub default_version: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            filepath: None,
            default_version: default_app_version(),
        }
    }
}

/// How the next tag is derived
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggingConfig {
    /// One of major, minor, patch or build; only applies on the release branch
    #[serde(default = "default_bump")]
    pub bump: String,

    /// Branches starting with this name are release branches
    #[serde(default = "default_release_branch")]
    pub release_branch: String,

    /// Used instead of the manifest version as the starting point
    #[serde(default)]
    pub tag_prefix: Option<String>,

    /// Output `tag_name` with a leading `v`
    #[serde(default)]
    pub prepend_v: bool,

    /// Sort all matching tags instead of trusting the listing order.
    /// Unset means sort unless listing releases.
    #[serde(default)]
    pub sort_tags: Option<bool>,

    #[serde(default)]
    pub ignore_v_when_searching: bool,

    /// Branch or ref being tagged
    #[serde(default)]
    pub branch: Option<String>,

    /// Pull request number, turns the tag label into `PR{n}`
    #[serde(default)]
    pub pr_number: Option<String>,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        TaggingConfig {
            bump: default_bump(),
            release_branch: default_release_branch(),
            tag_prefix: None,
            prepend_v: false,
            sort_tags: None,
            ignore_v_when_searching: false,
            branch: None,
            pr_number: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DelimitersConfig {
    #[serde(default = "default_label_delimiter")]
    pub label: char,

    #[serde(default = "default_build_delimiter")]
    pub build: char,
}

impl Default for DelimitersConfig {
    fn default() -> Self {
        DelimitersConfig {
            label: default_label_delimiter(),
            build: default_build_delimiter(),
        }
    }
}

/// Which backend lists existing tags
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Github,
    Local,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RemoteConfig {
    #[serde(default)]
    pub source: SourceKind,

    /// `owner/repo` on the hosting service
    #[serde(default)]
    pub repository: Option<String>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// List release tag names instead of all tags
    #[serde(default)]
    pub releases_only: bool,

    /// Only ever taken from the environment
    #[serde(skip)]
    pub token: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        RemoteConfig {
            source: SourceKind::default(),
            repository: None,
            api_url: default_api_url(),
            releases_only: false,
            token: None,
        }
    }
}

impl Config {
    /// Whether to sort matching tags; defaults to sorting unless listing releases,
    /// which the host already returns newest first.
    pub fn sort_tags(&self) -> bool {
        self.tagging
            .sort_tags
            .unwrap_or(!self.remote.releases_only)
    }

    /// Grammar for the configured delimiters
    pub fn grammar(&self) -> Result<VersionGrammar> {
        VersionGrammar::new(self.delimiters.label, self.delimiters.build)
    }

    /// Apply `INPUT_*` and `GITHUB_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup. Empty values count as unset.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let flag = |name: &str| get(name).map(|v| v.trim().eq_ignore_ascii_case("true"));

        if let Some(v) = get("INPUT_FILEPATH") {
            self.manifest.filepath = Some(v);
        }
        if let Some(v) = get("INPUT_DEFAULT_VERSION") {
            self.manifest.default_version = v;
        }
        if let Some(v) = get("INPUT_BUMP") {
            self.tagging.bump = v;
        }
        if let Some(v) = get("INPUT_RELEASE_BRANCH") {
            self.tagging.release_branch = v;
        }
        if let Some(v) = get("INPUT_TAG_PREFIX") {
            self.tagging.tag_prefix = Some(v);
        }
        if let Some(v) = flag("INPUT_PREPEND_V") {
            self.tagging.prepend_v = v;
        }
        if let Some(v) = flag("INPUT_SORT_TAGS") {
            self.tagging.sort_tags = Some(v);
        }
        if let Some(v) = flag("INPUT_IGNORE_V_WHEN_SEARCHING") {
            self.tagging.ignore_v_when_searching = v;
        }
        if let Some(v) = get("INPUT_BRANCH") {
            self.tagging.branch = Some(v);
        } else if self.tagging.branch.is_none() {
            self.tagging.branch = get("GITHUB_REF");
        }
        if let Some(v) = get("INPUT_PR_NUMBER") {
            self.tagging.pr_number = Some(v);
        }
        if let Some(v) = get("INPUT_LABEL_DELIMITER") {
            self.delimiters.label = single_char("INPUT_LABEL_DELIMITER", &v)?;
        }
        if let Some(v) = get("INPUT_BUILD_DELIMITER") {
            self.delimiters.build = single_char("INPUT_BUILD_DELIMITER", &v)?;
        }
        if let Some(v) = get("INPUT_REPOSITORY") {
            self.remote.repository = Some(v);
        } else if self.remote.repository.is_none() {
            self.remote.repository = get("GITHUB_REPOSITORY");
        }
        if let Some(v) = get("GITHUB_API_URL") {
            self.remote.api_url = v;
        }
        if let Some(v) = flag("INPUT_RELEASES_ONLY") {
            self.remote.releases_only = v;
        }
        if let Some(v) = get("INPUT_GITHUB_TOKEN").or_else(|| get("GITHUB_TOKEN")) {
            self.remote.token = Some(v);
        }

        Ok(())
    }
}

fn single_char(name: &str, value: &str) -> Result<char> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(NextTagError::config(format!(
            "{} must be a single character, got '{}'",
            name, value
        ))),
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nexttag.toml` in current directory
/// 3. `.nexttag.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        debug!(path, "loading config");
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        debug!(path = CONFIG_FILE_NAME, "loading config");
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            debug!(path = %config_path.display(), "loading config");
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
