use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;

use next_tag::cli::{run_tag_workflow, OutputFormat};
use next_tag::config::{self, Config, SourceKind};
use next_tag::remote::{GitHubTagSource, LocalTagSource, RepoSlug, TagSource};
use next_tag::{logging, ui};

#[derive(clap::Parser)]
#[command(
    name = "next-tag",
    version,
    about = "Derive the next version tag from a manifest version and existing tags"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Maven POM or Gradle file holding the app version")]
    filepath: Option<String>,

    #[arg(long, help = "Version used when the manifest has none")]
    default_version: Option<String>,

    #[arg(short, long, help = "Bump on the release branch: major, minor, patch or build")]
    bump: Option<String>,

    #[arg(long, help = "Branch or ref being tagged")]
    branch: Option<String>,

    #[arg(long, help = "Pull request number, labels pre-release tags PR<n>")]
    pr_number: Option<String>,

    #[arg(long, help = "Branches starting with this name are release branches")]
    release_branch: Option<String>,

    #[arg(long, help = "Start from this version instead of the manifest version")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Output tag_name with a leading v")]
    prepend_v: bool,

    #[arg(long, help = "Sort matching tags (true) or take the first match (false)")]
    sort_tags: Option<bool>,

    #[arg(long, help = "Disregard a leading v when matching tags")]
    ignore_v_when_searching: bool,

    #[arg(long, help = "Delimiter between the version and its label")]
    label_delimiter: Option<char>,

    #[arg(long, help = "Delimiter before the build counter")]
    build_delimiter: Option<char>,

    #[arg(long, value_enum, help = "Where to list existing tags")]
    source: Option<SourceKind>,

    #[arg(short, long, help = "Hosted repository as owner/repo")]
    repository: Option<String>,

    #[arg(long, help = "List release tag names instead of all tags")]
    releases_only: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text, help = "Output format")]
    format: OutputFormat,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,
}

impl Args {
    /// Command line flags win over every other configuration layer
    fn apply_to(&self, config: &mut Config) {
        if let Some(filepath) = &self.filepath {
            config.manifest.filepath = Some(filepath.clone());
        }
        if let Some(default_version) = &self.default_version {
            config.manifest.default_version = default_version.clone();
        }
        if let Some(bump) = &self.bump {
            config.tagging.bump = bump.clone();
        }
        if let Some(branch) = &self.branch {
            config.tagging.branch = Some(branch.clone());
        }
        if let Some(pr_number) = &self.pr_number {
            config.tagging.pr_number = Some(pr_number.clone());
        }
        if let Some(release_branch) = &self.release_branch {
            config.tagging.release_branch = release_branch.clone();
        }
        if let Some(tag_prefix) = &self.tag_prefix {
            config.tagging.tag_prefix = Some(tag_prefix.clone());
        }
        if self.prepend_v {
            config.tagging.prepend_v = true;
        }
        if let Some(sort_tags) = self.sort_tags {
            config.tagging.sort_tags = Some(sort_tags);
        }
        if self.ignore_v_when_searching {
            config.tagging.ignore_v_when_searching = true;
        }
        if let Some(label) = self.label_delimiter {
            config.delimiters.label = label;
        }
        if let Some(build) = self.build_delimiter {
            config.delimiters.build = build;
        }
        if let Some(source) = self.source {
            config.remote.source = source;
        }
        if let Some(repository) = &self.repository {
            config.remote.repository = Some(repository.clone());
        }
        if self.releases_only {
            config.remote.releases_only = true;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<()> {
    let mut config = config::load_config(args.config.as_deref())
        .context("Error loading config")?;
    config.apply_env_overrides()?;
    args.apply_to(&mut config);

    let source = open_source(&mut config)?;

    ui::display_status("Deriving next tag...");
    let result = run_tag_workflow(&config, source.as_ref())?;
    for warning in &result.warnings {
        ui::display_boundary_warning(warning);
    }
    ui::display_summary(&result.outputs);

    print!("{}", result.outputs.render(args.format)?);

    if let Some(path) = std::env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
        result
            .outputs
            .append_to_file(Path::new(&path))
            .context("Failed to write GITHUB_OUTPUT")?;
    }

    ui::display_success(&format!("Next tag: {}", result.outputs.tag_name));
    Ok(())
}

/// Build the configured tag source. The local source also fills in the branch from `HEAD`
/// when none was given.
fn open_source(config: &mut Config) -> Result<Box<dyn TagSource>> {
    match config.remote.source {
        SourceKind::Github => {
            let repository = config.remote.repository.as_deref().context(
                "No repository configured; set --repository, INPUT_REPOSITORY or GITHUB_REPOSITORY",
            )?;
            let slug = RepoSlug::parse(repository)?;
            let source =
                GitHubTagSource::new(&config.remote.api_url, slug, config.remote.token.clone())?;
            Ok(Box::new(source))
        }
        SourceKind::Local => {
            let source = LocalTagSource::open(".").context("Git repository error")?;
            if config.tagging.branch.is_none() {
                config.tagging.branch = source.current_branch()?;
            }
            Ok(Box::new(source))
        }
    }
}
