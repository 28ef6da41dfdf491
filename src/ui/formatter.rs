//! Formatting of status lines and the run summary.
//!
//! The `format_*` functions build the text and are what the tests look at; the `display_*`
//! functions print it.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::output::TagOutputs;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠").yellow(), warning)
}

/// Human summary of a run: previous tag, next tag, and the branch classification
pub fn format_summary(outputs: &TagOutputs) -> String {
    let branch_kind = if outputs.is_release_branch {
        "release branch"
    } else {
        "pre-release branch"
    };

    let mut summary = format!(
        "{}\n  Latest: {}\n  Next:   {}\n  Bump:   {} ({})",
        style("Tag derivation").bold(),
        style(&outputs.latest_git_tag).red(),
        style(&outputs.tag_name).green(),
        outputs.bump_item,
        branch_kind,
    );
    if let Some(suffix) = &outputs.suffix {
        summary.push_str(&format!("\n  Suffix: {}", suffix));
    }
    summary
}

/// Print an error in red
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Print a non-fatal warning with a yellow marker
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

pub fn display_summary(outputs: &TagOutputs) {
    eprintln!("{}", format_summary(outputs));
}
