//! Pure formatting functions for UI output.
//!
//! Functions here only print; string building is split out where it is worth
//! testing.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{BranchPolicyTable, BumpLevel, Commit};

const MAX_LISTED_COMMITS: usize = 10;
const MAX_SUBJECT_CHARS: usize = 60;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// First line of a commit message, cut to a fixed number of characters
fn subject_line(message: &str) -> &str {
    let subject = message.lines().next().unwrap_or("");
    match subject.char_indices().nth(MAX_SUBJECT_CHARS) {
        Some((idx, _)) => &subject[..idx],
        None => subject,
    }
}

/// Display the commits going into a release.
///
/// Shows the branch name and up to 10 commits from the provided list.
/// If more than 10 commits exist, displays count of remaining commits.
pub fn display_commit_analysis(commits: &[Commit], branch_name: &str) {
    println!(
        "\n{}",
        style(format!("Analyzing commits on branch '{}'", branch_name)).bold()
    );
    println!(
        "{}",
        style(format!("{} commits since last release:", commits.len())).underlined()
    );

    for (i, commit) in commits.iter().take(MAX_LISTED_COMMITS).enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            style(commit.short_hash()).dim(),
            subject_line(&commit.message)
        );
    }

    if commits.len() > MAX_LISTED_COMMITS {
        println!("  ... and {} more commits", commits.len() - MAX_LISTED_COMMITS);
    }
}

/// Display the version change with the applied bump level.
pub fn display_version_change(current: &str, new: &str, bump: BumpLevel) {
    println!("\n{}", style(format!("Version Change ({} bump):", bump)).bold());
    println!("  From: {}", style(current).red());
    println!("  To:   {}", style(new).green());
}

/// Display configured branches and the release each one produces.
pub fn display_branch_policies(policies: &BranchPolicyTable) {
    println!("{}", style("Configured branches:").bold());
    for name in policies.branch_names() {
        let policy = policies.lookup(&name);
        match policy.label() {
            Some(label) => println!("  - {} ({}, prerelease)", name, style(label).cyan()),
            None => println!("  - {} (final)", name),
        }
    }
    println!("  Other branches produce final releases.");
}

/// Display a rendered changelog section.
pub fn display_changelog_preview(section: &str) {
    println!("\n{}", style("Changelog:").bold());
    println!("{}", section);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_line_first_line_only() {
        assert_eq!(subject_line("feat: add SSO\n\nbody text"), "feat: add SSO");
    }

    #[test]
    fn test_subject_line_truncates_on_char_boundary() {
        let long = "é".repeat(80);
        assert_eq!(subject_line(&long).chars().count(), MAX_SUBJECT_CHARS);
    }

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_commit_analysis() {
        let commits: Vec<Commit> = (0..12)
            .map(|i| Commit::new(format!("{:040x}", i), format!("fix: change {}", i), "2025-01-01"))
            .collect();
        display_commit_analysis(&commits, "main");
    }
}
