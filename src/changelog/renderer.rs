use crate::domain::commit::BREAKING_CHANGE_MARKER;
use crate::domain::{ClassifiedCommit, Commit, Version};
use chrono::NaiveDate;
use std::fmt;

/// Commit types listed in the changelog, in display order, with their titles
pub const CATEGORIES: &[(&str, &str)] = &[
    ("feat", "Features"),
    ("fix", "Bug Fixes"),
    ("perf", "Performance"),
    ("docs", "Documentation"),
    ("style", "Styles"),
    ("refactor", "Refactoring"),
    ("test", "Tests"),
    ("build", "Build"),
    ("ci", "CI/CD"),
    ("chore", "Chores"),
    ("revert", "Reverts"),
];

const BREAKING_CHANGES_TITLE: &str = "### ⚠ BREAKING CHANGES";

/// One `### <Title>` block with its bullets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBlock {
    pub title: &'static str,
    pub entries: Vec<String>,
}

/// Rendered changelog section for a single release
///
/// `Display` produces the markdown: blocks separated by one blank line and no
/// trailing newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogSection {
    pub header: String,
    pub upgrade: Option<String>,
    pub breaking_changes: Vec<String>,
    pub categories: Vec<CategoryBlock>,
}

impl ChangelogSection {
    fn blocks(&self) -> Vec<String> {
        let mut blocks = vec![self.header.clone()];

        if let Some(upgrade) = &self.upgrade {
            blocks.push(upgrade.clone());
        }

        if !self.breaking_changes.is_empty() {
            let mut lines = vec![BREAKING_CHANGES_TITLE.to_string()];
            lines.extend(self.breaking_changes.iter().map(|c| format!("- {}", c)));
            blocks.push(lines.join("\n"));
        }

        for category in &self.categories {
            let mut lines = vec![format!("### {}", category.title)];
            lines.extend(category.entries.iter().cloned());
            blocks.push(lines.join("\n"));
        }

        blocks
    }
}

impl fmt::Display for ChangelogSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.blocks().join("\n\n"))
    }
}

/// Renders changelog sections dated with a fixed release date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangelogRenderer {
    release_date: NaiveDate,
}

impl ChangelogRenderer {
    pub fn new(release_date: NaiveDate) -> Self {
        ChangelogRenderer { release_date }
    }

    /// Build the section for `new_version` from the commits of this release.
    ///
    /// Commits whose message is not conventional are left out, as are types
    /// outside [`CATEGORIES`] (their breaking notes are still listed).
    pub fn render(
        &self,
        commits: &[Commit],
        new_version: &Version,
        current_version: Option<&Version>,
        is_prerelease: bool,
    ) -> ChangelogSection {
        let classified: Vec<(&Commit, ClassifiedCommit)> = commits
            .iter()
            .filter_map(|c| c.classify().map(|parsed| (c, parsed)))
            .collect();

        let mut header = format!(
            "## [{}] - {}",
            new_version,
            self.release_date.format("%Y-%m-%d")
        );
        if is_prerelease {
            header.push_str(" (Pre-release)");
        }

        let upgrade = current_version.map(|current| {
            format!("### Version Upgrade: `{}` → `{}`", current, new_version)
        });

        let breaking_changes = classified
            .iter()
            .filter(|(_, parsed)| parsed.breaking)
            .map(|(commit, parsed)| breaking_note(commit, parsed))
            .collect();

        let categories = CATEGORIES
            .iter()
            .filter_map(|(kind, title)| {
                let entries: Vec<String> = classified
                    .iter()
                    .filter(|(_, parsed)| parsed.r#type == *kind)
                    .map(|(commit, parsed)| bullet(commit, parsed))
                    .collect();
                (!entries.is_empty()).then_some(CategoryBlock {
                    title: *title,
                    entries,
                })
            })
            .collect();

        ChangelogSection {
            header,
            upgrade,
            breaking_changes,
            categories,
        }
    }
}

/// Text after the last `BREAKING CHANGE:` marker, else the description
fn breaking_note(commit: &Commit, parsed: &ClassifiedCommit) -> String {
    commit
        .message
        .rsplit(BREAKING_CHANGE_MARKER)
        .next()
        .filter(|_| commit.message.contains(BREAKING_CHANGE_MARKER))
        .map(str::trim)
        .filter(|note| !note.is_empty())
        .unwrap_or(parsed.description.as_str())
        .to_string()
}

fn bullet(commit: &Commit, parsed: &ClassifiedCommit) -> String {
    match &parsed.scope {
        Some(scope) => format!(
            "- **{}:** {} ({})",
            scope,
            parsed.description,
            commit.short_hash()
        ),
        None => format!("- {} ({})", parsed.description, commit.short_hash()),
    }
}
