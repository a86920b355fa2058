/// Top-level heading every changelog document starts with
pub const CHANGELOG_HEADING: &str = "# Changelog";

/// Prepend a rendered section to a changelog document.
///
/// - No document (or only whitespace): a fresh document with the heading.
/// - Document whose first line is exactly `# Changelog`: the text before the
///   first blank line is kept as the header, the section goes right after it,
///   and the rest follows with only its leading whitespace trimmed. Lines
///   ending in `\r\n` count. Without a blank line the header is the heading
///   line alone.
/// - Any other document: the heading and section are placed above it and the
///   old content is kept untouched.
///
/// # Example
/// ```
/// # use semantic_versioner::changelog::merge;
/// let doc = merge("## [1.0.1] - 2024-01-02", Some("# Changelog\n\n## [1.0.0] - 2024-01-01"));
/// assert_eq!(doc, "# Changelog\n\n## [1.0.1] - 2024-01-02\n\n## [1.0.0] - 2024-01-01");
/// ```
pub fn merge(section: &str, existing: Option<&str>) -> String {
    let existing = match existing.filter(|doc| !doc.trim().is_empty()) {
        Some(doc) => doc,
        None => return format!("{}\n\n{}", CHANGELOG_HEADING, section),
    };

    if !starts_with_heading(existing) {
        return format!("{}\n\n{}\n\n{}", CHANGELOG_HEADING, section, existing);
    }

    let (header, body) = split_header(existing);
    format!("{}\n\n{}\n\n{}", header.trim(), section, body.trim_start())
}

fn starts_with_heading(document: &str) -> bool {
    document
        .split('\n')
        .next()
        .map(|line| line.trim_end_matches('\r') == CHANGELOG_HEADING)
        .unwrap_or(false)
}

/// Split before the first blank line after the heading, or after the heading line
fn split_header(document: &str) -> (&str, &str) {
    let mut offset = 0;
    for line in document.split_inclusive('\n') {
        if offset > 0 && line.trim_end_matches(&['\n', '\r'][..]).is_empty() {
            return document.split_at(offset);
        }
        offset += line.len();
    }

    let heading_end = document.find('\n').map_or(document.len(), |idx| idx + 1);
    document.split_at(heading_end)
}
