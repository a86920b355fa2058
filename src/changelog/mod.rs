//! Changelog rendering and merging
//!
//! - `renderer` - builds a [`ChangelogSection`] for one release
//! - `merger` - prepends a rendered section to an existing document

pub mod merger;
pub mod renderer;

pub use merger::{merge, CHANGELOG_HEADING};
pub use renderer::{CategoryBlock, ChangelogRenderer, ChangelogSection, CATEGORIES};
