//! User interface module.
//!
//! - `formatter` - Pure formatting functions
//! - This module - Reporting a finished run

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_branch_policies, display_changelog_preview,
    display_commit_analysis, display_error, display_status, display_success,
    display_version_change,
};

use crate::cli::{ReleaseOutcome, ReleasePlan};

fn display_plan(plan: &ReleasePlan) {
    display_commit_analysis(&plan.commits, &plan.branch);
    display_version_change(
        &plan.current_version,
        &plan.new_version.to_string(),
        plan.bump,
    );
}

/// Print the result of a run.
///
/// Every outcome is a successful run; nothing to release is reported as a
/// warning.
pub fn report_outcome(outcome: &ReleaseOutcome) {
    match outcome {
        ReleaseOutcome::NoOp(warning) => display_boundary_warning(warning),
        ReleaseOutcome::DryRun(plan) => {
            display_plan(plan);
            display_changelog_preview(&plan.changelog_section);
            display_status("Dry run: no files were written");
        }
        ReleaseOutcome::Persisted(plan) => {
            display_plan(plan);
            display_success(&format!("Version updated to {}", plan.new_version));
        }
        ReleaseOutcome::Tagged { plan, tag, warning } => {
            display_plan(plan);
            display_success(&format!("Released {} (tag {})", plan.new_version, tag));
            if let Some(warning) = warning {
                display_boundary_warning(warning);
            }
        }
    }
}
