//! User interface module - console reporting of a workflow run.
//!
//! - `formatter` - Pure formatting functions
//! - This module - Reporting of a whole [WorkflowOutcome]

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_commit_analysis, display_error, display_preview,
    display_status, display_success, display_version_change,
};

use crate::cli::{ReleaseAction, WorkflowOutcome};

/// Print everything a finished run has to tell the user.
///
/// Warnings come first, then the analysed commits and the version change,
/// then the action-specific part (preview text, dry-run section or the
/// files that were committed).
pub fn display_outcome(outcome: &WorkflowOutcome) {
    for warning in &outcome.warnings {
        display_boundary_warning(warning);
    }

    display_commit_analysis(&outcome.commits, &outcome.branch, outcome.kind);
    let version = outcome.version.to_string();
    display_version_change(outcome.previous_tag.as_deref(), &version);

    match &outcome.action {
        ReleaseAction::Previewed { preview } => display_preview(preview),
        ReleaseAction::DryRun { rendered } => {
            display_status("Dry run, the changelog would receive:");
            display_preview(rendered);
        }
        ReleaseAction::Released {
            changelog,
            manifests,
            commit,
        } => {
            display_success(&format!("Updated {}", changelog.display()));
            for manifest in manifests {
                display_success(&format!("Bumped {} to {}", manifest.display(), version));
            }
            display_success(&format!("Committed release {} as {}", version, commit));
        }
    }
}
