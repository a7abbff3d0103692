//! Pure formatting functions for UI output.
//!
//! Everything here only prints; nothing reads from the terminal.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::{BranchKind, Commit};

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().bold(), warning);
}

/// Shorten a commit header for list display, on a char boundary
pub fn truncate_header(header: &str, max_chars: usize) -> String {
    match header.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &header[..idx]),
        None => header.to_string(),
    }
}

/// Display the commits a version was computed from.
///
/// Shows at most 10 headers; the remainder is summarized as a count.
pub fn display_commit_analysis(commits: &[Commit], branch: &str, kind: BranchKind) {
    println!(
        "\n{}",
        style(format!("Analyzing {} branch '{}'", kind, branch)).bold()
    );
    println!(
        "{}",
        style(format!("{} commits since the last tag:", commits.len())).underlined()
    );

    for (i, commit) in commits.iter().take(10).enumerate() {
        println!("  {}. {}", i + 1, truncate_header(&commit.header, 60));
    }

    if commits.len() > 10 {
        println!("  ... and {} more commits", commits.len() - 10);
    }
}

/// Display the version transition computed for this run.
pub fn display_version_change(previous: Option<&str>, version: &str) {
    println!("\n{}", style("Version:").bold());
    match previous {
        Some(previous) => {
            println!("  From: {}", style(previous).red());
            println!("  To:   {}", style(version).green().bold());
        }
        None => {
            println!("  Initial: {}", style(version).green().bold());
        }
    }
}

/// Print the develop-branch preview as rendered.
pub fn display_preview(preview: &str) {
    print!("{}", preview);
}
