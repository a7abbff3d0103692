//! Text rendering of a [Changelog]: the Markdown section written to the
//! changelog file and the plain-text preview printed on develop.

use crate::domain::{Changelog, Commit};

fn commit_link(repo_url: &str, commit: &Commit) -> String {
    format!("[{hash}]({repo_url}/commit/{hash})", hash = commit.hash)
}

fn subject(commit: &Commit) -> &str {
    commit.subject.as_deref().unwrap_or_default()
}

fn release_line(repo_url: &str, commit: &Commit) -> String {
    let scope = commit
        .scope
        .as_deref()
        .map(|scope| format!("- {}", scope))
        .unwrap_or_default();

    format!(
        "* **{} {}**: {} ({})  \n",
        commit.kind().unwrap_or_default(),
        scope,
        subject(commit),
        commit_link(repo_url, commit)
    )
}

fn merge_line(repo_url: &str, commit: &Commit) -> String {
    format!(
        "* {} ({})  \n",
        subject(commit),
        commit_link(repo_url, commit)
    )
}

fn bugfix_line(repo_url: &str, commit: &Commit) -> String {
    let scope = commit
        .scope
        .as_deref()
        .map(|scope| format!("**{}**:", scope))
        .unwrap_or_default();

    format!(
        "* {} {} ({})  \n",
        scope,
        subject(commit),
        commit_link(repo_url, commit)
    )
}

/// Render the Markdown section prepended to the changelog file
pub fn render_changelog(changelog: &Changelog) -> String {
    let url = changelog.repo_url.as_str();
    let release: String = changelog.release.iter().map(|c| release_line(url, c)).collect();
    let merges: String = changelog.merges.iter().map(|c| merge_line(url, c)).collect();
    let bugfixes: String = changelog.bugfixes.iter().map(|c| bugfix_line(url, c)).collect();

    format!(
        "{header}\n\
         ## {version} ({date})\n\
         \n\
         ### Release commits\n\
         \n\
         {release}\n\
         \n\
         \n\
         ### Features Merged\n\
         \n\
         {merges}\n\
         \n\
         \n\
         ### Bug Fixes\n\
         \n\
         {bugfixes}\n\
         \n\
         ___\n",
        header = changelog.header,
        version = changelog.version,
        date = changelog.date,
    )
}

fn preview_line(commit: &Commit) -> String {
    let scope = commit
        .scope
        .as_deref()
        .map(|scope| format!("{} -> ", scope))
        .unwrap_or_default();

    format!("{}{} ({})", scope, subject(commit), commit.hash)
}

fn preview_lines(commits: &[Commit]) -> String {
    commits
        .iter()
        .map(preview_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the plain-text console preview, without links
pub fn render_preview(changelog: &Changelog) -> String {
    let merges = changelog
        .merges
        .iter()
        .map(|c| format!("{} ({})", subject(c), c.hash))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n\n### Features Merged\n{}\n\n\n### Features\n{}\n\n\n### Bug Fixes\n{}\n\n",
        merges,
        preview_lines(&changelog.features),
        preview_lines(&changelog.bugfixes),
    )
}
