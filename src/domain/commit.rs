use regex::Regex;

use crate::error::{ChangelogError, Result};

/// Header prefix git writes when merging a feature branch
const FEATURE_MERGE_MARKER: &str = "Merge branch 'feature/";

/// Title given to notes produced by the `!` header marker
const BREAKING_NOTE_TITLE: &str = "BREAKING CHANGE";

/// A note attached to a commit, such as a `BREAKING CHANGE:` footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub text: String,
}

/// The commit a revert commit undoes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Revert {
    pub header: String,
    pub hash: String,
}

/// One parsed log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub r#type: Option<String>,
    pub scope: Option<String>,
    pub subject: Option<String>,
    pub header: String,
    pub body: Option<String>,
    pub notes: Vec<Note>,
    pub revert: Option<Revert>,
}

impl Commit {
    /// The commit type, if the header followed the grammar
    pub fn kind(&self) -> Option<&str> {
        self.r#type.as_deref()
    }

    pub fn is_fix(&self) -> bool {
        self.kind() == Some("fix")
    }

    pub fn is_feature(&self) -> bool {
        self.kind() == Some("feat")
    }

    pub fn is_merge(&self) -> bool {
        self.kind() == Some("merge")
    }

    /// A commit warrants a major bump when its type carries the `!` marker
    /// or it has a breaking-change note
    pub fn is_major(&self) -> bool {
        self.kind().is_some_and(|t| t.contains('!')) || !self.notes.is_empty()
    }
}

/// Conventional-commit grammar applied to `<short-hash> <message>` log entries
pub struct CommitParser {
    header: Regex,
    revert: Regex,
    breaking_keywords: Vec<String>,
}

impl CommitParser {
    /// Create a parser recognising the given breaking-change keywords
    pub fn new(breaking_keywords: Vec<String>) -> Result<Self> {
        let header = Regex::new(r"^(\w{7,}) ?(\w*)(?:\((.*)\))?(!)?: (.*)$")
            .map_err(|e| ChangelogError::parse(e.to_string()))?;
        let revert =
            Regex::new(r#"(?i)^revert:?\s"?([\S\s]+?)"?\s*this reverts commit (\w*)\."#)
                .map_err(|e| ChangelogError::parse(e.to_string()))?;

        Ok(CommitParser {
            header,
            revert,
            breaking_keywords,
        })
    }

    /// Create a parser with the stock `BREAKING CHANGE` / `BREAKING-CHANGE` keywords
    pub fn with_default_keywords() -> Result<Self> {
        Self::new(vec![
            BREAKING_NOTE_TITLE.to_string(),
            "BREAKING-CHANGE".to_string(),
        ])
    }

    /// Parse a commit given its short hash and full message
    pub fn parse(&self, hash: &str, message: &str) -> Result<Commit> {
        self.parse_log_entry(&format!("{} {}", hash, message))
    }

    /// Parse one raw log entry formatted as `<short-hash> <full-message>`
    pub fn parse_log_entry(&self, entry: &str) -> Result<Commit> {
        let (hash, message) = match entry.split_once(' ') {
            Some((hash, message)) => (hash, message),
            None => (entry.trim_end(), ""),
        };
        if hash.is_empty() || hash.contains('\n') {
            return Err(ChangelogError::parse(format!(
                "log entry has no commit hash: {:?}",
                entry
            )));
        }

        let mut lines = entry.lines();
        let header = lines.next().unwrap_or_default().to_string();
        let body = Self::body_of(lines);

        let mut commit = Commit {
            hash: hash.to_string(),
            r#type: None,
            scope: None,
            subject: None,
            header,
            body,
            notes: Vec::new(),
            revert: None,
        };

        if let Some(captures) = self.header.captures(&commit.header) {
            commit.r#type = captures
                .get(2)
                .map(|m| m.as_str().to_string())
                .filter(|t| !t.is_empty());
            commit.scope = captures
                .get(3)
                .map(|m| m.as_str().to_string())
                .filter(|s| !s.is_empty());
            commit.subject = captures.get(5).map(|m| m.as_str().to_string());

            if captures.get(4).is_some() {
                commit.notes.push(Note {
                    title: BREAKING_NOTE_TITLE.to_string(),
                    text: commit.subject.clone().unwrap_or_default(),
                });
            }
        }

        if let Some(body) = &commit.body {
            commit.notes.extend(self.notes_in(body));
        }

        if let Some(captures) = self.revert.captures(message) {
            commit.revert = Some(Revert {
                header: captures
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                hash: captures
                    .get(2)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            });
        }

        if commit.header.contains(FEATURE_MERGE_MARKER) {
            Self::apply_feature_merge(&mut commit);
        }

        Ok(commit)
    }

    fn body_of<'a>(lines: impl Iterator<Item = &'a str>) -> Option<String> {
        let body = lines.collect::<Vec<_>>().join("\n");
        let body = body.trim_matches('\n');
        if body.trim().is_empty() {
            None
        } else {
            Some(body.to_string())
        }
    }

    fn notes_in(&self, body: &str) -> Vec<Note> {
        let mut notes = Vec::new();
        for line in body.lines() {
            let keyword = self
                .breaking_keywords
                .iter()
                .find(|keyword| line.contains(keyword.as_str()));

            if let Some(keyword) = keyword {
                let text = line
                    .split_once(&format!("{}:", keyword))
                    .map(|(_, rest)| rest.trim())
                    .unwrap_or_else(|| line.trim());
                notes.push(Note {
                    title: keyword.clone(),
                    text: text.to_string(),
                });
            }
        }
        notes
    }

    // Feature merges are recorded by branch name rather than by header grammar.
    fn apply_feature_merge(commit: &mut Commit) {
        let start = commit
            .header
            .find(FEATURE_MERGE_MARKER)
            .map(|i| i + FEATURE_MERGE_MARKER.len())
            .unwrap_or(commit.header.len());
        let rest = &commit.header[start..];
        let end = rest
            .find("' into develop")
            .or_else(|| rest.find('\''))
            .unwrap_or(rest.len());

        commit.hash = commit.header.chars().take(7).collect();
        commit.r#type = Some("merge".to_string());
        commit.scope = None;
        commit.subject = Some(rest[..end].to_string());
    }
}
