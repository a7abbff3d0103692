//! File side effects of a release: the changelog and the JSON manifests.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::error::{ChangelogError, Result};

/// Prepend a rendered section to the changelog file.
///
/// Existing content is kept verbatim after the new section; a missing file
/// is created with the new section only.
#[instrument(skip(section), fields(path = %path.display()))]
pub fn write_changelog(path: &Path, section: &str) -> Result<()> {
    let previous = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("changelog does not exist yet, creating it");
            String::new()
        }
        Err(e) => return Err(e.into()),
    };

    let mut content = String::with_capacity(section.len() + previous.len());
    content.push_str(section);
    content.push_str(&previous);
    fs::write(path, content)?;

    info!(bytes = section.len(), "changelog updated");
    Ok(())
}

fn read_manifest(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .map_err(|e| ChangelogError::manifest(format!("cannot read {}: {}", path.display(), e)))?;

    serde_json::from_str(&content)
        .map_err(|e| ChangelogError::manifest(format!("{} is not valid JSON: {}", path.display(), e)))
}

/// Replace the top-level `version` of a JSON manifest.
///
/// Key order and every other field are preserved; the file is rewritten with
/// 2-space indentation and a trailing newline.
#[instrument(fields(path = %path.display()))]
pub fn update_manifest_version(path: &Path, version: &str) -> Result<()> {
    let mut manifest = read_manifest(path)?;

    let object = manifest.as_object_mut().ok_or_else(|| {
        ChangelogError::manifest(format!("{} is not a JSON object", path.display()))
    })?;
    object.insert("version".to_string(), Value::String(version.to_string()));

    let mut content = serde_json::to_string_pretty(&manifest)
        .map_err(|e| ChangelogError::manifest(e.to_string()))?;
    content.push('\n');
    fs::write(path, content)?;

    info!(version, "manifest version updated");
    Ok(())
}

/// Repository URL declared by a manifest's `repository` field.
///
/// Accepts both the string and the `{ "url": ... }` forms and returns a
/// browsable base URL (`git+` prefix and `.git` suffix removed).
pub fn manifest_repo_url(path: &Path) -> Result<Option<String>> {
    let manifest = read_manifest(path)?;

    let url = match manifest.get("repository") {
        Some(Value::String(url)) => Some(url.as_str()),
        Some(Value::Object(repository)) => repository.get("url").and_then(Value::as_str),
        _ => None,
    };

    Ok(url.map(normalize_repo_url))
}

/// Turn a clone URL into the base URL used for commit links
pub fn normalize_repo_url(url: &str) -> String {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);
    url.trim_end_matches('/').to_string()
}
