//! Version-string substitution in project files.
//!
//! Each patcher performs an exact-pattern replacement on the first matching
//! occurrence and rewrites the file only when something actually changed.
//! Missing files are skipped, not errors: not every repository variant has
//! every file.

use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// What happened to a single patch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The version declaration was rewritten.
    Updated,
    /// The file does not exist; skipped.
    Missing,
    /// The file carries a template placeholder and must not be hand-edited.
    Templated,
    /// The file exists but no version declaration matched; left untouched.
    NoMatch,
}

impl PatchOutcome {
    pub fn is_updated(&self) -> bool {
        matches!(self, PatchOutcome::Updated)
    }
}

fn pattern(re: &str) -> Result<Regex> {
    Regex::new(re).map_err(|e| ReleaseError::config(format!("invalid patch pattern: {}", e)))
}

/// Rewrites a `version = "..."` declaration in the manifest file.
pub fn patch_manifest(path: &Path, plain_version: &str) -> Result<PatchOutcome> {
    if !path.is_file() {
        return Ok(PatchOutcome::Missing);
    }
    let content = fs::read_to_string(path)?;

    let re = pattern(r#"(?m)^(\s*version\s*=\s*")[^"]*""#)?;
    apply(path, &content, &re, |caps: &regex::Captures| {
        format!("{}{}\"", &caps[1], plain_version)
    })
}

/// Rewrites a `__version__ = '...'` declaration in the package's version
/// module, preserving whichever quote character the file uses.
pub fn patch_version_module(path: &Path, plain_version: &str) -> Result<PatchOutcome> {
    if !path.is_file() {
        return Ok(PatchOutcome::Missing);
    }
    let content = fs::read_to_string(path)?;

    let re = pattern(r#"(?m)^(__version__\s*=\s*)(['"])[^'"]*['"]"#)?;
    apply(path, &content, &re, |caps: &regex::Captures| {
        format!("{}{}{}{}", &caps[1], &caps[2], plain_version, &caps[2])
    })
}

/// Rewrites the expected literal in the version-assertion test, preserving
/// indentation.
///
/// A file containing `template_marker` is generated from a project template;
/// patching it would corrupt the placeholder, so it is left byte-identical.
pub fn patch_version_test(
    path: &Path,
    plain_version: &str,
    template_marker: &str,
) -> Result<PatchOutcome> {
    if !path.is_file() {
        return Ok(PatchOutcome::Missing);
    }
    let content = fs::read_to_string(path)?;

    if !template_marker.is_empty() && content.contains(template_marker) {
        return Ok(PatchOutcome::Templated);
    }

    let re = pattern(r#"(?m)^(\s*assert\s+__version__\s*==\s*)(['"])[^'"]*['"]"#)?;
    apply(path, &content, &re, |caps: &regex::Captures| {
        format!("{}{}{}{}", &caps[1], &caps[2], plain_version, &caps[2])
    })
}

/// Replaces the first match of `re` in `content` and writes the file back
/// if the replacement changed anything.
fn apply(
    path: &Path,
    content: &str,
    re: &Regex,
    replacement: impl Fn(&regex::Captures) -> String,
) -> Result<PatchOutcome> {
    if !re.is_match(content) {
        return Ok(PatchOutcome::NoMatch);
    }

    let updated = re.replace(content, |caps: &regex::Captures| replacement(caps));
    if updated == content {
        // Declaration already carries the new version
        return Ok(PatchOutcome::Updated);
    }

    fs::write(path, updated.as_bytes())?;
    Ok(PatchOutcome::Updated)
}
