//! Locates the package's version-module file under the source root.

use crate::error::{ReleaseError, Result};
use std::path::{Path, PathBuf};

/// Directory names under the source root that can never be the package.
fn is_cache_dir(name: &str) -> bool {
    name == "__pycache__" || name.starts_with('.') || name.ends_with(".egg-info")
}

/// Resolves the package's `__init__.py` path by scanning the source root.
///
/// A missing source root, or a source root with no candidate package
/// directory, resolves to `None` (the version-module patch is skipped).
/// Two or more candidates is an error: picking one arbitrarily would patch
/// the wrong package silently.
///
/// # Arguments
/// * `repo_path` - Repository root
/// * `source_root` - Source directory name relative to the root (e.g. "src")
///
/// # Returns
/// * `Ok(Some(path))` - Path to the single candidate's `__init__.py`
/// * `Ok(None)` - No source root or no candidate directory
/// * `Err` - Ambiguous layout (multiple candidates) or scan failure
pub fn resolve_version_module(repo_path: &Path, source_root: &str) -> Result<Option<PathBuf>> {
    let root = repo_path.join(source_root);
    if !root.is_dir() {
        return Ok(None);
    }

    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(&root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if is_cache_dir(&name) {
            continue;
        }
        candidates.push(entry.path());
    }

    // Deterministic order for the ambiguity diagnostic
    candidates.sort();

    match candidates.len() {
        0 => Ok(None),
        1 => Ok(Some(candidates.remove(0).join("__init__.py"))),
        _ => {
            let names: Vec<String> = candidates
                .iter()
                .filter_map(|p| p.file_name())
                .map(|n| n.to_string_lossy().into_owned())
                .collect();
            Err(ReleaseError::layout(format!(
                "Expected exactly one package directory under '{}', found {}: {}",
                root.display(),
                names.len(),
                names.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_single_package_resolved() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/mypkg")).unwrap();

        let module = resolve_version_module(tmp.path(), "src").unwrap();
        assert_eq!(module, Some(tmp.path().join("src/mypkg/__init__.py")));
    }

    #[test]
    fn test_cache_dirs_excluded() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/mypkg")).unwrap();
        fs::create_dir_all(tmp.path().join("src/__pycache__")).unwrap();
        fs::create_dir_all(tmp.path().join("src/.mypy_cache")).unwrap();
        fs::create_dir_all(tmp.path().join("src/mypkg.egg-info")).unwrap();

        let module = resolve_version_module(tmp.path(), "src").unwrap();
        assert_eq!(module, Some(tmp.path().join("src/mypkg/__init__.py")));
    }

    #[test]
    fn test_missing_source_root_is_none() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_version_module(tmp.path(), "src").unwrap(), None);
    }

    #[test]
    fn test_empty_source_root_is_none() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        assert_eq!(resolve_version_module(tmp.path(), "src").unwrap(), None);
    }

    #[test]
    fn test_files_under_source_root_ignored() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/mypkg")).unwrap();
        fs::write(tmp.path().join("src/conftest.py"), "").unwrap();

        let module = resolve_version_module(tmp.path(), "src").unwrap();
        assert_eq!(module, Some(tmp.path().join("src/mypkg/__init__.py")));
    }

    #[test]
    fn test_multiple_packages_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("src/alpha")).unwrap();
        fs::create_dir_all(tmp.path().join("src/beta")).unwrap();

        let err = resolve_version_module(tmp.path(), "src").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("alpha"));
        assert!(msg.contains("beta"));
        assert!(msg.contains("exactly one"));
    }
}
