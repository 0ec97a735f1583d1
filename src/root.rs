use crate::error::PickerError;
use std::path::{Path, PathBuf};

/// Directory (or file, for worktrees) that marks a repository root.
pub const ROOT_MARKER: &str = ".git";

/// Resolve the project root.
///
/// An explicit root wins and is returned as-is; whether it actually holds a
/// `docs/` tree is checked later by the scanner. Without one, `start` and its
/// ancestors are searched for [`ROOT_MARKER`].
pub fn resolve_project_root(
    explicit: Option<&Path>,
    start: &Path,
) -> Result<PathBuf, PickerError> {
    if let Some(root) = explicit {
        tracing::debug!(root = %root.display(), "using explicit project root");
        return Ok(root.to_path_buf());
    }

    for candidate in start.ancestors() {
        if candidate.join(ROOT_MARKER).exists() {
            tracing::debug!(root = %candidate.display(), "found {} marker", ROOT_MARKER);
            return Ok(candidate.to_path_buf());
        }
    }

    tracing::warn!(start = %start.display(), "no {} marker in any ancestor", ROOT_MARKER);
    Err(PickerError::RootNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_root_is_returned_unchecked() {
        let missing = Path::new("/definitely/not/here");
        let root = resolve_project_root(Some(missing), Path::new("/")).unwrap();
        assert_eq!(root, missing);
    }

    #[test]
    fn finds_marker_in_an_ancestor() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let nested = tmp.path().join("src").join("deep");
        fs::create_dir_all(&nested).unwrap();

        let root = resolve_project_root(None, &nested).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn nearest_marker_wins() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        let inner = tmp.path().join("vendor").join("lib");
        fs::create_dir_all(inner.join(".git")).unwrap();

        let root = resolve_project_root(None, &inner).unwrap();
        assert_eq!(root, inner);
    }

    #[test]
    fn marker_file_counts_for_worktrees() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".git"), "gitdir: /elsewhere\n").unwrap();

        let root = resolve_project_root(None, tmp.path()).unwrap();
        assert_eq!(root, tmp.path());
    }

    #[test]
    fn missing_marker_names_the_override_variable() {
        let tmp = tempfile::tempdir().unwrap();
        // Skip when the temp dir happens to live inside a repository.
        if tmp.path().ancestors().any(|p| p.join(ROOT_MARKER).exists()) {
            return;
        }

        let err = resolve_project_root(None, tmp.path()).unwrap_err();
        assert!(matches!(err, PickerError::RootNotFound));
        assert!(err.is_configuration());
        assert!(err.to_string().contains("PROJECT_ROOT"));
    }
}
