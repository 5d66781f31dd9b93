//! Finds route files under a directory.

use crate::error::{CliError, CliResult};
use route_guard_core::ROUTE_FILE_NAMES;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Collects every `route.ts` / `route.js` below `dir`, sorted.
///
/// Returned paths are relative to `root` when `dir` lies inside it, so that
/// console output matches the built-in list's style.
pub fn discover_route_files(root: &Path, dir: &Path) -> CliResult<Vec<PathBuf>> {
    let base = root.join(dir);
    if !base.is_dir() {
        return Err(CliError::General(format!(
            "Discovery directory not found: {:?}",
            base
        )));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(&base)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|name| ROUTE_FILE_NAMES.contains(&name))
        })
        .map(|e| {
            e.path()
                .strip_prefix(root)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| e.path().to_path_buf())
        })
        .collect();

    files.sort();
    tracing::debug!(count = files.len(), dir = %base.display(), "discovered route files");
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_discovers_route_files_only() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        for rel in [
            "app/api/users/route.ts",
            "app/api/buyers/[id]/route.ts",
            "app/api/legacy/route.js",
            "app/api/users/helpers.ts",
        ] {
            let path = root.join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "").unwrap();
        }

        let files = discover_route_files(root, Path::new("app")).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("app/api/buyers/[id]/route.ts"),
                PathBuf::from("app/api/legacy/route.js"),
                PathBuf::from("app/api/users/route.ts"),
            ]
        );
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempdir().unwrap();
        assert!(discover_route_files(dir.path(), Path::new("nope")).is_err());
    }
}
