use crate::error::Result;
use crate::options::MODULE_NAME;
use crate::paths::normalize_path;
use ignore::WalkBuilder;
use std::path::Path;
use tracing::warn;

/// One-shot recursive enumeration of the directories under the source root.
///
/// Returns normalized absolute paths, sorted, excluding the root itself,
/// dependency folders and hidden directories. Finding nothing is a warning,
/// not an error; the generator proceeds with an empty working set.
pub fn scan_directories(full_path: &Path, deep: bool, depth: usize) -> Result<Vec<String>> {
    let max_depth = if deep { depth } else { 1 };

    let walker = WalkBuilder::new(full_path)
        .max_depth(Some(max_depth))
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .parents(false)
        .filter_entry(|entry| entry.file_name() != "node_modules")
        .sort_by_file_path(|a, b| a.cmp(b))
        .build();

    let mut directories = Vec::new();

    for result in walker {
        match result {
            Ok(entry) => {
                // depth 0 is the source root itself
                if entry.depth() == 0 {
                    continue;
                }
                if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                    directories.push(normalize_path(entry.path()));
                }
            }
            Err(err) => {
                warn!("[{}] - Failed to access entry: {}", MODULE_NAME, err);
            }
        }
    }

    if directories.is_empty() {
        warn!(
            "[{}] - No directories found under {}",
            MODULE_NAME,
            full_path.display()
        );
    }

    Ok(directories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_direct_children() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("components"))?;
        fs::create_dir_all(src.join("utils"))?;
        fs::create_dir_all(src.join("components").join("nested"))?;

        let dirs = scan_directories(&src, false, 1)?;
        assert_eq!(dirs.len(), 2);
        assert!(dirs[0].ends_with("/components"));
        assert!(dirs[1].ends_with("/utils"));
        Ok(())
    }

    #[test]
    fn test_scan_deep() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("components").join("nested"))?;

        let dirs = scan_directories(&src, true, 2)?;
        assert_eq!(dirs.len(), 2);
        assert!(dirs[1].ends_with("/components/nested"));
        Ok(())
    }

    #[test]
    fn test_scan_excludes_node_modules_and_hidden() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("node_modules").join("pkg"))?;
        fs::create_dir_all(src.join(".cache"))?;
        fs::create_dir_all(src.join("utils"))?;

        let dirs = scan_directories(&src, true, 3)?;
        assert_eq!(dirs.len(), 1);
        assert!(dirs[0].ends_with("/utils"));
        Ok(())
    }

    #[test]
    fn test_scan_empty_is_not_fatal() -> Result<()> {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(&src)?;

        let dirs = scan_directories(&src, true, 1)?;
        assert!(dirs.is_empty());
        Ok(())
    }
}
