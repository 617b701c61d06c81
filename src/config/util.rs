//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`
///
/// Walks up parent directories until finding `config_name`.
/// An absolute `config_name` is only checked as-is.
///
/// # Example
/// ```text
/// /home/user/scans/2024/    ← start
/// /home/user/png2svg.toml   ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_finds_config_in_ancestor() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("png2svg.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("png2svg.toml")).unwrap();
        assert_eq!(found, dir.path().join("png2svg.toml"));
    }

    #[test]
    fn test_nearest_config_wins() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("png2svg.toml"), "").unwrap();
        fs::write(nested.join("png2svg.toml"), "").unwrap();

        let found = find_config_file(&nested, Path::new("png2svg.toml")).unwrap();
        assert_eq!(found, nested.join("png2svg.toml"));
    }

    #[test]
    fn test_directory_named_like_config_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("png2svg.toml")).unwrap();

        assert_ne!(
            find_config_file(dir.path(), Path::new("png2svg.toml")),
            Some(dir.path().join("png2svg.toml"))
        );
    }

    #[test]
    fn test_absolute_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        assert_eq!(find_config_file(Path::new("/"), &path), None);

        fs::write(&path, "").unwrap();
        assert_eq!(find_config_file(Path::new("/"), &path), Some(path));
    }
}
