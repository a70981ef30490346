// Startup checks run before the server binds
use anyhow::{bail, Context};
use std::path::Path;

/// Fail unless `dir` exists and can be listed
pub fn ensure_directory(dir: &Path, purpose: &str) -> anyhow::Result<()> {
    if let Err(e) = std::fs::read_dir(dir) {
        bail!(
            "Unable to find '{}' directory to {}: {}",
            dir.display(),
            purpose,
            e
        );
    }
    Ok(())
}

/// Approximate number of dashboard files: every entry in the data directory,
/// minus the ignore list when it was found there.
pub fn count_dashboard_files(
    data_dir: &Path,
    ignore_list: &Path,
    ignore_list_found: bool,
) -> anyhow::Result<usize> {
    let entries = std::fs::read_dir(data_dir).with_context(|| {
        format!(
            "Unable to find '{}' directory to read dashboard files",
            data_dir.display()
        )
    })?;
    let count = entries.count();

    let ignore_list_in_data_dir =
        ignore_list_found && ignore_list.parent().is_some_and(|p| same_dir(p, data_dir));
    if ignore_list_in_data_dir {
        Ok(count.saturating_sub(1))
    } else {
        Ok(count)
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempdir().expect("tempdir");
        let err = ensure_directory(&dir.path().join("app"), "serve web app").unwrap_err();
        assert!(err.to_string().contains("Unable to find"));

        assert!(ensure_directory(dir.path(), "serve web app").is_ok());
    }

    #[test]
    fn test_count_subtracts_ignore_list_in_data_dir() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("a.json"), "{}").unwrap();
        std::fs::write(dir.path().join("deleted_b.json"), "{}").unwrap();
        let ignore = dir.path().join("ros_ignore_list.txt");
        std::fs::write(&ignore, "/rosout\n").unwrap();

        assert_eq!(count_dashboard_files(dir.path(), &ignore, true).unwrap(), 2);
        assert_eq!(count_dashboard_files(dir.path(), &ignore, false).unwrap(), 3);
    }

    #[test]
    fn test_count_keeps_entries_when_ignore_list_elsewhere() {
        let data = tempdir().expect("tempdir");
        let other = tempdir().expect("tempdir");
        std::fs::write(data.path().join("a.json"), "{}").unwrap();
        let ignore = other.path().join("ros_ignore_list.txt");
        std::fs::write(&ignore, "/rosout\n").unwrap();

        assert_eq!(count_dashboard_files(data.path(), &ignore, true).unwrap(), 1);
    }

    #[test]
    fn test_count_missing_data_dir_fails() {
        let dir = tempdir().expect("tempdir");
        assert!(count_dashboard_files(&dir.path().join("data"), &dir.path().join("x"), false).is_err());
    }
}
