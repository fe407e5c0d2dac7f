//! Filesystem effects used by the pruner, kept behind a trait so tests can swap in a double.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

pub trait ExampleFs {
    /// Entry names of `dir`, in the order the platform lists them.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// True for any entry at `path`, including a dangling symlink.
    fn exists(&self, path: &Path) -> bool;

    /// Remove `path` and everything beneath it. Symlinks are removed, not followed.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsFs;

impl ExampleFs for OsFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect()
    }

    fn exists(&self, path: &Path) -> bool {
        fs::symlink_metadata(path).is_ok()
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        if fs::symlink_metadata(path)?.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("prune-examples-fsops-{label}-{ts}"));
        dir
    }

    #[test]
    fn list_dir_returns_files_and_directories() {
        let root = unique_temp_dir("list");
        fs::create_dir_all(root.join("nested")).unwrap();
        fs::write(root.join("a.c"), "").unwrap();

        let mut names = OsFs.list_dir(&root).unwrap();
        names.sort();
        assert_eq!(names, vec![OsString::from("a.c"), OsString::from("nested")]);

        let _ = fs::remove_dir_all(&root);
    }

    #[test]
    fn list_dir_fails_for_missing_directory() {
        let root = unique_temp_dir("missing");
        let err = OsFs.list_dir(&root).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn remove_all_handles_trees_and_files() {
        let root = unique_temp_dir("remove");
        let tree = root.join("tree");
        fs::create_dir_all(tree.join("main")).unwrap();
        fs::write(tree.join("main").join("main.c"), "int main;").unwrap();
        let file = root.join("stray");
        fs::write(&file, "").unwrap();

        assert!(OsFs.exists(&tree));
        OsFs.remove_all(&tree).unwrap();
        assert!(!OsFs.exists(&tree));

        OsFs.remove_all(&file).unwrap();
        assert!(!OsFs.exists(&file));
        assert!(OsFs.exists(&root));

        let _ = fs::remove_dir_all(&root);
    }

    #[cfg(unix)]
    #[test]
    fn remove_all_does_not_follow_symlinks() {
        let root = unique_temp_dir("symlink");
        let target = root.join("keep");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("data"), "x").unwrap();
        let link = root.join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        OsFs.remove_all(&link).unwrap();
        assert!(!OsFs.exists(&link));
        assert!(target.join("data").exists());

        let dangling = root.join("dangling");
        std::os::unix::fs::symlink(root.join("nowhere"), &dangling).unwrap();
        assert!(OsFs.exists(&dangling));

        let _ = fs::remove_dir_all(&root);
    }
}
