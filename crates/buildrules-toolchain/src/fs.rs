//! Read-only filesystem probing.
//!
//! Resolution only ever asks two questions of the filesystem: does a
//! directory exist, and what are its immediate subdirectories. Both go through
//! [`DirectoryLister`] so enumeration order can be pinned in tests.

use std::io;
use std::path::{Path, PathBuf};

/// Directory probing used by the locator and resolver.
pub trait DirectoryLister {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate subdirectories of `path`, as full paths, in the order the
    /// underlying enumeration returns them. No sorting is applied.
    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// [`DirectoryLister`] backed by `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for entry in std::fs::read_dir(path)? {
            // Follows symlinks and junctions.
            let path = entry?.path();
            if path.is_dir() {
                dirs.push(path);
            }
        }
        Ok(dirs)
    }
}

impl<L: DirectoryLister + ?Sized> DirectoryLister for &L {
    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        (**self).subdirectories(path)
    }
}

/// In-memory directory tree with a fixed listing order, for tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct FakeTree {
    dirs: std::collections::HashMap<PathBuf, Vec<String>>,
}

#[cfg(test)]
impl FakeTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `path` as a directory whose children are listed in exactly
    /// this order. Each child is registered as an (empty) directory too.
    pub(crate) fn dir(mut self, path: impl Into<PathBuf>, children: &[&str]) -> Self {
        let path = path.into();
        for child in children {
            self.dirs.entry(path.join(child)).or_default();
        }
        self.dirs
            .insert(path, children.iter().map(|c| c.to_string()).collect());
        self
    }
}

#[cfg(test)]
impl DirectoryLister for FakeTree {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.contains_key(path)
    }

    fn subdirectories(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        match self.dirs.get(path) {
            Some(children) => Ok(children.iter().map(|c| path.join(c)).collect()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_lister_lists_only_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("a")).unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("file.txt"), b"x").unwrap();

        let mut subdirs = FsLister.subdirectories(dir.path()).unwrap();
        subdirs.sort();
        assert_eq!(subdirs, vec![dir.path().join("a"), dir.path().join("b")]);
    }

    #[cfg(unix)]
    #[test]
    fn fs_lister_follows_directory_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target");
        std::fs::create_dir(&target).unwrap();
        let listed = dir.path().join("listed");
        std::fs::create_dir(&listed).unwrap();
        std::os::unix::fs::symlink(&target, listed.join("14.29")).unwrap();
        std::os::unix::fs::symlink(target.join("gone"), listed.join("dangling")).unwrap();

        let subdirs = FsLister.subdirectories(&listed).unwrap();
        assert_eq!(subdirs, vec![listed.join("14.29")]);
    }

    #[test]
    fn fs_lister_missing_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(!FsLister.is_dir(&missing));
        assert!(FsLister.subdirectories(&missing).is_err());
    }

    #[test]
    fn fake_tree_keeps_listing_order() {
        let tree = FakeTree::new().dir("/root", &["z", "a", "m"]);
        let names: Vec<_> = tree
            .subdirectories(Path::new("/root"))
            .unwrap()
            .into_iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
        assert!(tree.is_dir(Path::new("/root/a")));
    }
}
