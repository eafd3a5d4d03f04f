//! Scratch directories for orgtree-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory tree that is removed on drop.
pub struct TestDir {
    /// The temporary root.
    root: TempDir,
}

impl TestDir {
    /// Creates an empty scratch tree.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// The top of the tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory, and its parents, below the top of the tree.
    pub fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Writes an empty chart (`[]`) at `rel_path`.
    pub fn create_file(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "[]").unwrap();
        path
    }

    /// Writes a `.orgtree.toml` holding `content` in `rel_dir`; `""` is the top.
    pub fn write_config(&self, rel_dir: &str, content: &str) -> PathBuf {
        let config = self.create_dir(rel_dir).join(CONFIG_FILENAME);
        fs::write(&config, content).unwrap();
        config
    }
}
