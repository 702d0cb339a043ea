//! Test harness for treescribe integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A temporary directory fixture with an isolated home directory.
///
/// `HOME` is pointed inside the fixture when the binary runs, so the config
/// store writes its defaults into the temp dir instead of the real home.
pub struct TestTree {
    dir: TempDir,
    home: TempDir,
}

impl TestTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
            home: TempDir::new().expect("Failed to create temp home"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Create a file, including parent directories.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create an empty directory, including parents.
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

pub fn run_treescribe(tree: &TestTree, args: &[&str]) -> (String, String, bool) {
    let binary = env!("CARGO_BIN_EXE_treescribe");
    let output = Command::new(binary)
        .args(args)
        .current_dir(tree.path())
        .env("HOME", tree.home())
        .output()
        .expect("Failed to run treescribe");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_creates_temp_dir() {
        let tree = TestTree::new();
        assert!(tree.path().exists());
        assert!(tree.home().exists());
    }

    #[test]
    fn test_harness_add_file() {
        let tree = TestTree::new();
        let file_path = tree.add_file("src/main.rs", "fn main() {}");
        assert!(file_path.exists());
    }
}
