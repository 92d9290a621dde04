//! Test harness for stub generation integration tests.
//!
//! Builds throwaway Lua source trees in temp dirs, either from checked-in
//! fixtures or file by file, and runs the full pipeline against them.

use luastub_core::{generate, ScanConfig, StubSummary};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct LuaTree {
    pub root: PathBuf,
    _temp_dir: TempDir,
}

impl LuaTree {
    /// An empty tree.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        LuaTree { root: temp_dir.path().to_path_buf(), _temp_dir: temp_dir }
    }

    /// A tree holding a copy of `tests/fixtures/<name>`.
    pub fn from_fixture(name: &str) -> Self {
        let src = fixture_path(name);
        assert!(src.exists(), "Fixture '{name}' not found at {}", src.display());
        let tree = Self::new();
        copy_dir_recursive(&src, &tree.root.join("src"));
        tree
    }

    /// Write a file relative to the tree root, creating parents.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).expect("Failed to create dir");
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Run the pipeline with default config, writing to `out/<out_name>`.
    /// Returns the stub text and the summary.
    pub fn generate(&self, inputs: &[PathBuf], out_name: &str) -> (String, StubSummary) {
        let out = self.root.join("out").join(out_name);
        let summary =
            generate(inputs, &out, &ScanConfig::default()).expect("Stub generation failed");
        let text = std::fs::read_to_string(&out).expect("Stub file missing");
        (text, summary)
    }
}

pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

/// Recursively copy a directory tree. Preserves file contents but not metadata.
pub fn copy_dir_recursive(src: &Path, dst: &Path) {
    if !dst.exists() {
        std::fs::create_dir_all(dst).expect("Failed to create dir");
    }
    for entry in std::fs::read_dir(src).expect("Failed to read dir") {
        let entry = entry.expect("Failed to read entry");
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path);
        } else {
            std::fs::copy(&src_path, &dst_path).expect("Failed to copy file");
        }
    }
}
