use crate::error::{Result, StubError};
use crate::types::*;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// File discovery
// ---------------------------------------------------------------------------

fn has_source_extension(path: &Path, config: &ScanConfig) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| config.accepts_extension(ext))
}

/// Walk one directory in lexicographic order, returning every source file.
///
/// Standard filters (gitignore, hidden files) are off so nothing is silently
/// dropped; only `skip_dirs` prunes the walk. Symlinked directories are not
/// descended into, but a symlink that resolves to a file is scanned.
fn walk_dir_sorted(dir: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let skip = config.skip_dirs.clone();
    let mut files = Vec::new();

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| {
            if entry.depth() > 0 && entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !skip.contains(name.as_ref());
            }
            true
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                warn!(dir = %dir.display(), error = %err, "Walk error, continuing");
                continue;
            }
        };
        let is_file = match entry.file_type() {
            Some(ft) if ft.is_symlink() => entry.path().is_file(),
            Some(ft) => ft.is_file(),
            None => false,
        };
        if !is_file {
            continue;
        }
        if has_source_extension(entry.path(), config) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Expand the command-line inputs into the ordered list of files to scan.
///
/// Inputs are handled in the order given; directories are walked recursively
/// in file-name order, so the result is the same on every run. A file reached
/// through two inputs is kept once, at its first position. Missing inputs and
/// files with the wrong extension are logged and skipped.
pub fn discover_files(inputs: &[PathBuf], config: &ScanConfig) -> Vec<PathBuf> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut files = Vec::new();

    let mut push = |path: PathBuf| {
        let canonical = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if seen.insert(canonical) {
            files.push(path);
        } else {
            debug!(path = %path.display(), "Already queued, skipping duplicate");
        }
    };

    for input in inputs {
        if input.is_dir() {
            let found = walk_dir_sorted(input, config);
            debug!(dir = %input.display(), files = found.len(), "Walked directory");
            for path in found {
                push(path);
            }
        } else if input.is_file() {
            if has_source_extension(input, config) {
                push(input.clone());
            } else {
                warn!(path = %input.display(), "Not a source file, skipping");
            }
        } else {
            warn!(path = %input.display(), "Input not found, skipping");
        }
    }

    files
}

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// Read a source file, dropping byte sequences that are not valid UTF-8 so a
/// stray Latin-1 byte never aborts a file or splits an identifier.
/// An I/O failure is a recoverable [`StubError::Read`].
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| StubError::Read { path: path.to_path_buf(), source })?;
    Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect())
}
