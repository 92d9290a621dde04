//! luastub: LuaLS stub generation from a tree of Lua sources.
//!
//! Scans `.lua` files, recognizes top-level function definitions with a small
//! set of text patterns, and writes a single `---@meta` declaration file that
//! lua-language-server can use for completion and diagnostics.
//!
//! # Modules
//!
//! - [`comments`]: Long and line comment removal
//! - [`extract`]: The five function-definition recognizers and `local` filter
//! - [`aggregate`]: Cross-file index with first-seen-wins deduplication
//! - [`emit`]: Deterministic stub rendering and output writing
//! - [`scan`]: Input expansion and lossy file reading
//! - [`types`]: Shared types and constants
//! - [`error`]: Recoverable vs. fatal errors

pub mod aggregate;
pub mod comments;
pub mod emit;
pub mod error;
pub mod extract;
pub mod scan;
pub mod types;

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};

pub use aggregate::StubIndex;
pub use comments::strip_comments;
pub use emit::{render_stubs, write_stub_file};
pub use error::{Result, StubError};
pub use extract::{extract_signatures, normalize_params};
pub use scan::{discover_files, read_source};
pub use types::*;

// ---------------------------------------------------------------------------
// .luastub.toml config loading
// ---------------------------------------------------------------------------

/// Known keys in `.luastub.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] = &["extensions", "skip_dirs"];

/// Largest edit distance at which an unknown key still gets a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Levenshtein distance over chars, one rolling row.
fn edit_distance(a: &str, b: &str) -> usize {
    let target: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=target.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in target.iter().enumerate() {
            let substitution = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = substitution.min(row[j] + 1).min(diagonal + 1);
        }
    }
    row[target.len()]
}

/// Closest known config key to a misspelled one, if any is near enough.
fn suggest_config_key(key: &str) -> Option<&'static str> {
    KNOWN_CONFIG_KEYS
        .iter()
        .map(|known| (edit_distance(key, known), *known))
        .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, known)| known)
}

fn string_array(table: &toml::Table, key: &str) -> Option<Vec<String>> {
    let value = table.get(key)?;
    match value.as_array() {
        Some(items) => Some(items.iter().filter_map(|v| v.as_str().map(|s| s.to_string())).collect()),
        None => {
            warn!(key, "Expected an array of strings in {CONFIG_FILE_NAME}, ignoring");
            None
        }
    }
}

/// Parse config text into a [`ScanConfig`], starting from defaults.
///
/// Unknown keys trigger a warning with a typo suggestion; they never fail
/// the parse. Only malformed TOML is an error.
pub fn parse_config(content: &str) -> std::result::Result<ScanConfig, String> {
    let table = content.parse::<toml::Table>().map_err(|e| e.to_string())?;
    let mut config = ScanConfig::new();

    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        match suggest_config_key(key) {
            Some(suggestion) => {
                warn!(
                    key = key.as_str(),
                    suggestion,
                    "Unknown key in {CONFIG_FILE_NAME}, did you mean '{suggestion}'?"
                );
            }
            None => {
                warn!(
                    key = key.as_str(),
                    "Unknown key in {CONFIG_FILE_NAME} (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }

    // extensions: replace defaults, tolerate a leading dot
    if let Some(exts) = string_array(&table, "extensions") {
        config.extensions = exts.iter().map(|e| e.trim_start_matches('.').to_string()).collect();
    }

    // skip_dirs
    if let Some(dirs) = string_array(&table, "skip_dirs") {
        config.skip_dirs.extend(dirs);
    }

    Ok(config)
}

/// Load scan configuration.
///
/// An `explicit` path must exist and parse, otherwise the run aborts. Without
/// one, `.luastub.toml` in `search_dir` is used if present; a broken implicit
/// file only warns and defaults apply.
pub fn load_config(explicit: Option<&Path>, search_dir: &Path) -> Result<ScanConfig> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Loading config");
        let content = std::fs::read_to_string(path).map_err(|e| StubError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        return parse_config(&content)
            .map_err(|message| StubError::Config { path: path.to_path_buf(), message });
    }

    let implicit = search_dir.join(CONFIG_FILE_NAME);
    if !implicit.is_file() {
        return Ok(ScanConfig::new());
    }

    debug!(path = %implicit.display(), "Loading config");
    let parsed = std::fs::read_to_string(&implicit)
        .map_err(|e| e.to_string())
        .and_then(|content| parse_config(&content));
    match parsed {
        Ok(config) => Ok(config),
        Err(message) => {
            warn!(path = %implicit.display(), error = message.as_str(), "Ignoring unreadable config");
            Ok(ScanConfig::new())
        }
    }
}

// ---------------------------------------------------------------------------
// Full pipeline
// ---------------------------------------------------------------------------

/// Strip comments and extract signatures from one file's text.
pub fn extract_from_source(src: &str) -> Extraction {
    extract_signatures(&strip_comments(src))
}

/// Build the index for an ordered list of files.
///
/// Files are processed strictly in order, which is what decides first-seen-
/// wins. Unreadable files are skipped and counted; any other error aborts.
pub fn index_files(files: &[PathBuf]) -> Result<(StubIndex, usize)> {
    let mut index = StubIndex::new();
    let mut skipped = 0;

    for path in files {
        match read_source(path) {
            Ok(src) => {
                let extraction = extract_from_source(&src);
                let found = extraction.signatures.len();
                let added = index.merge(extraction);
                debug!(path = %path.display(), found, added, "Extracted signatures");
            }
            Err(e) if e.is_recoverable() => {
                warn!(error = %e, "Skipping file");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok((index, skipped))
}

/// Discover, extract, render and write: the whole run.
///
/// Returns the counts for the summary line. Only output failures are fatal.
pub fn generate(inputs: &[PathBuf], out: &Path, config: &ScanConfig) -> Result<StubSummary> {
    info!(inputs = inputs.len(), out = %out.display(), "Scanning for Lua sources");
    let start = Instant::now();

    let files = discover_files(inputs, config);
    let (index, skipped) = index_files(&files)?;
    if index.is_empty() {
        warn!(files = files.len(), "No function definitions found, writing header only");
    }
    write_stub_file(out, &render_stubs(&index))?;

    let summary = index.summary(out, files.len() - skipped, skipped);
    info!(
        files = summary.files_scanned,
        skipped = summary.files_skipped,
        globals = summary.globals,
        dot_methods = summary.dot_methods,
        colon_methods = summary.colon_methods,
        namespaces = summary.namespaces,
        time_ms = start.elapsed().as_millis() as u64,
        "Stub file written"
    );
    Ok(summary)
}
