// ---------------------------------------------------------------------------
// Stub emission: LuaLS `---@meta` declaration file
// ---------------------------------------------------------------------------

use crate::aggregate::StubIndex;
use crate::error::{Result, StubError};
use crate::types::*;
use std::fs;
use std::path::Path;

/// Render the index as a stub file.
///
/// Layout, each section sorted by key:
/// 1. `---@meta`
/// 2. `---@class T` / `T = T` for every namespace
/// 3. `function name(params) end` for globals
/// 4. `function T.name(params) end` for dot-methods
/// 5. `function T:name(params) end` for colon-methods
pub fn render_stubs(index: &StubIndex) -> String {
    let mut out = String::new();
    out.push_str(META_HEADER);
    out.push('\n');

    // Declaring the table lets the language server treat `T` as a known class
    // without asserting any fields on it.
    for ns in index.namespaces() {
        out.push_str(&format!("---@class {ns}\n{ns} = {ns}\n"));
    }

    for (name, params) in index.globals() {
        out.push_str(&format!("function {name}({params}) end\n"));
    }

    for (key, params) in index.dot_methods() {
        out.push_str(&format!("function {key}({params}) end\n"));
    }

    for (key, params) in index.colon_methods() {
        // `self` is implied by the colon, so never spell out an empty list.
        let params = match params.trim() {
            "" | VARIADIC => VARIADIC,
            _ => params.as_str(),
        };
        out.push_str(&format!("function {key}({params}) end\n"));
    }

    out
}

/// Write `text` to `path`, creating parent directories and replacing any
/// existing file. Both failures are fatal.
pub fn write_stub_file(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StubError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, text).map_err(|source| StubError::Write { path: path.to_path_buf(), source })
}
