use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Extension scanned when no config overrides it.
pub const DEFAULT_EXTENSION: &str = "lua";

/// Normalized parameter string meaning "unknown or arbitrary parameters".
pub const VARIADIC: &str = "...";

/// First line of every generated stub file.
pub const META_HEADER: &str = "---@meta";

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE_NAME: &str = ".luastub.toml";

// ---------------------------------------------------------------------------
// Scan configuration
// ---------------------------------------------------------------------------

/// Runtime configuration for file discovery. Loaded from `.luastub.toml` or defaults.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// File extensions to include (without the leading dot).
    pub extensions: HashSet<String>,
    /// Directory names pruned during the walk.
    pub skip_dirs: HashSet<String>,
}

impl ScanConfig {
    pub fn new() -> Self {
        Self {
            extensions: [DEFAULT_EXTENSION].iter().map(|s| s.to_string()).collect(),
            skip_dirs: HashSet::new(),
        }
    }

    /// Whether a file extension is one we scan. Matching is case-sensitive.
    pub fn accepts_extension(&self, ext: &str) -> bool {
        self.extensions.contains(ext)
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Signatures
// ---------------------------------------------------------------------------

/// How a function is qualified in source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureKind {
    /// `function foo()` / `foo = function()`
    Global,
    /// `function T.foo()` / `T.foo = function()`
    DotMethod,
    /// `function T:foo()`, receiver is implicit
    ColonMethod,
}

/// A single extracted function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub kind: SignatureKind,
    /// Namespace (table) name for dot/colon methods, `None` for globals.
    pub namespace: Option<String>,
    pub name: String,
    /// Normalized parameter string (already passed through `normalize_params`).
    pub params: String,
}

impl Signature {
    pub fn global(name: &str, params: String) -> Self {
        Self { kind: SignatureKind::Global, namespace: None, name: name.to_string(), params }
    }

    pub fn dot(namespace: &str, name: &str, params: String) -> Self {
        Self {
            kind: SignatureKind::DotMethod,
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
            params,
        }
    }

    pub fn colon(namespace: &str, name: &str, params: String) -> Self {
        Self {
            kind: SignatureKind::ColonMethod,
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
            params,
        }
    }

    /// Qualified key used for deduplication: `foo`, `T.foo` or `T:foo`.
    pub fn key(&self) -> String {
        match (&self.namespace, self.kind) {
            (Some(ns), SignatureKind::DotMethod) => format!("{ns}.{}", self.name),
            (Some(ns), SignatureKind::ColonMethod) => format!("{ns}:{}", self.name),
            _ => self.name.clone(),
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.key(), self.params)
    }
}

/// Everything the extractor found in one stripped source text.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Signatures in recognizer order, then source order within a recognizer.
    pub signatures: Vec<Signature>,
    /// Namespaces seen as the qualifier of any dot/colon signature.
    pub namespaces: BTreeSet<String>,
}

impl Extraction {
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub(crate) fn push(&mut self, sig: Signature) {
        if let Some(ns) = &sig.namespace {
            self.namespaces.insert(ns.clone());
        }
        self.signatures.push(sig);
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Counts reported after a stub file has been written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StubSummary {
    pub output: String,
    pub files_scanned: usize,
    pub files_skipped: usize,
    pub globals: usize,
    pub dot_methods: usize,
    pub colon_methods: usize,
    pub namespaces: usize,
}

impl fmt::Display for StubSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Wrote {} with {} globals, {} dot-methods, {} colon-methods.",
            self.output, self.globals, self.dot_methods, self.colon_methods
        )
    }
}
