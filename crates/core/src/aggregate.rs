//! Cross-file signature index with first-seen-wins deduplication.

use crate::types::*;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::debug;

/// Deduplicated signatures from every scanned file.
///
/// Keys are unique and never overwritten: the first definition of a name wins
/// even if a later file declares different parameters. `BTreeMap` keeps keys
/// sorted so emission order does not depend on scan order.
#[derive(Debug, Clone, Default)]
pub struct StubIndex {
    globals: BTreeMap<String, String>,
    dot_methods: BTreeMap<String, String>,
    colon_methods: BTreeMap<String, String>,
    namespaces: BTreeSet<String>,
}

impl StubIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one signature. Returns `false` if its key was already present.
    pub fn insert(&mut self, sig: &Signature) -> bool {
        if let Some(ns) = &sig.namespace {
            self.namespaces.insert(ns.clone());
        }

        let map = match sig.kind {
            SignatureKind::Global => &mut self.globals,
            SignatureKind::DotMethod => &mut self.dot_methods,
            SignatureKind::ColonMethod => &mut self.colon_methods,
        };

        match map.entry(sig.key()) {
            Entry::Vacant(slot) => {
                slot.insert(sig.params.clone());
                true
            }
            Entry::Occupied(existing) => {
                if existing.get() != &sig.params {
                    debug!(
                        key = existing.key().as_str(),
                        kept = existing.get().as_str(),
                        ignored = sig.params.as_str(),
                        "Duplicate definition ignored"
                    );
                }
                false
            }
        }
    }

    /// Merge one file's extraction. Returns how many new keys were recorded.
    pub fn merge(&mut self, extraction: Extraction) -> usize {
        extraction.signatures.iter().filter(|sig| self.insert(sig)).count()
    }

    /// `name -> params`, sorted by name.
    pub fn globals(&self) -> &BTreeMap<String, String> {
        &self.globals
    }

    /// `"T.name" -> params`, sorted by key.
    pub fn dot_methods(&self) -> &BTreeMap<String, String> {
        &self.dot_methods
    }

    /// `"T:name" -> params`, sorted by key.
    pub fn colon_methods(&self) -> &BTreeMap<String, String> {
        &self.colon_methods
    }

    pub fn namespaces(&self) -> &BTreeSet<String> {
        &self.namespaces
    }

    /// True when no signature of any kind has been recorded.
    pub fn is_empty(&self) -> bool {
        self.globals.is_empty() && self.dot_methods.is_empty() && self.colon_methods.is_empty()
    }

    /// Build the run summary for a stub file written to `output`.
    pub fn summary(&self, output: &Path, files_scanned: usize, files_skipped: usize) -> StubSummary {
        StubSummary {
            output: output.display().to_string(),
            files_scanned,
            files_skipped,
            globals: self.globals.len(),
            dot_methods: self.dot_methods.len(),
            colon_methods: self.colon_methods.len(),
            namespaces: self.namespaces.len(),
        }
    }
}
