// ---------------------------------------------------------------------------
// Signature extraction: pattern recognizers over comment-stripped Lua
// ---------------------------------------------------------------------------
//
// This is a heuristic, not a parser. Five independent line-anchored patterns
// recognize the function definition shapes below; anything they miss is
// simply not stubbed.
//
//   function foo(a, b)           global
//   function T.foo(a, b)         dot-method
//   function T:foo(a, b)         colon-method (implicit self)
//   foo = function(a, b)         global assignment
//   T.foo = function(a, b)       dot-method assignment

use crate::types::*;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Characters inspected before a global match when looking for `local`.
pub const LOCAL_WINDOW_CHARS: usize = 20;

/// Keyword that makes a declaration non-global.
const LOCAL_KEYWORD: &str = "local";

struct Recognizers {
    global: Regex,
    dot: Regex,
    colon: Regex,
    assign_global: Regex,
    assign_dot: Regex,
}

static RECOGNIZERS: OnceLock<Recognizers> = OnceLock::new();

fn recognizers() -> &'static Recognizers {
    RECOGNIZERS.get_or_init(|| Recognizers {
        global: Regex::new(r"(?m)^\s*function\s+([A-Za-z_]\w*)\s*\(([^)]*)\)")
            .expect("global function regex"),
        dot: Regex::new(r"(?m)^\s*function\s+([A-Za-z_]\w*)\.(\w+)\s*\(([^)]*)\)")
            .expect("dot function regex"),
        colon: Regex::new(r"(?m)^\s*function\s+([A-Za-z_]\w*):(\w+)\s*\(([^)]*)\)")
            .expect("colon function regex"),
        assign_global: Regex::new(r"(?m)^\s*([A-Za-z_]\w*)\s*=\s*function\s*\(([^)]*)\)")
            .expect("global assignment regex"),
        assign_dot: Regex::new(r"(?m)^\s*([A-Za-z_]\w*)\.(\w+)\s*=\s*function\s*\(([^)]*)\)")
            .expect("dot assignment regex"),
    })
}

/// Normalize a raw parameter list for stub output.
///
/// Empty lists, `...`, a lone `self` (any case) and a lone `_` all collapse to
/// the variadic marker. Everything else is trimmed and kept verbatim.
pub fn normalize_params(raw: &str) -> String {
    let params = raw.trim();
    if params.is_empty()
        || params == VARIADIC
        || params.eq_ignore_ascii_case("self")
        || params == "_"
    {
        VARIADIC.to_string()
    } else {
        params.to_string()
    }
}

/// True when the text right before `start` ends with `local`, ignoring
/// trailing whitespace. Only the last [`LOCAL_WINDOW_CHARS`] characters are
/// looked at, so a distant `local` is missed.
fn preceded_by_local(text: &str, start: usize) -> bool {
    let before = &text[..start];
    let from = before
        .char_indices()
        .rev()
        .nth(LOCAL_WINDOW_CHARS - 1)
        .map_or(0, |(i, _)| i);
    before[from..].trim_end().ends_with(LOCAL_KEYWORD)
}

fn match_start(caps: &Captures) -> usize {
    caps.get(0).map_or(0, |m| m.start())
}

/// Run every recognizer over comment-stripped source.
///
/// Recognizers run in a fixed order (colon, dot, global, dot assignment,
/// global assignment) so that first-seen-wins dedup downstream is stable
/// within a file. Never fails: malformed input just yields fewer signatures.
pub fn extract_signatures(text: &str) -> Extraction {
    let r = recognizers();
    let mut out = Extraction::default();

    for caps in r.colon.captures_iter(text) {
        out.push(Signature::colon(&caps[1], &caps[2], normalize_params(&caps[3])));
    }

    for caps in r.dot.captures_iter(text) {
        out.push(Signature::dot(&caps[1], &caps[2], normalize_params(&caps[3])));
    }

    for caps in r.global.captures_iter(text) {
        if preceded_by_local(text, match_start(&caps)) {
            continue;
        }
        out.push(Signature::global(&caps[1], normalize_params(&caps[2])));
    }

    for caps in r.assign_dot.captures_iter(text) {
        out.push(Signature::dot(&caps[1], &caps[2], normalize_params(&caps[3])));
    }

    for caps in r.assign_global.captures_iter(text) {
        if preceded_by_local(text, match_start(&caps)) {
            continue;
        }
        out.push(Signature::global(&caps[1], normalize_params(&caps[2])));
    }

    out
}
