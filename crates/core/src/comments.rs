//! Lua comment removal.
//!
//! Two passes: long comments (`--[[ ... ]]`, `--[==[ ... ]==]`) first, then
//! line comments (`--` to end of line). There is no string-literal awareness,
//! so a `--` inside a string truncates the rest of that line. Known limitation.

use regex::Regex;
use std::sync::OnceLock;

static LINE_COMMENT: OnceLock<Regex> = OnceLock::new();

fn line_comment_re() -> &'static Regex {
    LINE_COMMENT.get_or_init(|| Regex::new(r"--.*").expect("line comment regex"))
}

/// Remove every comment from `src`. Text outside comments, including the
/// newline that ends a line comment, is kept byte-for-byte.
pub fn strip_comments(src: &str) -> String {
    let without_long = strip_long_comments(src);
    line_comment_re().replace_all(&without_long, "").into_owned()
}

/// Remove long comments. The closing bracket must carry the same number of
/// `=` as the opener; the shortest such body wins. An opener with no matching
/// close is left for the line-comment pass.
fn strip_long_comments(src: &str) -> String {
    let bytes = src.as_bytes();
    let mut out = String::with_capacity(src.len());
    let mut copied = 0;
    let mut cursor = 0;

    while let Some(offset) = src[cursor..].find("--[") {
        let open = cursor + offset;
        let mut level_end = open + 3;
        while level_end < bytes.len() && bytes[level_end] == b'=' {
            level_end += 1;
        }

        if level_end < bytes.len() && bytes[level_end] == b'[' {
            let body = level_end + 1;
            let close = format!("]{}]", "=".repeat(level_end - open - 3));
            if let Some(len) = src[body..].find(&close) {
                out.push_str(&src[copied..open]);
                copied = body + len + close.len();
                cursor = copied;
                continue;
            }
        }

        cursor = open + 1;
    }

    out.push_str(&src[copied..]);
    out
}
