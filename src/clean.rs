//! Comment body cleanup: link markup, HTML entities, emphasis markers, whitespace.

use regex::Regex;
use std::sync::OnceLock;

static LINK_RE: OnceLock<Regex> = OnceLock::new();

fn link_re() -> &'static Regex {
    // [label](http://...) or [label](https://...)
    LINK_RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(https?://[^)]+\)").expect("static link regex"))
}

/// Strip markup artifacts from a raw comment body and collapse whitespace.
///
/// Links and entities are rewritten before whitespace normalization, so any
/// whitespace they expose is collapsed too.
pub fn clean_content(raw: &str) -> String {
    let s = link_re().replace_all(raw, "$1");
    let s = s.replace("&gt;", ">").replace("&lt;", "<");
    let s = s.replace(['`', '*', '~'], "");
    normalize_whitespace(&s)
}

/// Runs of whitespace (newlines included) become one space; ends are trimmed.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
