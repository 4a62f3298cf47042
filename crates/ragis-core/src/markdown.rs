//! Markdown-like highlighting for assistant responses.
//!
//! A single-pass, stateless transform turning a constrained markdown subset
//! plus a few heuristic patterns (list markers, labeled fields, ISO dates,
//! Windows paths) into inline HTML. Rule order matters: later rules never
//! re-match text already wrapped by earlier ones, though nested wrapping of
//! overlapping spans (a date inside a bold run) is tolerated.
//!
//! Trust boundary: only assistant-sourced text may pass through
//! [`highlight`]. User and system text always goes through [`escape`] -
//! enforced at the call site by [`render_message`]. The rules themselves
//! only ever wrap substrings of the input in a fixed tag; no attribute or
//! tag content is ever interpolated from the input.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::chat::Sender;

static BOLD_STARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static BOLD_UNDERSCORES: Lazy<Regex> = Lazy::new(|| Regex::new(r"__(.+?)__").unwrap());
// List markers like "1. " at the start of a token
static ORDINAL_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)(\d+\.)\s").unwrap());
// "Oggetto:", "Data:" - requires a lowercase run so drive letters are left
// for the path rule below
static LABEL_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z][a-z]+:)").unwrap());
static ISO_DATE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").unwrap());
static WINDOWS_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Za-z]:\\[^\s<>*_]+)").unwrap());

/// Turns assistant text into trusted inline HTML.
///
/// Empty input returns an empty string. The output is limited to
/// `<strong>` wrappers around matched substrings and `<br>` line breaks.
pub fn highlight(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = BOLD_STARS.replace_all(raw, "<strong>$1</strong>");
    let text = BOLD_UNDERSCORES.replace_all(&text, "<strong>$1</strong>");
    let text = ORDINAL_MARKER.replace_all(&text, "$1<strong>$2</strong> ");
    let text = LABEL_TOKEN.replace_all(&text, "<strong>$1</strong>");
    let text = ISO_DATE.replace_all(&text, "<strong>$1</strong>");
    let text = WINDOWS_PATH.replace_all(&text, "<strong>$1</strong>");

    text.replace('\n', "<br>")
}

/// Escapes text for literal display inside HTML.
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Renders one message bubble's inner HTML.
///
/// Only text produced by the trusted backend path is allowed to carry
/// generated markup; everything else is escaped verbatim.
pub fn render_message(sender: Sender, text: &str) -> String {
    match sender {
        Sender::Assistant => highlight(text),
        Sender::User | Sender::System => escape(text),
    }
}
