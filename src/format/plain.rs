//! Markdown stripping for plain-text delivery.
//!
//! When a client sends with no parse mode, Telegram displays the message
//! body verbatim, so `D < 0` needs no entity encoding; the markdown
//! markers just have to go.

use super::scan::{self, Markup};

/// Remove markdown syntax from a raw LLM reply, keeping the content.
///
/// Strips fenced code delimiters, inline code delimiters, bold and italic
/// markers, and heading markers; the inner text of each construct stays.
/// Never fails; an empty or whitespace-only input yields an empty string.
pub fn strip_to_plain(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let text = splice_inner(trimmed, &scan::fenced_blocks(trimmed));
    let text = splice_inner(&text, &scan::inline_code(&text));
    let text = splice_inner(&text, &scan::bold_stars(&text));
    let text = splice_inner(&text, &scan::bold_underscores(&text));
    let text = splice_inner(&text, &scan::single_emphasis(&text, '*'));
    let text = splice_inner(&text, &scan::single_emphasis(&text, '_'));
    splice_inner(&text, &scan::headings(&text, true))
}

/// Replace each matched construct with its inner text.
fn splice_inner(text: &str, marks: &[Markup]) -> String {
    if marks.is_empty() {
        return text.to_owned();
    }
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0_usize;
    for mark in marks {
        out.push_str(&text[cursor..mark.span.start]);
        out.push_str(&text[mark.inner.clone()]);
        cursor = mark.span.end;
    }
    out.push_str(&text[cursor..]);
    out
}
