//! Markdown construct finders shared by the HTML and plain-text paths.
//!
//! Each finder returns the non-overlapping matches of one construct as
//! byte ranges into the input, scanning left to right. The HTML path wraps
//! the inner range in a tag; the plain path splices the inner range back
//! in place of the full span.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// One recognized markdown construct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Markup {
    /// Full extent of the construct, delimiters included.
    pub span: Range<usize>,
    /// The content between the delimiters.
    pub inner: Range<usize>,
}

/// Fenced code block: triple backtick, optional language tag (ignored),
/// content up to the next triple backtick or end of input.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\w*\n?(.*?)(?:```|$)").expect("fence pattern compiles"));

/// Inline code span: single backtick pair, no backtick inside.
static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`]+)`").expect("inline code pattern compiles"));

/// Bold with doubled stars; non-greedy, may span newlines.
static BOLD_STARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.+?)\*\*").expect("bold star pattern compiles"));

/// Bold with doubled underscores; non-greedy, may span newlines.
static BOLD_UNDERSCORES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)__(.+?)__").expect("bold underscore pattern compiles"));

/// Heading line: one or two `#` at line start, then spaces, then content.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,2}[ \t]+(.+)$").expect("heading pattern compiles"));

pub(crate) fn fenced_blocks(text: &str) -> Vec<Markup> {
    regex_markup(&FENCE, text)
}

pub(crate) fn inline_code(text: &str) -> Vec<Markup> {
    regex_markup(&INLINE_CODE, text)
}

pub(crate) fn bold_stars(text: &str) -> Vec<Markup> {
    regex_markup(&BOLD_STARS, text)
}

pub(crate) fn bold_underscores(text: &str) -> Vec<Markup> {
    regex_markup(&BOLD_UNDERSCORES, text)
}

/// Heading lines. A match at offset zero only counts when the text itself
/// begins at a line start (`starts_line`); spans that begin mid-line after
/// an extracted construct must not grow a heading there.
pub(crate) fn headings(text: &str, starts_line: bool) -> Vec<Markup> {
    regex_markup(&HEADING, text)
        .into_iter()
        .filter(|mark| starts_line || mark.span.start != 0)
        .collect()
}

fn regex_markup(pattern: &Regex, text: &str) -> Vec<Markup> {
    pattern
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.range();
            let inner = caps.get(1)?.range();
            Some(Markup { span, inner })
        })
        .collect()
}

/// Single-delimiter emphasis (`*text*` or `_text_`) with word-boundary
/// guards: the character before the opening delimiter and the character
/// after the closing delimiter must not be word characters, so markers
/// embedded in identifiers like `snake_case_name` never match.
///
/// The regex crate has no lookaround, and a plain captured-context regex
/// cannot resume correctly after a rejected candidate, so this is a manual
/// scan. A closing candidate that fails the boundary check is skipped and
/// the search continues, which lets the content itself contain the
/// delimiter (`_a_b_` matches with content `a_b`).
pub(crate) fn single_emphasis(text: &str, delim: char) -> Vec<Markup> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let delim_len = delim.len_utf8();
    let mut found = Vec::new();

    let mut i = 0_usize;
    while i < chars.len() {
        if chars[i].1 != delim || !boundary_before(&chars, i) {
            i = i.saturating_add(1);
            continue;
        }

        let mut close = None;
        let mut j = i.saturating_add(2);
        while j < chars.len() {
            if chars[j].1 == delim && boundary_after(&chars, j) {
                close = Some(j);
                break;
            }
            j = j.saturating_add(1);
        }

        let Some(close) = close else {
            i = i.saturating_add(1);
            continue;
        };

        let span_start = chars[i].0;
        let inner_start = span_start.saturating_add(delim_len);
        let inner_end = chars[close].0;
        let span_end = inner_end.saturating_add(delim_len);
        found.push(Markup {
            span: span_start..span_end,
            inner: inner_start..inner_end,
        });
        i = close.saturating_add(1);
    }

    found
}

/// True when the character before `idx` is absent or not a word character.
fn boundary_before(chars: &[(usize, char)], idx: usize) -> bool {
    match idx.checked_sub(1).and_then(|prev| chars.get(prev)) {
        Some(&(_, c)) => !is_word(c),
        None => true,
    }
}

/// True when the character after `idx` is absent or not a word character.
fn boundary_after(chars: &[(usize, char)], idx: usize) -> bool {
    match chars.get(idx.saturating_add(1)) {
        Some(&(_, c)) => !is_word(c),
        None => true,
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}
