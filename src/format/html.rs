//! Markdown → Telegram HTML conversion.
//!
//! The pipeline rewrites a span list instead of substituting placeholder
//! strings into one big buffer: every recognized construct becomes an
//! [`Span::Html`] span that later passes cannot see, so emitted tags can
//! never be mangled by a later stage, and there is no reserved placeholder
//! token to collide with message content.
//!
//! Pass order is load-bearing: code regions are extracted before emphasis
//! so markers inside code stay literal, emphasis runs before the escape of
//! the remaining text, and angle-entity humanization runs last over the
//! assembled output.

use super::escape_html;
use super::scan::{self, Markup};

/// Stand-in for `>` (U+203A). Telegram's HTML renderer does not decode
/// `&gt;` back into a visible glyph, so comparison operators are shown as
/// this character instead of entity text.
const HUMAN_GT: &str = "\u{203A}";

/// Stand-in for `<` (U+2039).
const HUMAN_LT: &str = "\u{2039}";

/// A segment of the working text.
enum Span {
    /// Markdown text still subject to later passes.
    Text {
        /// The text itself.
        body: String,
        /// Whether the segment begins at a line start in the original
        /// message; heading detection at offset zero depends on it.
        starts_line: bool,
    },
    /// Finished HTML, opaque to every later pass.
    Html(String),
}

/// Convert a raw LLM reply into Telegram-safe HTML.
///
/// Recognizes fenced code blocks, inline code, bold (`**`/`__`), italic
/// (`*`/`_` at word boundaries), and `#`/`##` heading lines; escapes all
/// remaining `&`, `<`, `>`; then replaces angle-bracket entities with
/// `‹`/`›`. Never fails: unmatched markers are left in the text, and an
/// empty or whitespace-only input yields an empty string.
pub fn to_telegram_html(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut spans = vec![Span::Text {
        body: trimmed.to_owned(),
        starts_line: true,
    }];

    spans = rewrite(
        spans,
        |text, _| scan::fenced_blocks(text),
        |inner| format!("<pre>{}</pre>", escape_html(inner)),
    );
    spans = rewrite(
        spans,
        |text, _| scan::inline_code(text),
        |inner| format!("<code>{}</code>", escape_html(inner)),
    );
    spans = rewrite(
        spans,
        |text, _| scan::bold_stars(text),
        |inner| format!("<b>{}</b>", escape_html(inner)),
    );
    spans = rewrite(
        spans,
        |text, _| scan::bold_underscores(text),
        |inner| format!("<b>{}</b>", escape_html(inner)),
    );
    spans = rewrite(
        spans,
        |text, _| scan::single_emphasis(text, '*'),
        |inner| format!("<i>{}</i>", escape_html(inner)),
    );
    spans = rewrite(
        spans,
        |text, _| scan::single_emphasis(text, '_'),
        |inner| format!("<i>{}</i>", escape_html(inner)),
    );
    spans = rewrite(spans, scan::headings, |inner| {
        format!("<b>{}</b>", escape_html(inner.trim()))
    });

    let mut out = String::new();
    for span in spans {
        match span {
            Span::Text { body, .. } => out.push_str(&escape_html(&body)),
            Span::Html(markup) => out.push_str(&markup),
        }
    }

    humanize_angle_entities(&out)
}

/// Run one pass over the span list: find a construct in every remaining
/// text span and replace each match with rendered HTML, splitting the
/// text span around it.
fn rewrite<F, R>(spans: Vec<Span>, find: F, render: R) -> Vec<Span>
where
    F: Fn(&str, bool) -> Vec<Markup>,
    R: Fn(&str) -> String,
{
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        let (body, starts_line) = match span {
            Span::Html(markup) => {
                out.push(Span::Html(markup));
                continue;
            }
            Span::Text { body, starts_line } => (body, starts_line),
        };

        let marks = find(&body, starts_line);
        if marks.is_empty() {
            out.push(Span::Text { body, starts_line });
            continue;
        }

        let mut cursor = 0_usize;
        let mut at_line_start = starts_line;
        for mark in marks {
            if mark.span.start > cursor {
                out.push(Span::Text {
                    body: body[cursor..mark.span.start].to_owned(),
                    starts_line: at_line_start,
                });
            }
            out.push(Span::Html(render(&body[mark.inner.clone()])));
            cursor = mark.span.end;
            at_line_start = body[..cursor].ends_with('\n');
        }
        if cursor < body.len() {
            out.push(Span::Text {
                body: body[cursor..].to_owned(),
                starts_line: at_line_start,
            });
        }
    }
    out
}

/// Replace angle-bracket entities with visually similar characters.
///
/// The double-escaped forms come first: input that already contained
/// literal entity text (`&gt;`) picks up an extra `&amp;` during the
/// escape pass and must still end up as a single stand-in character.
fn humanize_angle_entities(text: &str) -> String {
    text.replace("&amp;gt;", HUMAN_GT)
        .replace("&amp;lt;", HUMAN_LT)
        .replace("&gt;", HUMAN_GT)
        .replace("&lt;", HUMAN_LT)
}
