//! Reply formatting for Telegram delivery.
//!
//! LLM replies arrive as loosely-structured markdown: unvalidated, often
//! with unbalanced markers. Two independent output paths exist:
//!
//! - [`to_telegram_html`] converts the subset Telegram's HTML parse mode
//!   supports (`<b>`, `<i>`, `<code>`, `<pre>`) and escapes everything
//!   else, so the result is always safe to send with HTML parse mode.
//! - [`strip_to_plain`] removes the same markdown constructs without
//!   adding any markup, for delivery with no parse mode at all.
//!
//! Both functions are pure, never fail, and degrade gracefully: markers
//! that do not form a recognized construct are left in the text as-is.

mod html;
mod plain;
mod scan;

pub use html::to_telegram_html;
pub use plain::strip_to_plain;

/// Escape the characters Telegram's HTML parse mode treats as markup.
///
/// Without this, text like `D < 0` is taken for a tag and the API rejects
/// the message with a 400.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
