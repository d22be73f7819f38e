//! Outbound reply composition: delivery-mode dispatch and failure apologies.

use crate::config::DeliveryMode;
use crate::format;

/// Apology sent when the AI call fails for any reason.
pub const APOLOGY_GENERIC: &str =
    "Sorry, I couldn't reach the AI service. Please try again later.";

/// Apology sent when the failure looks like an exhausted API balance.
pub const APOLOGY_BILLING: &str =
    "The AI service is unavailable right now: the API balance has run out. \
     The bot owner needs to top up the provider account.";

/// A reply ready to hand to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReply {
    /// Message body.
    pub text: String,
    /// Whether to send with HTML parse mode.
    pub html: bool,
}

/// Render a raw LLM reply for the configured delivery mode.
pub fn render(raw: &str, mode: DeliveryMode) -> RenderedReply {
    match mode {
        DeliveryMode::Html => RenderedReply {
            text: format::to_telegram_html(raw),
            html: true,
        },
        DeliveryMode::Plain => RenderedReply {
            text: format::strip_to_plain(raw),
            html: false,
        },
    }
}

/// Select the user-facing apology for an AI failure description.
///
/// Substring match on the error text: the wire format carries no
/// structured code for balance exhaustion, so the known phrase and the
/// bare 402 status are matched literally. Brittle across provider
/// wording changes, but the worst case is the generic apology.
pub fn apology_for(detail: &str) -> &'static str {
    if detail.contains("Insufficient Balance") || detail.contains("402") {
        APOLOGY_BILLING
    } else {
        APOLOGY_GENERIC
    }
}
