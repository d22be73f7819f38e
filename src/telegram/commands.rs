//! Slash command handlers.
//!
//! Each function returns the response text for one command. Commands are
//! sent without a parse mode, so no escaping is needed here.

/// Greeting for `/start`.
pub fn handle_start() -> String {
    "Hi! I'm Straylight — a bot backed by an AI model. \
     Send me a message or try /help."
        .to_owned()
}

/// Command list for `/help`.
pub fn handle_help() -> String {
    [
        "What I can do:",
        "",
        "/start — start the bot",
        "/help — this help",
        "/ask — how to ask the AI",
        "/about — about this bot",
        "",
        "Just send a plain message and I'll pass it to the AI and send back the reply.",
    ]
    .join("\n")
}

/// Usage hint for `/ask`.
pub fn handle_ask() -> String {
    "Write your question as a regular message (no command needed) — \
     I'll pass it to the AI and send back the reply."
        .to_owned()
}

/// Project blurb for `/about`.
pub fn handle_about() -> String {
    "Straylight — a Telegram bot written in Rust that relays your messages \
     to a hosted AI model (DeepSeek and friends)."
        .to_owned()
}

/// Fallback for unrecognized commands.
pub fn handle_unknown(command: &str) -> String {
    format!("Unknown command: /{command}. Try /help.")
}
