//! Straylight — a Telegram chat bot backed by a hosted LLM.
//!
//! Incoming text messages are relayed to an AI provider and the reply is
//! sent back to the chat, either converted to Telegram's HTML subset or
//! stripped to plain text. The interesting part lives in [`format`]: a
//! span-pipeline markdown transcoder that cannot emit invalid markup.
//!
//! See `DESIGN.md` for architecture notes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod format;
pub mod logging;
pub mod providers;
pub mod telegram;
