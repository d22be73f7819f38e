//! Slash command handler and dispatch tests.

use straylight::telegram::{commands, dispatch_command};

#[test]
fn help_lists_all_commands() {
    let help = commands::handle_help();
    assert!(help.contains("/start"));
    assert!(help.contains("/help"));
    assert!(help.contains("/ask"));
    assert!(help.contains("/about"));
}

#[test]
fn start_points_to_help() {
    assert!(commands::handle_start().contains("/help"));
}

#[test]
fn unknown_command_echoes_the_name() {
    let reply = commands::handle_unknown("frobnicate");
    assert!(reply.contains("/frobnicate"));
    assert!(reply.contains("/help"));
}

#[test]
fn dispatch_routes_known_commands() {
    assert_eq!(dispatch_command("start"), commands::handle_start());
    assert_eq!(dispatch_command("help"), commands::handle_help());
    assert_eq!(dispatch_command("ask"), commands::handle_ask());
    assert_eq!(dispatch_command("about"), commands::handle_about());
}

#[test]
fn dispatch_strips_bot_mention_suffix() {
    assert_eq!(
        dispatch_command("help@straylight_bot"),
        commands::handle_help()
    );
}

#[test]
fn dispatch_ignores_trailing_arguments() {
    assert_eq!(dispatch_command("help me please"), commands::handle_help());
}

#[test]
fn dispatch_falls_back_on_unknown_command() {
    assert!(dispatch_command("weather").contains("Unknown command: /weather"));
}
