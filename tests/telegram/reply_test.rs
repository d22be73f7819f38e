//! Reply rendering and apology selection tests.

use straylight::config::DeliveryMode;
use straylight::providers::ProviderError;
use straylight::telegram::reply::{apology_for, render, APOLOGY_BILLING, APOLOGY_GENERIC};

#[test]
fn html_mode_converts_markdown() {
    let rendered = render("**hi**", DeliveryMode::Html);
    assert_eq!(rendered.text, "<b>hi</b>");
    assert!(rendered.html);
}

#[test]
fn plain_mode_strips_markdown() {
    let rendered = render("**hi**", DeliveryMode::Plain);
    assert_eq!(rendered.text, "hi");
    assert!(!rendered.html);
}

#[test]
fn default_delivery_mode_is_plain() {
    assert_eq!(DeliveryMode::default(), DeliveryMode::Plain);
}

#[test]
fn generic_failure_gets_generic_apology() {
    assert_eq!(
        apology_for("provider request failed: connection reset by peer"),
        APOLOGY_GENERIC
    );
}

#[test]
fn balance_phrase_gets_billing_apology() {
    assert_eq!(
        apology_for("provider returned non-success status 400: Insufficient Balance"),
        APOLOGY_BILLING
    );
}

#[test]
fn payment_required_status_gets_billing_apology() {
    let err = ProviderError::HttpStatus {
        status: 402,
        body: "Payment Required".to_owned(),
    };
    assert_eq!(apology_for(&err.to_string()), APOLOGY_BILLING);
}

#[test]
fn parse_failure_gets_generic_apology() {
    let err = ProviderError::Parse("missing choices[0]".to_owned());
    assert_eq!(apology_for(&err.to_string()), APOLOGY_GENERIC);
}
