//! Markdown stripping tests for the plain-text delivery path.

use straylight::format::strip_to_plain;

#[test]
fn strips_bold_italic_and_code() {
    assert_eq!(
        strip_to_plain("**bold** and *italic* and `code`"),
        "bold and italic and code"
    );
}

#[test]
fn strips_fence_delimiters_keeping_content() {
    assert_eq!(
        strip_to_plain("```rust\nfn main() {}\n```"),
        "fn main() {}\n"
    );
}

#[test]
fn strips_heading_markers() {
    assert_eq!(strip_to_plain("## Title\nBody"), "Title\nBody");
}

#[test]
fn strips_double_underscore_bold() {
    assert_eq!(strip_to_plain("__x__"), "x");
}

#[test]
fn comparison_operators_stay_literal() {
    // Plain delivery has no parse mode, so raw operators are exactly
    // what the user should see — no entities, no stand-ins.
    assert_eq!(strip_to_plain("D < 0 and D > 0"), "D < 0 and D > 0");
}

#[test]
fn snake_case_is_untouched() {
    assert_eq!(strip_to_plain("snake_case_name"), "snake_case_name");
}

#[test]
fn unterminated_fence_strips_to_end_of_input() {
    assert_eq!(strip_to_plain("```python\ncode"), "code");
}

#[test]
fn empty_and_whitespace_input_yield_empty_output() {
    assert_eq!(strip_to_plain(""), "");
    assert_eq!(strip_to_plain(" \t \n"), "");
}

#[test]
fn mixed_constructs_strip_together() {
    assert_eq!(strip_to_plain("# H\n`a` **b** _c_"), "H\na b c");
}

#[test]
fn unmatched_markers_are_left_literal() {
    assert_eq!(strip_to_plain("**oops"), "**oops");
    assert_eq!(strip_to_plain("a ` b"), "a ` b");
}
