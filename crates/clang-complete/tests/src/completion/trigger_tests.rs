use super::*;

fn end_of(text: &str) -> (u32, u32) {
    let line = text.matches('\n').count() as u32 + 1;
    let last_line = text.rsplit('\n').next().unwrap_or(text);
    (line, last_line.len() as u32 + 1)
}

fn locate(text: &str) -> Option<TriggerToken> {
    let (line, column) = end_of(text);
    find_trigger(text, line, column)
}

#[test]
fn chain_matches_scope_resolution() {
    assert_eq!(match_chain("std::"), Some("std::"));
    assert_eq!(match_chain("boost::program_options::"), Some("boost::program_options::"));
    assert_eq!(match_chain("Object::"), Some("Object::"));
}

#[test]
fn chain_matches_member_access() {
    assert_eq!(match_chain("instance."), Some("instance."));
    assert_eq!(match_chain("instance->"), Some("instance->"));
    assert_eq!(match_chain("instance.method()."), Some("instance.method()."));
    assert_eq!(match_chain("instance.method()->"), Some("instance.method()->"));
    assert_eq!(match_chain("instance.\nmethod()."), Some("instance.\nmethod()."));
}

#[test]
fn chain_restarts_after_statement_punctuation() {
    assert_eq!(match_chain("a.foo(); b."), Some(" b."));
    assert_eq!(match_chain("x = y."), Some(" y."));
}

#[test]
fn chain_rejects_non_access_endings() {
    assert_eq!(match_chain("statement;"), None);
    assert_eq!(match_chain("// comments"), None);
    assert_eq!(match_chain("// comments\n// more comments"), None);
    assert_eq!(match_chain("instance.method()"), None);
}

#[test]
fn locates_simple_scope_trigger() {
    let token = locate("std::").unwrap();
    assert_eq!(token.text, "std::");
    assert_eq!((token.line, token.column), (1, 6));
}

#[test]
fn anchor_moves_left_of_a_mid_identifier_cursor() {
    // Cursor sits after a partially typed member name; the anchor lands
    // right after the operator instead.
    let token = find_trigger("std::str", 1, 9).unwrap();
    assert_eq!(token.text, "std::");
    assert_eq!((token.line, token.column), (1, 6));
}

#[test]
fn multi_line_chain_collapses() {
    let token = locate("instance.\nmethod().").unwrap();
    assert_eq!(token.text, "instance.method().");
    assert_eq!((token.line, token.column), (2, 10));
}

#[test]
fn anchor_is_a_fixed_point() {
    for text in ["std::", "instance.\nmethod().", "  A::B::", "c.bar()."] {
        let (line, column) = end_of(text);
        let first = find_trigger(text, line, column).unwrap();
        let second = find_trigger(text, first.line, first.column).unwrap();
        assert_eq!(first, second, "re-locating at the anchor must reproduce it: {text:?}");
    }
}

#[test]
fn nested_scopes_resolve_to_the_nearest_operator() {
    let text = "  A::B::";
    let token = find_trigger(text, 1, 9).unwrap();
    assert_eq!(token.text, "A::B::");
    assert_eq!((token.line, token.column), (1, 9));

    // Cursor immediately after the first scope operator.
    let token = find_trigger(text, 1, 6).unwrap();
    assert_eq!(token.text, "A::");
    assert_eq!((token.line, token.column), (1, 6));
}

#[test]
fn arrow_trigger_strips_leading_indentation() {
    let token = find_trigger("  t2->mem", 1, 10).unwrap();
    assert_eq!(token.text, "t2->");
    assert_eq!((token.line, token.column), (1, 7));
}

#[test]
fn chain_after_a_statement_on_the_same_line() {
    let token = find_trigger("A::f(); b.", 1, 11).unwrap();
    assert_eq!(token.text, "b.");
    assert_eq!((token.line, token.column), (1, 11));
}

#[test]
fn no_trigger_without_any_delimiter() {
    assert_eq!(find_trigger("identifier", 1, 11), None);
    assert_eq!(find_trigger("", 1, 1), None);
}

#[test]
fn no_trigger_when_slice_ends_in_a_statement() {
    assert_eq!(locate("statement;"), None);
    assert_eq!(locate("// comments"), None);
}

#[test]
fn cursor_between_the_colons_finds_nothing() {
    assert_eq!(find_trigger("std::", 1, 5), None);
}

#[test]
fn line_past_the_end_clamps_gracefully() {
    assert_eq!(find_trigger("std::", 9, 1), None);

    let token = find_trigger("std::", 9, 6).unwrap();
    assert_eq!(token.text, "std::");
}

#[test]
fn column_past_the_end_clamps_to_buffer_length() {
    let token = find_trigger("std::", 1, 80).unwrap();
    assert_eq!(token.text, "std::");
    assert_eq!((token.line, token.column), (1, 6));
}

#[test]
fn whitespace_is_stripped_from_the_token() {
    let token = locate("instance .").unwrap();
    assert_eq!(token.text, "instance.");
}

#[test]
fn multibyte_text_before_the_cursor_does_not_panic() {
    let text = "s = π;\nstd::";
    let token = find_trigger(text, 2, 6).unwrap();
    assert_eq!(token.text, "std::");
    assert_eq!((token.line, token.column), (2, 6));
}
