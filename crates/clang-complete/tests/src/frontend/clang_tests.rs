use expect_test::expect;

use super::*;

fn render(candidate: &Candidate) -> String {
    candidate
        .chunks
        .iter()
        .map(|chunk| format!("{:?}:{}", chunk.role, chunk.text))
        .collect::<Vec<_>>()
        .join(" | ")
}

#[test]
fn parses_a_function_completion_line() {
    let stdout = "COMPLETION: printf : [#int#]printf(<#const char *restrict#>{#, ...#})\n";
    let candidates = parse_completions(stdout);
    assert_eq!(candidates.len(), 1);

    expect![[
        "ResultType:int | TypedText:printf | LeftParen:( | Placeholder:const char *restrict | Optional:, ... | RightParen:)"
    ]]
    .assert_eq(&render(&candidates[0]));
}

#[test]
fn parses_a_bare_macro_completion_line() {
    let candidates = parse_completions("COMPLETION: NULL\n");
    assert_eq!(candidates.len(), 1);
    expect![["TypedText:NULL"]].assert_eq(&render(&candidates[0]));
}

#[test]
fn parses_a_template_completion_line() {
    let candidates = parse_completions("COMPLETION: vector : vector<<#class _Tp#>>\n");
    assert_eq!(candidates.len(), 1);
    expect![["TypedText:vector | LeftAngle:< | Placeholder:class _Tp | RightAngle:>"]]
        .assert_eq(&render(&candidates[0]));
}

#[test]
fn result_type_precedes_the_typed_text() {
    let candidates = parse_completions("COMPLETION: size : [#size_t#]size()\n");
    let rendered = render(&candidates[0]);
    expect![["ResultType:size_t | TypedText:size | LeftParen:( | RightParen:)"]].assert_eq(&rendered);
}

#[test]
fn non_completion_lines_are_ignored() {
    let stdout = "\
main.cc:1:6: error: expected expression
COMPLETION: printf : [#int#]printf()
1 error generated.
";
    let candidates = parse_completions(stdout);
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].typed_text(), Some("printf"));
}

#[test]
fn diagnostics_only_output_yields_no_candidates() {
    let stdout = "main.cc:3:1: error: unknown type name 'foo'\n";
    assert!(parse_completions(stdout).is_empty());
}

#[test]
fn candidate_helpers_see_through_the_chunks() {
    let candidates = parse_completions("COMPLETION: printf : [#int#]printf(<#const char *#>)\n");
    let candidate = &candidates[0];
    assert_eq!(candidate.typed_text(), Some("printf"));
    assert_eq!(candidate.result_type(), Some("int"));
    assert_eq!(candidate.signature(), "printf(const char *)");
}

#[test]
fn comma_and_space_become_separate_chunks() {
    let candidates = parse_completions("COMPLETION: insert : [#void#]insert(<#int#>, <#int#>)\n");
    expect![[
        "ResultType:void | TypedText:insert | LeftParen:( | Placeholder:int | Comma:, | HorizontalSpace:  | Placeholder:int | RightParen:)"
    ]]
    .assert_eq(&render(&candidates[0]));
}

#[test]
fn unterminated_marker_degrades_to_text() {
    let candidates = parse_completions("COMPLETION: broken : [#int\n");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].chunks[0].role, ChunkRole::Text);
}

#[test]
fn driver_failure_detection() {
    assert!(driver_failure("clang: error: unknown argument: '-bogus'").is_some());
    assert!(driver_failure("clang: error: no such file or directory: 'gone.cc'").is_some());
    assert!(driver_failure("main.cc:1:1: error: unknown type name 'foo'").is_none());
    assert!(driver_failure("").is_none());
}

#[test]
fn scratch_directories_are_distinct_per_instance() {
    let a = ClangFrontend::new();
    let b = ClangFrontend::new();
    assert_ne!(format!("{a:?}"), format!("{b:?}"));
}
