use super::*;

#[test]
fn test_diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("test error")
        .with_label("core: Foo#bar", "here")
        .with_note("some context")
        .with_suggestion("try this");

    assert_eq!(diag.code, ErrorCode::E2001);
    assert_eq!(diag.message, "test error");
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
    assert_eq!(diag.suggestions.len(), 1);
}

#[test]
fn test_primary_location_skips_secondary_labels() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_secondary_label("b: second", "also here")
        .with_label("a: first", "here");

    assert_eq!(diag.primary_location(), Some("a: first"));
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E1002)
        .with_message("malformed descriptor")
        .with_label("core: Foo#bar", "declared here")
        .with_secondary_label("core: Foo#baz", "related")
        .with_note("descriptors use JVM syntax");

    let output = diag.to_string();
    let expected = [
        "error [E1002]: malformed descriptor",
        "  --> core: Foo#bar: declared here",
        "      core: Foo#baz: related",
        "  = note: descriptors use JVM syntax",
    ]
    .join("\n");
    pretty_assertions::assert_eq!(output, expected);
}
