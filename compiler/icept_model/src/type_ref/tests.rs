#![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use super::*;
use crate::TypeDescriptor;

#[test]
fn test_nested_package_name() {
    let ty = TypeRef::new("org/example/Outer$Inner").unwrap();
    assert_eq!(ty.internal_name(), "org/example/Outer$Inner");
    assert_eq!(ty.simple_name(), "Outer$Inner");
    assert_eq!(ty.package(), Some("org/example"));
    assert_eq!(ty.descriptor(), "Lorg/example/Outer$Inner;");
}

#[test]
fn test_default_package() {
    let ty = TypeRef::new("A").unwrap();
    assert_eq!(ty.simple_name(), "A");
    assert_eq!(ty.package(), None);
    assert_eq!(ty.to_string(), "A");
}

#[test]
fn test_rejects_malformed_names() {
    for bad in ["", "java.lang.String", "a//b", "/a", "a/", "Foo;", "[I", "a b", "<init>"] {
        let err = TypeRef::new(bad).unwrap_err();
        assert!(
            matches!(err, ModelError::InvalidTypeRef { ref name, .. } if name == bad),
            "`{bad}` should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_ordering_is_lexicographic() {
    let mut types: Vec<TypeRef> = ["Z", "A", "M", "a/B"]
        .into_iter()
        .map(|n| TypeRef::new(n).unwrap())
        .collect();
    types.sort();
    let names: Vec<&str> = types.iter().map(TypeRef::internal_name).collect();
    assert_eq!(names, ["A", "M", "Z", "a/B"]);
}

#[test]
fn test_rejects_parentheses() {
    for bad in ["L(", "Foo)", "a/(b)/C"] {
        assert!(TypeRef::new(bad).is_err(), "`{bad}` should be rejected");
    }
    let err = TypeDescriptor::parse("(L(;)V").unwrap_err();
    assert!(matches!(err, ModelError::InvalidDescriptor { .. }));
}
