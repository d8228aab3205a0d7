use quill_diagnostic::ErrorCode;

use super::*;

fn zoo() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for (name, parent) in [
        ("Animal", None),
        ("Dog", Some("Animal")),
        ("Cat", Some("Animal")),
        ("Robot", None),
    ] {
        registry
            .register_class(name, parent, Line::FIRST)
            .expect("distinct names");
    }
    registry
}

fn class(name: &str) -> Type {
    Type::Class(name.to_string())
}

#[test]
fn primitives_match_only_themselves() {
    let registry = zoo();
    for for_assignment in [true, false] {
        assert!(registry
            .compatible(&Type::Int, &Type::Int, for_assignment)
            .expect("ok"));
        assert!(!registry
            .compatible(&Type::Int, &Type::Str, for_assignment)
            .expect("ok"));
        assert!(!registry
            .compatible(&Type::Bool, &class("Dog"), for_assignment)
            .expect("ok"));
    }
}

#[test]
fn assignment_is_covariant_one_way() {
    let registry = zoo();
    assert!(registry
        .compatible(&class("Animal"), &class("Dog"), true)
        .expect("ok"));
    assert!(!registry
        .compatible(&class("Dog"), &class("Animal"), true)
        .expect("ok"));
    assert!(!registry
        .compatible(&class("Cat"), &class("Dog"), true)
        .expect("ok"));
}

#[test]
fn comparison_accepts_either_direction() {
    let registry = zoo();
    assert!(registry
        .compatible(&class("Dog"), &class("Animal"), false)
        .expect("ok"));
    assert!(registry
        .compatible(&class("Animal"), &class("Dog"), false)
        .expect("ok"));
    // Siblings are not related.
    assert!(!registry
        .compatible(&class("Cat"), &class("Dog"), false)
        .expect("ok"));
}

#[test]
fn comparing_unrelated_classes_is_type_mismatch() {
    let registry = zoo();
    registry
        .check_comparison(&class("Dog"), &class("Animal"), Line::FIRST)
        .expect("related");

    let err = registry
        .check_comparison(&class("Dog"), &class("Robot"), Line::new(12))
        .expect_err("unrelated");
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.line, Some(Line::new(12)));
    assert!(err.message.contains("Robot"));
}
