use pretty_assertions::assert_eq;
use quill_diagnostic::ErrorCode;

use super::*;

fn template(source: &str) -> QuillResult<TemplateClassDef> {
    let program = quill_parse::parse_program(source)?;
    TemplateClassDef::from_decl(&program.templates[0])
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

#[test]
fn parse_invocation() {
    let invocation = TemplateInvocation::parse("Pair@int@Dog", Line::FIRST)
        .expect("well formed")
        .expect("has separator");
    assert_eq!(invocation.template, "Pair");
    assert_eq!(invocation.args.as_slice(), ["int", "Dog"]);
    assert_eq!(invocation.canonical_name(), "Pair@int@Dog");

    assert_eq!(
        TemplateInvocation::parse("Dog", Line::FIRST).expect("plain token"),
        None
    );
}

#[test]
fn malformed_invocations_are_type_errors() {
    for token in ["Node@", "@int", "Pair@@int", "@"] {
        let err = TemplateInvocation::parse(token, Line::new(3)).expect_err(token);
        assert_eq!(err.code, ErrorCode::E2001, "{token}");
        assert_eq!(err.line, Some(Line::new(3)));
    }
}

#[test]
fn classify_type_slots() {
    let params = strings(&["K", "V"]);
    let line = Line::FIRST;
    assert_eq!(
        TypeSlot::classify("V", &params, line).expect("ok"),
        TypeSlot::Param(1)
    );
    assert_eq!(
        TypeSlot::classify("int", &params, line).expect("ok"),
        TypeSlot::Concrete("int".into())
    );
    assert_eq!(
        TypeSlot::classify("Map@K@string", &params, line).expect("ok"),
        TypeSlot::Invocation {
            template: "Map".into(),
            args: [TypeArg::Param(0), TypeArg::Concrete("string".into())]
                .into_iter()
                .collect(),
        }
    );
}

#[test]
fn substitution_resolves_self_reference() {
    let params = strings(&["T"]);
    let slot = TypeSlot::classify("Node@T", &params, Line::FIRST).expect("ok");
    assert_eq!(slot.substitute(&strings(&["int"])), "Node@int");
    assert_eq!(
        TypeSlot::Param(0).substitute(&strings(&["Dog"])),
        "Dog"
    );
}

#[test]
fn catalog_entry_from_declaration() {
    let node = template(
        "(tclass Node (T)
           (field Node@T next)
           (field T value)
           (method T get ((bool twice)) (return value)))",
    )
    .expect("valid template");

    assert_eq!(node.arity(), 1);
    assert_eq!(node.fields[1].ty, TypeSlot::Param(0));
    assert_eq!(node.methods[0].return_ty, TypeSlot::Param(0));
    assert_eq!(
        node.methods[0].params[0].ty,
        TypeSlot::Concrete("bool".into())
    );
}

#[test]
fn duplicates_inside_a_template() {
    let err = template("(tclass Pair (T T))").expect_err("parameter twice");
    assert_eq!(err.code, ErrorCode::E2006);

    let err = template("(tclass Box (T) (field T a) (field int a))").expect_err("field twice");
    assert_eq!(err.code, ErrorCode::E2006);
    assert_eq!(err.line, Some(Line::FIRST));

    let err = template(
        "(tclass Box (T)
           (method void f () (print 1))
           (method int f () (return 1)))",
    )
    .expect_err("method twice");
    assert_eq!(err.code, ErrorCode::E2006);
    assert_eq!(err.line, Some(Line::new(3)));
}

#[test]
fn substitute_builds_concrete_declaration() {
    let pair = template(
        "(tclass Pair (A B)
           (field A first)
           (field B second)
           (field Pair@B@A swapped)
           (method Pair@A@B self_ref ((A x)) (return (new Pair@A@B \"A@B\"))))",
    )
    .expect("valid template");

    let decl = pair.substitute("Pair@int@Dog", &strings(&["int", "Dog"]));
    assert_eq!(decl.name, "Pair@int@Dog");
    assert_eq!(decl.superclass, None);

    let types: Vec<&str> = decl.members.fields.iter().map(|f| f.ty.as_str()).collect();
    assert_eq!(types, vec!["int", "Dog", "Pair@Dog@int"]);

    let method = &decl.members.methods[0];
    assert_eq!(method.return_ty, "Pair@int@Dog");
    assert_eq!(method.params[0].ty, "int");
    // Invocations in the body are rewritten; string literals are not.
    assert_eq!(
        method.body.to_string(),
        "(return (new Pair@int@Dog \"A@B\"))"
    );
}

#[test]
fn catalog_rejects_duplicate_templates() {
    let mut catalog = TemplateCatalog::new();
    catalog
        .insert(template("(tclass Box (T))").expect("valid"))
        .expect("first");
    let err = catalog
        .insert(template("(tclass Box (U))").expect("valid"))
        .expect_err("second");
    assert_eq!(err.code, ErrorCode::E2006);
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("Box"));
    assert_eq!(catalog.iter().map(|t| t.name.as_str()).collect::<Vec<_>>(), vec!["Box"]);
}
