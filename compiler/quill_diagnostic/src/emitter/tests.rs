use pretty_assertions::assert_eq;
use quill_ir::Line;

use super::*;

fn render(error: &QuillError, source: Option<SourceFile<'_>>) -> String {
    let mut emitter = TerminalEmitter::new(Vec::new(), false);
    emitter.emit(error, source).unwrap_or_default();
    String::from_utf8(emitter.into_inner()).unwrap_or_default()
}

#[test]
fn renders_source_line() {
    let text = "(class main\n  (field int x \"hi\")\n)\n";
    let error = QuillError::type_mismatch("invalid type for field `x`", Line::new(2));
    let out = render(
        &error,
        Some(SourceFile {
            path: "prog.quill",
            text,
        }),
    );
    assert_eq!(
        out,
        "error[E2001]: invalid type for field `x`\n\
         \x20--> prog.quill:2\n\
         \x20 |\n\
         2 |   (field int x \"hi\")\n\
         \x20 |\n\
         \x20 = note: type error\n\n"
    );
}

#[test]
fn renders_without_source() {
    let error = QuillError::unknown_type("Animal", Line::new(12));
    let out = render(&error, None);
    assert_eq!(
        out,
        "error[E2002]: no class named `Animal`\n\
         \x20\x20--> line 12\n\
         \x20\x20 = note: unknown type\n\n"
    );
}

#[test]
fn renders_without_line() {
    let error = QuillError::cyclic_inheritance("A", None);
    let out = render(&error, None);
    assert_eq!(
        out,
        "error[E2008]: class `A` inherits from itself\n  = note: configuration error\n\n"
    );
}

#[test]
fn summary_counts_errors() {
    let mut emitter = TerminalEmitter::new(Vec::new(), false);
    emitter.emit_summary().unwrap_or_default();
    assert_eq!(emitter.error_count(), 0);

    let error = QuillError::cyclic_inheritance("A", None);
    emitter.emit(&error, None).unwrap_or_default();
    emitter.emit(&error, None).unwrap_or_default();
    emitter.emit_summary().unwrap_or_default();
    let out = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert!(out.ends_with("error: aborting due to 2 previous errors\n"));
}

#[test]
fn colors_wrap_the_header() {
    let mut emitter = TerminalEmitter::new(Vec::new(), true);
    let error = QuillError::cyclic_inheritance("A", None);
    emitter.emit(&error, None).unwrap_or_default();
    let out = String::from_utf8(emitter.into_inner()).unwrap_or_default();
    assert!(out.starts_with("\x1b[1;31merror\x1b[0m\x1b[1m[E2008]\x1b[0m: "));
}
