//! The `classes` command: list the class table after the static phase.

use std::fmt::Write;

use quill_sema::{ClassEnv, SemaConfig, Value};

use super::{load_or_exit, read_file};

/// One block per built class, in build order:
///
/// ```text
/// class Dog inherits Animal  # line 3
///   field int age = 3
///   method void fetch(Animal friend, int times)
/// ```
pub fn describe_classes(env: &ClassEnv) -> String {
    let mut out = String::new();

    for (_, class) in env.classes().iter() {
        let _ = write!(out, "class {}", class.name);
        if let Some(parent) = class.superclass {
            let _ = write!(out, " inherits {}", env.class(parent).name);
        }
        let _ = writeln!(out, "  # line {}", class.line);

        for field in &class.fields {
            let _ = writeln!(
                out,
                "  field {} {} = {}",
                field.ty,
                field.name,
                source_form(&field.default)
            );
        }
        for method in class.methods() {
            let params: Vec<String> = method
                .params
                .iter()
                .map(|param| format!("{} {}", param.ty, param.name))
                .collect();
            let _ = writeln!(
                out,
                "  method {} {}({})",
                method.return_type,
                method.name,
                params.join(", ")
            );
        }
    }

    out
}

/// Defaults are literals; print strings with their quotes.
fn source_form(value: &Value) -> String {
    match value {
        Value::Str(text) => format!("\"{text}\""),
        other => other.to_string(),
    }
}

/// Print the class table of the program at `path`.
pub fn classes_file(path: &str) {
    let source = read_file(path);
    let env = load_or_exit(path, &source, SemaConfig::default());
    print!("{}", describe_classes(&env));
}
