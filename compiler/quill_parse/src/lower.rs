//! Declaration lowering: `SExpr` → [`Program`].
//!
//! Only shapes are checked here. Names, types and defaults are validated when
//! the static phase builds each class.

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::{
    keyword, Atom, ClassDecl, FieldDecl, Line, MemberList, MethodDecl, ParamDecl, Program, SExpr,
    SList, TemplateDecl,
};

/// Lower every top-level item into a class or template declaration.
pub fn lower(items: &[SExpr]) -> QuillResult<Program> {
    let mut program = Program::default();

    for item in items {
        let Some(list) = item.as_list() else {
            return Err(QuillError::malformed(
                format!("expected a class declaration, found `{item}`"),
                item.line(),
            ));
        };
        match list.head() {
            Some(keyword::CLASS) => program.classes.push(lower_class(list)?),
            Some(keyword::TEMPLATE_CLASS) => program.templates.push(lower_template(list)?),
            _ => {
                return Err(QuillError::malformed(
                    "expected `(class ...)` or `(tclass ...)` at top level",
                    list.line,
                ))
            }
        }
    }

    Ok(program)
}

/// `(class Name [inherits Super] Member*)`
fn lower_class(list: &SList) -> QuillResult<ClassDecl> {
    let name = expect_name(list, 1, "class name")?;

    let inherits = list
        .items
        .get(2)
        .is_some_and(|item| item.is_atom(keyword::INHERITS));
    let (superclass, members_start) = if inherits {
        (Some(expect_name(list, 3, "superclass name")?), 4)
    } else {
        (None, 2)
    };

    Ok(ClassDecl {
        name,
        superclass,
        members: lower_members(&list.items[members_start..])?,
        line: list.line,
    })
}

/// `(tclass Name (Param*) Member*)`
fn lower_template(list: &SList) -> QuillResult<TemplateDecl> {
    let name = expect_name(list, 1, "template name")?;

    let params = match list.items.get(2).and_then(SExpr::as_list) {
        Some(params) => params
            .items
            .iter()
            .map(|param| {
                param.atom_text().map(str::to_string).ok_or_else(|| {
                    QuillError::malformed(
                        format!("template parameter must be a name, found `{param}`"),
                        param.line(),
                    )
                })
            })
            .collect::<QuillResult<Vec<_>>>()?,
        None => {
            return Err(QuillError::malformed(
                format!("template `{name}` needs a parameter list: (tclass {name} (T ...) ...)"),
                list.line,
            ))
        }
    };

    Ok(TemplateDecl {
        name,
        params,
        members: lower_members(&list.items[3..])?,
        line: list.line,
    })
}

fn lower_members(items: &[SExpr]) -> QuillResult<MemberList> {
    let mut members = MemberList::default();

    for item in items {
        let Some(list) = item.as_list() else {
            return Err(not_a_member(item));
        };
        match list.head() {
            Some(keyword::FIELD) => members.fields.push(lower_field(list)?),
            Some(keyword::METHOD) => members.methods.push(lower_method(list)?),
            _ => return Err(not_a_member(item)),
        }
    }

    Ok(members)
}

fn not_a_member(item: &SExpr) -> QuillError {
    QuillError::malformed(
        format!("expected `(field ...)` or `(method ...)`, found `{item}`"),
        item.line(),
    )
}

/// `(field Type Name [Default])`
fn lower_field(list: &SList) -> QuillResult<FieldDecl> {
    if !(3..=4).contains(&list.len()) {
        return Err(QuillError::malformed(
            "field declarations have the form (field Type Name [Default])",
            list.line,
        ));
    }

    let default = match list.items.get(3) {
        Some(SExpr::Atom(atom)) => Some(atom.clone()),
        Some(other) => {
            return Err(QuillError::malformed(
                format!("field default must be a constant, found `{other}`"),
                other.line(),
            ))
        }
        None => None,
    };

    Ok(FieldDecl {
        ty: expect_name(list, 1, "field type")?,
        name: expect_name(list, 2, "field name")?,
        default,
        line: list.line,
    })
}

/// `(method Ret Name ((Type Name)*) Body)`
fn lower_method(list: &SList) -> QuillResult<MethodDecl> {
    if list.len() != 5 {
        return Err(QuillError::malformed(
            "method declarations have the form (method Ret Name ((Type Name) ...) Body); \
             group several statements with (begin ...)",
            list.line,
        ));
    }

    let return_ty = expect_name(list, 1, "return type")?;
    let name = expect_name(list, 2, "method name")?;

    let Some(param_list) = list.items[3].as_list() else {
        return Err(QuillError::malformed(
            format!("method `{name}` needs a parameter list"),
            list.items[3].line(),
        ));
    };
    let params = param_list
        .items
        .iter()
        .map(lower_param)
        .collect::<QuillResult<Vec<_>>>()?;

    Ok(MethodDecl {
        return_ty,
        name,
        params,
        body: list.items[4].clone(),
        line: list.line,
    })
}

/// `(Type Name)`
fn lower_param(param: &SExpr) -> QuillResult<ParamDecl> {
    let pair = param
        .as_list()
        .filter(|list| list.len() == 2)
        .and_then(|list| Some((list.items[0].as_atom()?, list.items[1].as_atom()?)));

    match pair {
        Some((ty, name)) => Ok(ParamDecl {
            ty: ty.text.clone(),
            name: name.text.clone(),
        }),
        None => Err(QuillError::malformed(
            format!("formal parameters have the form (Type Name), found `{param}`"),
            param.line(),
        )),
    }
}

/// The atom at `index`, or a malformed-declaration error naming `what`.
fn expect_name(list: &SList, index: usize, what: &str) -> QuillResult<String> {
    match list.items.get(index) {
        Some(SExpr::Atom(Atom { text, line })) => {
            if text.starts_with('"') {
                Err(QuillError::malformed(
                    format!("expected {what}, found string {text}"),
                    *line,
                ))
            } else {
                Ok(text.clone())
            }
        }
        Some(other) => Err(QuillError::malformed(
            format!("expected {what}, found `{other}`"),
            other.line(),
        )),
        None => Err(QuillError::malformed(format!("missing {what}"), last_line(list))),
    }
}

fn last_line(list: &SList) -> Line {
    list.items.last().map_or(list.line, SExpr::line)
}
