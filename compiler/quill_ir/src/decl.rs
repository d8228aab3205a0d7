//! Declarations lowered from the symbolic-expression form.
//!
//! Type positions are kept as raw tokens (`int`, `Dog`, `Node@T`): whether a
//! token names a primitive, a class, a template parameter or a template
//! invocation is decided by the static phase, not here.

use crate::{Atom, Line, SExpr};

/// A whole program: every class and template declaration in source order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Program {
    pub classes: Vec<ClassDecl>,
    pub templates: Vec<TemplateDecl>,
}

/// `(class Name [inherits Super] Member*)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassDecl {
    pub name: String,
    pub superclass: Option<String>,
    pub members: MemberList,
    pub line: Line,
}

/// `(tclass Name (Param*) Member*)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateDecl {
    pub name: String,
    pub params: Vec<String>,
    pub members: MemberList,
    pub line: Line,
}

/// Fields and methods of a class body, each in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MemberList {
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

/// `(field Type Name [Default])`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDecl {
    pub ty: String,
    pub name: String,
    /// Raw default token; checked against the field type when the class is built.
    pub default: Option<Atom>,
    pub line: Line,
}

/// `(method Ret Name ((Type Name)*) Body)`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MethodDecl {
    pub return_ty: String,
    pub name: String,
    pub params: Vec<ParamDecl>,
    pub body: SExpr,
    pub line: Line,
}

/// One formal parameter: `(Type Name)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParamDecl {
    pub ty: String,
    pub name: String,
}

impl Program {
    /// Look up an ordinary class declaration by name.
    pub fn class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|class| class.name == name)
    }

    /// Look up a template declaration by name.
    pub fn template(&self, name: &str) -> Option<&TemplateDecl> {
        self.templates.iter().find(|template| template.name == name)
    }
}

impl ClassDecl {
    /// A class with no inheritance clause and no members.
    pub fn empty(name: impl Into<String>, line: Line) -> Self {
        ClassDecl {
            name: name.into(),
            superclass: None,
            members: MemberList::default(),
            line,
        }
    }
}
