//! Template classes and their invocations.
//!
//! A template is cataloged once, with every type position classified as a
//! parameter, a concrete token, or an invocation of a template. Nothing is
//! resolved at catalog time: invocations are instantiated when a concrete
//! class first mentions them.

use std::fmt;
use std::rc::Rc;

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::keyword::TEMPLATE_SEPARATOR;
use quill_ir::{
    Atom, ClassDecl, FieldDecl, Line, MemberList, MethodDecl, ParamDecl, SExpr, TemplateDecl,
};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

/// A parsed `Template@Arg1@...@ArgN` token.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateInvocation {
    pub template: String,
    pub args: SmallVec<[String; 2]>,
}

impl TemplateInvocation {
    /// Parse a type token.
    ///
    /// Tokens without `@` are not invocations and yield `Ok(None)`. An empty
    /// component (`Node@`, `@int`, `Pair@@int`) is a type error.
    pub fn parse(token: &str, line: Line) -> QuillResult<Option<Self>> {
        let Some((template, rest)) = token.split_once(TEMPLATE_SEPARATOR) else {
            return Ok(None);
        };
        let args: SmallVec<[String; 2]> = rest
            .split(TEMPLATE_SEPARATOR)
            .map(str::to_string)
            .collect();

        if template.is_empty() || args.iter().any(String::is_empty) {
            return Err(QuillError::type_mismatch(
                format!("malformed template invocation `{token}`"),
                line,
            ));
        }

        Ok(Some(TemplateInvocation {
            template: template.to_string(),
            args,
        }))
    }

    /// The name the instantiated class is registered under.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TemplateInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)?;
        for arg in &self.args {
            write!(f, "{TEMPLATE_SEPARATOR}{arg}")?;
        }
        Ok(())
    }
}

/// A type position inside a template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeSlot {
    /// The template's n-th parameter.
    Param(usize),
    /// A token that does not depend on the parameters.
    Concrete(String),
    /// `Template@Arg...`, where each argument may be a parameter.
    Invocation {
        template: String,
        args: SmallVec<[TypeArg; 2]>,
    },
}

/// One argument of an invocation inside a template.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Param(usize),
    Concrete(String),
}

impl TypeSlot {
    pub fn classify(token: &str, params: &[String], line: Line) -> QuillResult<TypeSlot> {
        if let Some(index) = param_index(params, token) {
            return Ok(TypeSlot::Param(index));
        }
        Ok(match TemplateInvocation::parse(token, line)? {
            Some(invocation) => TypeSlot::Invocation {
                template: invocation.template,
                args: invocation
                    .args
                    .into_iter()
                    .map(|arg| match param_index(params, &arg) {
                        Some(index) => TypeArg::Param(index),
                        None => TypeArg::Concrete(arg),
                    })
                    .collect(),
            },
            None => TypeSlot::Concrete(token.to_string()),
        })
    }

    /// The concrete token for this slot given the template's arguments.
    ///
    /// `args` has exactly one entry per template parameter.
    pub fn substitute(&self, args: &[String]) -> String {
        match self {
            TypeSlot::Param(index) => args[*index].clone(),
            TypeSlot::Concrete(token) => token.clone(),
            TypeSlot::Invocation {
                template,
                args: slot_args,
            } => {
                let mut token = template.clone();
                for arg in slot_args {
                    token.push(TEMPLATE_SEPARATOR);
                    match arg {
                        TypeArg::Param(index) => token.push_str(&args[*index]),
                        TypeArg::Concrete(concrete) => token.push_str(concrete),
                    }
                }
                token
            }
        }
    }
}

fn param_index(params: &[String], token: &str) -> Option<usize> {
    params.iter().position(|param| param == token)
}

/// An uninstantiated template class. Never mutated once cataloged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateClassDef {
    pub name: String,
    pub params: Vec<String>,
    pub fields: Vec<TemplateField>,
    pub methods: Vec<TemplateMethod>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateField {
    pub ty: TypeSlot,
    pub name: String,
    pub default: Option<Atom>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateMethod {
    pub return_ty: TypeSlot,
    pub name: String,
    pub params: Vec<TemplateParam>,
    pub body: SExpr,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemplateParam {
    pub ty: TypeSlot,
    pub name: String,
}

impl TemplateClassDef {
    /// Classify a template declaration.
    ///
    /// Parameter, field and method names must be distinct.
    pub fn from_decl(decl: &TemplateDecl) -> QuillResult<Self> {
        let mut seen = FxHashSet::default();
        for param in &decl.params {
            if !seen.insert(param.as_str()) {
                return Err(QuillError::duplicate("template parameter", param, decl.line));
            }
        }

        let params = &decl.params;
        let mut field_names = FxHashSet::default();
        let mut fields = Vec::with_capacity(decl.members.fields.len());
        for field in &decl.members.fields {
            if !field_names.insert(field.name.as_str()) {
                return Err(QuillError::duplicate("field", &field.name, field.line));
            }
            fields.push(TemplateField {
                ty: TypeSlot::classify(&field.ty, params, field.line)?,
                name: field.name.clone(),
                default: field.default.clone(),
                line: field.line,
            });
        }

        let mut method_names = FxHashSet::default();
        let mut methods = Vec::with_capacity(decl.members.methods.len());
        for method in &decl.members.methods {
            if !method_names.insert(method.name.as_str()) {
                return Err(QuillError::duplicate("method", &method.name, method.line));
            }
            methods.push(TemplateMethod {
                return_ty: TypeSlot::classify(&method.return_ty, params, method.line)?,
                name: method.name.clone(),
                params: method
                    .params
                    .iter()
                    .map(|param| {
                        Ok(TemplateParam {
                            ty: TypeSlot::classify(&param.ty, params, method.line)?,
                            name: param.name.clone(),
                        })
                    })
                    .collect::<QuillResult<_>>()?,
                body: method.body.clone(),
                line: method.line,
            });
        }

        Ok(TemplateClassDef {
            name: decl.name.clone(),
            params: decl.params.clone(),
            fields,
            methods,
            line: decl.line,
        })
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    /// The concrete declaration of `canonical`, with every parameter
    /// replaced by its argument.
    ///
    /// Invocation tokens inside method bodies are rewritten too, so a body
    /// that mentions `Node@T` refers to the concrete instantiation.
    pub fn substitute(&self, canonical: &str, args: &[String]) -> ClassDecl {
        let fields = self
            .fields
            .iter()
            .map(|field| FieldDecl {
                ty: field.ty.substitute(args),
                name: field.name.clone(),
                default: field.default.clone(),
                line: field.line,
            })
            .collect();

        let methods = self
            .methods
            .iter()
            .map(|method| MethodDecl {
                return_ty: method.return_ty.substitute(args),
                name: method.name.clone(),
                params: method
                    .params
                    .iter()
                    .map(|param| ParamDecl {
                        ty: param.ty.substitute(args),
                        name: param.name.clone(),
                    })
                    .collect(),
                body: method
                    .body
                    .map_atoms(&mut |atom: &Atom| self.substitute_body_atom(atom, args)),
                line: method.line,
            })
            .collect();

        ClassDecl {
            name: canonical.to_string(),
            superclass: None,
            members: MemberList { fields, methods },
            line: self.line,
        }
    }

    fn substitute_body_atom(&self, atom: &Atom, args: &[String]) -> Option<String> {
        if atom.is_string_literal() {
            return None;
        }
        let (template, rest) = atom.text.split_once(TEMPLATE_SEPARATOR)?;

        let mut token = template.to_string();
        let mut changed = false;
        for component in rest.split(TEMPLATE_SEPARATOR) {
            token.push(TEMPLATE_SEPARATOR);
            match param_index(&self.params, component) {
                Some(index) => {
                    token.push_str(&args[index]);
                    changed = true;
                }
                None => token.push_str(component),
            }
        }
        changed.then_some(token)
    }
}

/// Every template class of the program, by name.
#[derive(Clone, Debug, Default)]
pub struct TemplateCatalog {
    templates: FxHashMap<String, Rc<TemplateClassDef>>,
    order: Vec<String>,
}

impl TemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, template: TemplateClassDef) -> QuillResult<()> {
        if self.templates.contains_key(&template.name) {
            return Err(QuillError::duplicate(
                "template class",
                &template.name,
                template.line,
            ));
        }
        self.order.push(template.name.clone());
        self.templates
            .insert(template.name.clone(), Rc::new(template));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rc<TemplateClassDef>> {
        self.templates.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Templates in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &TemplateClassDef> {
        self.order
            .iter()
            .filter_map(|name| self.templates.get(name).map(Rc::as_ref))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "Test code uses expect for clarity")]
mod tests;
