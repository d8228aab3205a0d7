//! Arena of built classes.
//!
//! # Design
//!
//! - `ClassDef`s live in a `Vec` indexed by [`ClassId`]; superclasses are
//!   stored as ids, so the hierarchy has no owning back-references
//! - A name → id map serves lookups by class name, including canonical
//!   names of instantiated templates
//! - Methods are `Rc<MethodDef>` so a resolved method can be handed to the
//!   executor while the environment stays mutably borrowable

use std::fmt;
use std::rc::Rc;

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::{Line, SExpr};
use quill_types::Type;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::Value;

/// Index into the class arena.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct ClassId(u32);

impl ClassId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[expect(clippy::cast_possible_truncation, reason = "class count fits in u32")]
    pub(crate) fn from_index(index: usize) -> Self {
        ClassId(index as u32)
    }
}

impl fmt::Debug for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClassId({})", self.0)
    }
}

/// A built, concrete class.
#[derive(Clone, Debug)]
pub struct ClassDef {
    pub name: String,
    pub superclass: Option<ClassId>,
    /// Fields declared by this class, in declaration order. Inherited fields
    /// stay with the class that declares them.
    pub fields: Vec<FieldDef>,
    methods: Vec<Rc<MethodDef>>,
    method_index: FxHashMap<String, usize>,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub ty: Type,
    pub name: String,
    /// Checked against `ty` when the class was built.
    pub default: Value,
    pub line: Line,
}

/// A method signature together with its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MethodDef {
    pub name: String,
    pub return_type: Type,
    pub params: Vec<ParamDef>,
    /// Opaque to the static core; run by the executor.
    pub body: SExpr,
    pub line: Line,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamDef {
    pub ty: Type,
    pub name: String,
}

impl ClassDef {
    pub fn new(name: impl Into<String>, superclass: Option<ClassId>, line: Line) -> Self {
        ClassDef {
            name: name.into(),
            superclass,
            fields: Vec::new(),
            methods: Vec::new(),
            method_index: FxHashMap::default(),
            line,
        }
    }

    /// Add a field. Field names are unique within a class.
    pub fn add_field(&mut self, field: FieldDef) -> QuillResult<()> {
        if self.field(&field.name).is_some() {
            return Err(QuillError::duplicate("field", &field.name, field.line));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Add a method. Method names are unique within a class (no
    /// overloading) and parameter names are unique within a method.
    pub fn add_method(&mut self, method: MethodDef) -> QuillResult<()> {
        if self.method_index.contains_key(&method.name) {
            return Err(QuillError::duplicate("method", &method.name, method.line));
        }

        let mut seen = FxHashSet::default();
        for param in &method.params {
            if !seen.insert(param.name.as_str()) {
                return Err(QuillError::duplicate(
                    "formal parameter",
                    &param.name,
                    method.line,
                ));
            }
        }

        self.method_index
            .insert(method.name.clone(), self.methods.len());
        self.methods.push(Rc::new(method));
        Ok(())
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// A method declared by this class itself (inherited ones are not
    /// consulted).
    pub fn method(&self, name: &str) -> Option<&Rc<MethodDef>> {
        self.method_index.get(name).map(|&i| &self.methods[i])
    }

    /// Declared methods, in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Rc<MethodDef>> {
        self.methods.iter()
    }
}

/// Every built class, addressable by id or name.
#[derive(Clone, Debug, Default)]
pub struct ClassTable {
    defs: Vec<ClassDef>,
    by_name: FxHashMap<String, ClassId>,
}

impl ClassTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a built class and return its id.
    pub fn insert(&mut self, def: ClassDef) -> QuillResult<ClassId> {
        if self.by_name.contains_key(&def.name) {
            return Err(QuillError::duplicate("class", &def.name, def.line));
        }
        let id = ClassId::from_index(self.defs.len());
        self.by_name.insert(def.name.clone(), id);
        self.defs.push(def);
        Ok(id)
    }

    pub fn id(&self, name: &str) -> Option<ClassId> {
        self.by_name.get(name).copied()
    }

    /// The class behind an id. Ids are only handed out by this table.
    #[inline]
    pub fn get(&self, id: ClassId) -> &ClassDef {
        &self.defs[id.index()]
    }

    pub fn by_name(&self, name: &str) -> Option<&ClassDef> {
        self.id(name).map(|id| self.get(id))
    }

    /// Classes in the order they were built.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (ClassId::from_index(i), def))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// `id` followed by its ancestors, nearest first.
    ///
    /// A superclass is always built before its subclasses, so the walk only
    /// ever moves to lower ids and terminates.
    pub fn ancestors(&self, id: ClassId) -> Ancestors<'_> {
        Ancestors {
            table: self,
            next: Some(id),
        }
    }
}

/// Iterator returned by [`ClassTable::ancestors`].
pub struct Ancestors<'a> {
    table: &'a ClassTable,
    next: Option<ClassId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (ClassId, &'a ClassDef);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let def = self.table.get(id);
        self.next = def.superclass;
        Some((id, def))
    }
}
