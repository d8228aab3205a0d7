//! Runtime values and objects.
//!
//! Values are cheap to clone: objects are shared through [`ObjectRef`], so a
//! clone of an object value is another reference to the same instance.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use quill_ir::Literal;
use quill_types::Type;

use crate::ClassId;

/// Shared, mutable handle to an object.
pub type ObjectRef = Rc<RefCell<Object>>;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Int(i64),
    Bool(bool),
    Str(String),
    /// A null reference, tagged with the class type it was bound to when it
    /// was created. The tag never changes.
    Null(String),
    Object(ObjectRef),
}

impl Value {
    /// The static type used for compatibility checks.
    ///
    /// For an object this is its runtime (most-derived) class; for a null,
    /// the class it is tagged with.
    pub fn static_type(&self) -> Type {
        match self {
            Value::Int(_) => Type::Int,
            Value::Bool(_) => Type::Bool,
            Value::Str(_) => Type::Str,
            Value::Null(class) => Type::Class(class.clone()),
            Value::Object(object) => Type::Class(object.borrow().class_name.clone()),
        }
    }

    /// The value a field, local or missing return of type `ty` starts with:
    /// `0`, `false`, `""`, or a null tagged with the class.
    ///
    /// Returns `None` for `void`, which has no values.
    pub fn default_for(ty: &Type) -> Option<Value> {
        match ty {
            Type::Int => Some(Value::Int(0)),
            Type::Bool => Some(Value::Bool(false)),
            Type::Str => Some(Value::Str(String::new())),
            Type::Class(name) => Some(Value::Null(name.clone())),
            Type::Void => None,
        }
    }

    /// Convert a literal for a slot declared as `declared`.
    ///
    /// `null` takes the declared class as its tag; on a primitive or `void`
    /// slot there is nothing to tag it with and `None` is returned. Other
    /// literals convert as-is and still need a compatibility check.
    pub fn from_literal(literal: &Literal, declared: &Type) -> Option<Value> {
        match literal {
            Literal::Int(n) => Some(Value::Int(*n)),
            Literal::Bool(b) => Some(Value::Bool(*b)),
            Literal::Str(s) => Some(Value::Str(s.clone())),
            Literal::Null => declared.class_name().map(|class| Value::Null(class.to_string())),
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }
}

/// Objects compare by identity; everything else by value. Two nulls are
/// equal regardless of their tags.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Null(_), Value::Null(_)) => true,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "Int({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({s:?})"),
            Value::Null(class) => write!(f, "Null({class})"),
            // Objects may reference themselves; print the class only.
            Value::Object(object) => write!(f, "Object({})", object.borrow().class_name),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Null(_) => f.write_str(quill_ir::keyword::NULL),
            Value::Object(object) => write!(f, "<{} object>", object.borrow().class_name),
        }
    }
}

/// An instance of a class.
///
/// Holds one slot for every field of its class and of each ancestor,
/// most-derived class first. A subclass field with the same name as an
/// inherited one shadows it.
#[derive(Debug)]
pub struct Object {
    class: ClassId,
    class_name: String,
    fields: Vec<FieldSlot>,
}

/// A field of a live object.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSlot {
    pub name: String,
    /// Declared type; every assignment is checked against it.
    pub ty: Type,
    pub value: Value,
}

impl Object {
    pub(crate) fn new(class: ClassId, class_name: String, fields: Vec<FieldSlot>) -> Self {
        Object {
            class,
            class_name,
            fields,
        }
    }

    /// The most-derived class of this object.
    #[inline]
    pub fn class(&self) -> ClassId {
        self.class
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn slot(&self, name: &str) -> Option<&FieldSlot> {
        self.fields.iter().find(|slot| slot.name == name)
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut FieldSlot> {
        self.fields.iter_mut().find(|slot| slot.name == name)
    }

    /// Current value of a field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slot(name).map(|slot| &slot.value)
    }

    /// Every field slot, most-derived class first.
    pub fn slots(&self) -> &[FieldSlot] {
        &self.fields
    }
}

/// Wrap a freshly built object.
pub(crate) fn share(object: Object) -> ObjectRef {
    Rc::new(RefCell::new(object))
}
