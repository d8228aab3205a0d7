//! Static semantic core of the Quill interpreter.
//!
//! [`ClassEnv`] is built once per program and owns everything the execution
//! engine consults while running it:
//!
//! - the [`TypeRegistry`] of class names and superclass edges
//! - the [`ClassTable`] of built classes (fields, defaults, method tables)
//! - the [`TemplateCatalog`] of template classes, instantiated on demand
//!
//! Loading runs the static phase to completion before anything executes:
//! register every class, catalog every template, verify the hierarchy, then
//! build every class (instantiating the templates its members mention).
//!
//! Method bodies are opaque here. Running one is the job of a
//! [`MethodExecutor`], which receives the environment by `&mut` together
//! with a [`CallFrame`] of already-checked arguments.

mod class_table;
mod config;
mod dispatch;
mod env;
mod instantiate;
mod stack;
mod templates;
mod value;

pub use class_table::{Ancestors, ClassDef, ClassId, ClassTable, FieldDef, MethodDef, ParamDef};
pub use config::SemaConfig;
pub use dispatch::{Binding, CallFrame, MethodExecutor, Scope};
pub use env::ClassEnv;
pub use templates::{
    TemplateCatalog, TemplateClassDef, TemplateField, TemplateInvocation, TemplateMethod,
    TemplateParam, TypeArg, TypeSlot,
};
pub use value::{FieldSlot, Object, ObjectRef, Value};

pub use quill_types::{Type, TypeRegistry};
