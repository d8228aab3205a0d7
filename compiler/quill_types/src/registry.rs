//! Registry of declared class names and their superclass edges.
//!
//! # Design
//!
//! - `FxHashMap` for lookup by name, plus a `Vec` of names for declaration
//!   order (diagnostics and `quill classes` listings are deterministic)
//! - Superclasses are stored by name: a class may name a superclass that is
//!   declared later in the file, so edges are resolved lazily and checked once
//!   by [`TypeRegistry::verify_hierarchy`]

use quill_diagnostic::{ErrorCode, QuillError, QuillResult};
use quill_ir::Line;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::Type;

/// Every class name known to the program, ordinary or instantiated.
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    classes: FxHashMap<String, ClassEntry>,

    /// Names in registration order.
    order: Vec<String>,
}

/// A registered class name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ClassEntry {
    pub name: String,

    /// Direct superclass, by name. Not necessarily registered yet.
    pub superclass: Option<String>,

    /// Line of the declaration (or of the first reference, for
    /// instantiated templates).
    pub line: Line,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class name with its direct superclass.
    ///
    /// Fails with a name conflict if the name is already registered.
    pub fn register_class(
        &mut self,
        name: &str,
        superclass: Option<&str>,
        line: Line,
    ) -> QuillResult<()> {
        if self.classes.contains_key(name) {
            return Err(QuillError::duplicate("class", name, line));
        }

        tracing::trace!(class = name, superclass, "class registered");
        self.classes.insert(
            name.to_string(),
            ClassEntry {
                name: name.to_string(),
                superclass: superclass.map(str::to_string),
                line,
            },
        );
        self.order.push(name.to_string());
        Ok(())
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn entry(&self, name: &str) -> Option<&ClassEntry> {
        self.classes.get(name)
    }

    /// Remove a registered name. Returns `false` if it was not registered.
    ///
    /// Only used to back out an instantiation whose members failed to build.
    pub fn unregister(&mut self, name: &str) -> bool {
        if self.classes.remove(name).is_none() {
            return false;
        }
        self.order.retain(|registered| registered != name);
        tracing::trace!(class = name, "class unregistered");
        true
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Check whether a token names a usable field or parameter type.
    pub fn is_valid_type(&self, token: &str) -> bool {
        let ty = Type::from_token(token);
        ty.is_primitive() || ty.class_name().is_some_and(|name| self.contains(name))
    }

    /// Like [`is_valid_type`](Self::is_valid_type), but also accepts `void`.
    pub fn is_valid_return_type(&self, token: &str) -> bool {
        Type::from_token(token).is_void() || self.is_valid_type(token)
    }

    /// The class followed by each of its ancestors, nearest first.
    ///
    /// A class reached twice means the `inherits` edges form a cycle; that is
    /// reported instead of looping.
    pub fn superclass_chain(&self, name: &str) -> QuillResult<Vec<&str>> {
        let Some(start) = self.classes.get(name) else {
            return Err(QuillError::new(
                ErrorCode::E2002,
                format!("no class named `{name}`"),
                None,
            ));
        };

        let mut chain = vec![start.name.as_str()];
        let mut visited = FxHashSet::default();
        visited.insert(start.name.as_str());

        let mut current = start;
        while let Some(parent) = current.superclass.as_deref() {
            if !visited.insert(parent) {
                let line = self.classes.get(parent).map(|entry| entry.line);
                return Err(QuillError::cyclic_inheritance(parent, line));
            }
            let Some(entry) = self.classes.get(parent) else {
                return Err(QuillError::unknown_type(parent, current.line));
            };
            chain.push(entry.name.as_str());
            current = entry;
        }

        Ok(chain)
    }

    /// Check whether `descendant` is `ancestor` or inherits from it,
    /// directly or transitively.
    pub fn is_subtype(&self, ancestor: &str, descendant: &str) -> QuillResult<bool> {
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.superclass_chain(descendant)?.contains(&ancestor))
    }

    /// Check that every superclass is registered and that no class inherits
    /// from itself.
    #[tracing::instrument(level = "debug", skip_all, fields(classes = self.len()))]
    pub fn verify_hierarchy(&self) -> QuillResult<()> {
        for name in &self.order {
            let entry = &self.classes[name];
            if let Some(parent) = entry.superclass.as_deref() {
                if !self.contains(parent) {
                    return Err(QuillError::unknown_type(parent, entry.line));
                }
            }
        }

        for name in &self.order {
            self.superclass_chain(name)?;
        }

        tracing::debug!("class hierarchy verified");
        Ok(())
    }
}
