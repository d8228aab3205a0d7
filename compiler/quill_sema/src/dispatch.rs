//! Method resolution and dispatch.
//!
//! Calls are resolved against the receiver's runtime class and walk up the
//! inheritance chain; the first class that declares the method wins.
//! Arguments are checked against the formals before the body runs and the
//! produced value is checked against the return type after.

use std::rc::Rc;

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::{keyword, Line};
use quill_types::Type;

use crate::stack::ensure_sufficient_stack;
use crate::{ClassEnv, ClassId, MethodDef, ObjectRef, Value};

/// One local binding.
#[derive(Clone, Debug, PartialEq)]
pub struct Binding {
    pub name: String,
    /// Declared type; later assignments are checked against it.
    pub ty: Type,
    pub value: Value,
}

/// Local bindings of one method activation.
///
/// Later declarations shadow earlier ones with the same name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scope {
    bindings: Vec<Binding>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, name: impl Into<String>, ty: Type, value: Value) {
        self.bindings.push(Binding {
            name: name.into(),
            ty,
            value,
        });
    }

    pub fn binding(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().rev().find(|binding| binding.name == name)
    }

    pub fn binding_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings
            .iter_mut()
            .rev()
            .find(|binding| binding.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.binding(name).map(|binding| &binding.value)
    }

    /// Bindings in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Everything an executor needs to run one method body.
#[derive(Debug)]
pub struct CallFrame {
    /// The object the method was called on (`me`).
    pub receiver: ObjectRef,
    pub method: Rc<MethodDef>,
    /// The class that declares `method`. `super` calls made from the body
    /// start their search at this class's superclass.
    pub defining_class: ClassId,
    /// Parameters, already checked against their declared types.
    pub locals: Scope,
}

/// Runs method bodies.
///
/// The static core never evaluates a body itself. It resolves and checks the
/// call, then hands the frame to the executor together with the environment,
/// so the body can create objects and make further calls.
pub trait MethodExecutor {
    type Error: From<QuillError>;

    /// Run `frame.method.body`. `Ok(None)` means the body finished without
    /// producing a value.
    fn execute(
        &mut self,
        env: &mut ClassEnv,
        frame: CallFrame,
    ) -> Result<Option<Value>, Self::Error>;
}

impl ClassEnv {
    /// Find `name` in `class` or the nearest ancestor that declares it.
    ///
    /// Returns the declaring class together with the method.
    pub fn resolve_method(
        &self,
        class: ClassId,
        name: &str,
        line: Line,
    ) -> QuillResult<(ClassId, Rc<MethodDef>)> {
        tracing::trace!(class = %self.class(class).name, method = name, "resolving method");
        self.find_method(Some(class), name)
            .ok_or_else(|| QuillError::method_not_found(&self.class(class).name, name, line))
    }

    /// Like [`resolve_method`](Self::resolve_method), starting at the
    /// superclass of `class`.
    pub fn resolve_super_method(
        &self,
        class: ClassId,
        name: &str,
        line: Line,
    ) -> QuillResult<(ClassId, Rc<MethodDef>)> {
        let def = self.class(class);
        self.find_method(def.superclass, name).ok_or_else(|| {
            let owner = def
                .superclass
                .map_or(def.name.as_str(), |parent| self.class(parent).name.as_str());
            QuillError::method_not_found(owner, name, line)
        })
    }

    fn find_method(&self, start: Option<ClassId>, name: &str) -> Option<(ClassId, Rc<MethodDef>)> {
        self.classes
            .ancestors(start?)
            .find_map(|(id, def)| def.method(name).map(|method| (id, Rc::clone(method))))
    }

    /// Check `args` against the formals of `method` and bind them.
    pub fn bind_arguments(
        &self,
        method: &MethodDef,
        args: Vec<Value>,
        line: Line,
    ) -> QuillResult<Scope> {
        if args.len() != method.params.len() {
            return Err(QuillError::argument_count(
                &method.name,
                method.params.len(),
                args.len(),
                line,
            ));
        }

        let mut scope = Scope::new();
        for (param, arg) in method.params.iter().zip(args) {
            let actual = arg.static_type();
            if !self.is_assignable(&param.ty, &actual, line)? {
                return Err(QuillError::type_mismatch(
                    format!(
                        "parameter `{}` of method `{}` expects `{}`, found `{actual}`",
                        param.name, method.name, param.ty
                    ),
                    line,
                ));
            }
            scope.declare(param.name.clone(), param.ty.clone(), arg);
        }
        Ok(scope)
    }

    /// Apply the return contract of `method` to what its body produced.
    ///
    /// `void` methods return nothing whatever the body produced. Other
    /// methods that produce nothing return the default of their type.
    pub fn enforce_return(
        &self,
        method: &MethodDef,
        produced: Option<Value>,
        line: Line,
    ) -> QuillResult<Option<Value>> {
        match (&method.return_type, produced) {
            (Type::Void, _) => Ok(None),
            (declared, None) => Ok(Value::default_for(declared)),
            (declared, Some(value)) => {
                let actual = value.static_type();
                if self.is_assignable(declared, &actual, line)? {
                    Ok(Some(value))
                } else {
                    Err(QuillError::type_mismatch(
                        format!(
                            "method `{}` returns `{declared}` but produced `{actual}`",
                            method.name
                        ),
                        line,
                    ))
                }
            }
        }
    }

    /// Call `name` on `receiver`: resolve, bind, execute, check the return.
    pub fn resolve_and_call<X: MethodExecutor>(
        &mut self,
        receiver: &ObjectRef,
        name: &str,
        args: Vec<Value>,
        line: Line,
        executor: &mut X,
    ) -> Result<Option<Value>, X::Error> {
        let class = receiver.borrow().class();
        let (defining_class, method) = self.resolve_method(class, name, line)?;
        self.invoke(receiver, defining_class, &method, args, line, executor)
    }

    /// Call `name` on `receiver` as seen from the superclass of `from`, the
    /// class declaring the calling method.
    pub fn call_super<X: MethodExecutor>(
        &mut self,
        receiver: &ObjectRef,
        from: ClassId,
        name: &str,
        args: Vec<Value>,
        line: Line,
        executor: &mut X,
    ) -> Result<Option<Value>, X::Error> {
        let (defining_class, method) = self.resolve_super_method(from, name, line)?;
        self.invoke(receiver, defining_class, &method, args, line, executor)
    }

    fn invoke<X: MethodExecutor>(
        &mut self,
        receiver: &ObjectRef,
        defining_class: ClassId,
        method: &Rc<MethodDef>,
        args: Vec<Value>,
        line: Line,
        executor: &mut X,
    ) -> Result<Option<Value>, X::Error> {
        let locals = self.bind_arguments(method, args, line)?;
        let frame = CallFrame {
            receiver: Rc::clone(receiver),
            method: Rc::clone(method),
            defining_class,
            locals,
        };

        let produced = ensure_sufficient_stack(|| executor.execute(self, frame))?;
        Ok(self.enforce_return(method, produced, line)?)
    }

    /// Instantiate the `main` class and call its `main` method with no
    /// arguments. The result is discarded.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn run_main<X: MethodExecutor>(&mut self, executor: &mut X) -> Result<(), X::Error> {
        let line = self
            .registry
            .entry(keyword::MAIN_CLASS)
            .map_or(Line::FIRST, |entry| entry.line);
        let main = self.instantiate(keyword::MAIN_CLASS, line)?;
        self.resolve_and_call(&main, keyword::MAIN_METHOD, Vec::new(), line, executor)?;
        Ok(())
    }
}
