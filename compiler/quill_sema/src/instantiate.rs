//! On-demand template instantiation.
//!
//! `Node@int` is instantiated the first time a concrete class mentions it:
//! the template's declaration is substituted, the canonical name registered,
//! and the result built like any ordinary class. Instantiations are cached by
//! canonical name and never rebuilt.

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::Line;
use quill_types::Type;

use crate::stack::ensure_sufficient_stack;
use crate::{ClassEnv, ClassId, TemplateInvocation};

/// Memo entry for one canonical name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Instance {
    /// Registered, members still being built. References from inside the
    /// instantiation resolve to the registered name without recursing.
    InProgress,
    Ready(ClassId),
}

impl ClassEnv {
    /// Instantiate `Template@Arg1@...@ArgN` and return its class type.
    ///
    /// The canonical name is registered before the members are built, so a
    /// template may mention its own instantiation (`Node@T` inside `Node`)
    /// or one that is mutually recursive with it. Expansion that keeps
    /// producing new instantiations stops at
    /// [`SemaConfig::max_instantiation_depth`](crate::SemaConfig).
    #[tracing::instrument(level = "debug", skip(self), fields(depth = self.depth))]
    pub fn instantiate_template(&mut self, name: &str, line: Line) -> QuillResult<Type> {
        let Some(invocation) = TemplateInvocation::parse(name, line)? else {
            return Err(QuillError::unknown_template(name, line));
        };
        let canonical = invocation.canonical_name();

        if let Some(state) = self.instances.get(&canonical) {
            tracing::trace!(?state, "instantiation cache hit");
            return Ok(Type::Class(canonical));
        }

        let template = self
            .templates
            .get(&invocation.template)
            .cloned()
            .ok_or_else(|| QuillError::unknown_template(&invocation.template, line))?;

        if invocation.args.len() != template.arity() {
            return Err(QuillError::template_argument_count(
                &template.name,
                template.arity(),
                invocation.args.len(),
                line,
            ));
        }
        for arg in &invocation.args {
            self.check_template_argument(arg, line)?;
        }

        let limit = self.config.max_instantiation_depth;
        if self.depth >= limit {
            return Err(QuillError::instantiation_too_deep(&canonical, limit, line));
        }

        self.registry.register_class(&canonical, None, line)?;
        self.instances.insert(canonical.clone(), Instance::InProgress);

        let decl = template.substitute(&canonical, &invocation.args);
        self.depth += 1;
        let built = ensure_sufficient_stack(|| self.build_class(&decl));
        self.depth -= 1;
        let id = match built {
            Ok(id) => id,
            Err(err) => {
                // Back out so a retry reports the same error.
                self.instances.remove(&canonical);
                self.registry.unregister(&canonical);
                tracing::debug!(class = %canonical, %err, "instantiation failed");
                return Err(err);
            }
        };

        self.instances.insert(canonical.clone(), Instance::Ready(id));
        tracing::debug!(class = %canonical, "template instantiated");
        Ok(Type::Class(canonical))
    }

    /// The class built for an instantiation, once it is complete.
    pub(crate) fn instance_id(&self, canonical: &str) -> Option<ClassId> {
        match self.instances.get(canonical) {
            Some(Instance::Ready(id)) => Some(*id),
            Some(Instance::InProgress) | None => None,
        }
    }

    /// Template arguments are primitives or registered classes.
    fn check_template_argument(&self, arg: &str, line: Line) -> QuillResult<()> {
        match Type::from_token(arg) {
            Type::Void => Err(QuillError::type_mismatch(
                "`void` cannot be a template argument",
                line,
            )),
            Type::Class(class) if !self.registry.contains(&class) => {
                Err(QuillError::unknown_type(&class, line))
            }
            _ => Ok(()),
        }
    }
}
