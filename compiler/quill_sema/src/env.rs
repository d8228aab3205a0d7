//! The class environment and its static phase.

use quill_diagnostic::{QuillError, QuillResult};
use quill_ir::keyword::TEMPLATE_SEPARATOR;
use quill_ir::{ClassDecl, FieldDecl, Line, Literal, Program};
use quill_types::{Type, TypeRegistry};
use rustc_hash::FxHashMap;

use crate::instantiate::Instance;
use crate::value::share;
use crate::{
    ClassDef, ClassId, ClassTable, FieldDef, FieldSlot, MethodDef, Object, ObjectRef, ParamDef,
    SemaConfig, TemplateCatalog, TemplateClassDef, Value,
};

/// Everything the static phase knows about a program.
///
/// Created once by [`ClassEnv::load_source`] or [`ClassEnv::from_program`]
/// and then handed by `&mut` to the executor for the rest of the run. Lazy
/// instantiation at run time (`new Pair@int@Dog`) adds classes under the same
/// rules as the static phase.
#[derive(Debug)]
pub struct ClassEnv {
    pub(crate) config: SemaConfig,
    pub(crate) registry: TypeRegistry,
    pub(crate) classes: ClassTable,
    pub(crate) templates: TemplateCatalog,

    /// Ordinary declarations not built yet. Drained by the static phase.
    pending: FxHashMap<String, ClassDecl>,

    /// Instantiations by canonical name.
    pub(crate) instances: FxHashMap<String, Instance>,

    /// Nesting of in-progress instantiations.
    pub(crate) depth: usize,
}

impl ClassEnv {
    fn new(config: SemaConfig) -> Self {
        ClassEnv {
            config,
            registry: TypeRegistry::new(),
            classes: ClassTable::new(),
            templates: TemplateCatalog::new(),
            pending: FxHashMap::default(),
            instances: FxHashMap::default(),
            depth: 0,
        }
    }

    /// Read, lower and load a program from source text.
    pub fn load_source(source: &str, config: SemaConfig) -> QuillResult<Self> {
        Self::from_program(quill_parse::parse_program(source)?, config)
    }

    /// Run the static phase over a lowered program.
    ///
    /// Registers every class name, catalogs every template, verifies the
    /// hierarchy and builds every class in declaration order. A class whose
    /// superclass is declared later builds that superclass first.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(classes = program.classes.len(), templates = program.templates.len())
    )]
    pub fn from_program(program: Program, config: SemaConfig) -> QuillResult<Self> {
        let mut env = ClassEnv::new(config);
        env.register_declarations(&program)?;
        env.registry.verify_hierarchy()?;

        let order: Vec<(String, Line)> = program
            .classes
            .iter()
            .map(|class| (class.name.clone(), class.line))
            .collect();
        env.pending = program
            .classes
            .into_iter()
            .map(|class| (class.name.clone(), class))
            .collect();

        for (name, line) in &order {
            env.ensure_class(name, *line)?;
        }

        tracing::debug!(
            classes = env.classes.len(),
            instantiations = env.instances.len(),
            "static phase complete"
        );
        Ok(env)
    }

    fn register_declarations(&mut self, program: &Program) -> QuillResult<()> {
        for class in &program.classes {
            check_class_name(&class.name, class.line)?;
            self.registry
                .register_class(&class.name, class.superclass.as_deref(), class.line)?;
        }

        for template in &program.templates {
            check_class_name(&template.name, template.line)?;
            if self.registry.contains(&template.name) {
                return Err(QuillError::duplicate("class", &template.name, template.line));
            }
            self.templates.insert(TemplateClassDef::from_decl(template)?)?;
        }

        Ok(())
    }

    /// The id of a built class, building or instantiating it if needed.
    pub(crate) fn ensure_class(&mut self, name: &str, line: Line) -> QuillResult<ClassId> {
        if let Some(id) = self.classes.id(name) {
            return Ok(id);
        }

        if name.contains(TEMPLATE_SEPARATOR) {
            let Type::Class(canonical) = self.instantiate_template(name, line)? else {
                return Err(QuillError::unknown_type(name, line));
            };
            return self
                .instance_id(&canonical)
                .ok_or_else(|| QuillError::unknown_type(name, line));
        }

        match self.pending.remove(name) {
            Some(decl) => self.build_class(&decl),
            None => Err(QuillError::unknown_type(name, line)),
        }
    }

    /// Build a concrete class from its declaration and store it.
    ///
    /// The name must already be registered.
    pub(crate) fn build_class(&mut self, decl: &ClassDecl) -> QuillResult<ClassId> {
        let superclass = match &decl.superclass {
            Some(parent) => Some(self.ensure_class(parent, decl.line)?),
            None => None,
        };
        let mut def = ClassDef::new(&decl.name, superclass, decl.line);

        for field in &decl.members.fields {
            let what = format!("field `{}`", field.name);
            let ty = self.member_type(&field.ty, false, &what, field.line)?;
            let default = self.field_default(&ty, field)?;
            def.add_field(FieldDef {
                ty,
                name: field.name.clone(),
                default,
                line: field.line,
            })?;
        }

        for method in &decl.members.methods {
            let return_type = self.member_type(
                &method.return_ty,
                true,
                &format!("the return of method `{}`", method.name),
                method.line,
            )?;
            let params = method
                .params
                .iter()
                .map(|param| {
                    Ok(ParamDef {
                        ty: self.member_type(
                            &param.ty,
                            false,
                            &format!("parameter `{}`", param.name),
                            method.line,
                        )?,
                        name: param.name.clone(),
                    })
                })
                .collect::<QuillResult<Vec<_>>>()?;

            def.add_method(MethodDef {
                name: method.name.clone(),
                return_type,
                params,
                body: method.body.clone(),
                line: method.line,
            })?;
        }

        let id = self.classes.insert(def)?;
        tracing::debug!(class = %decl.name, ?id, "class built");
        Ok(id)
    }

    /// Resolve the type token of a field, parameter or return.
    ///
    /// Invocations are instantiated on demand. Anything else must be a
    /// primitive or a registered class.
    fn member_type(
        &mut self,
        token: &str,
        allow_void: bool,
        what: &str,
        line: Line,
    ) -> QuillResult<Type> {
        if token.contains(TEMPLATE_SEPARATOR) {
            return self.instantiate_template(token, line);
        }

        let ty = Type::from_token(token);
        if let Some(template) = ty.class_name().and_then(|name| self.templates.get(name)) {
            return Err(QuillError::template_argument_count(
                &template.name,
                template.arity(),
                0,
                line,
            ));
        }

        let valid = if allow_void {
            self.registry.is_valid_return_type(token)
        } else {
            self.registry.is_valid_type(token)
        };

        if valid {
            Ok(ty)
        } else {
            Err(QuillError::type_mismatch(
                format!("invalid type `{token}` for {what}"),
                line,
            ))
        }
    }

    fn field_default(&self, ty: &Type, field: &FieldDecl) -> QuillResult<Value> {
        let Some(atom) = &field.default else {
            return Value::default_for(ty).ok_or_else(|| {
                QuillError::type_mismatch(
                    format!("field `{}` cannot have type `{ty}`", field.name),
                    field.line,
                )
            });
        };

        let literal = Literal::parse(&atom.text).ok_or_else(|| {
            QuillError::type_mismatch(
                format!(
                    "default value of field `{}` must be a constant, found `{}`",
                    field.name, atom.text
                ),
                field.line,
            )
        })?;
        self.bind_literal(ty, &literal, field.line)
    }

    // Boundary used by the executor

    /// Create an object of `class_name` with every field at its default.
    ///
    /// Template invocations are instantiated if this is their first use.
    pub fn instantiate(&mut self, class_name: &str, line: Line) -> QuillResult<ObjectRef> {
        let id = self.ensure_class(class_name, line)?;

        let fields = self
            .classes
            .ancestors(id)
            .flat_map(|(_, def)| def.fields.iter())
            .map(|field| FieldSlot {
                name: field.name.clone(),
                ty: field.ty.clone(),
                value: field.default.clone(),
            })
            .collect();

        let name = self.classes.get(id).name.clone();
        tracing::trace!(class = %name, "object created");
        Ok(share(Object::new(id, name, fields)))
    }

    /// Resolve the type token of a local variable.
    pub fn resolve_type(&mut self, token: &str, line: Line) -> QuillResult<Type> {
        self.member_type(token, false, "local variable", line)
    }

    pub fn check_type_compatibility(
        &self,
        declared: &Type,
        actual: &Type,
        for_assignment: bool,
    ) -> bool {
        self.registry
            .compatible(declared, actual, for_assignment)
            .unwrap_or(false)
    }

    /// Check whether `descendant` is `ancestor` or one of its subclasses.
    pub fn is_subtype(&self, ancestor: &str, descendant: &str) -> bool {
        self.registry
            .is_subtype(ancestor, descendant)
            .unwrap_or(false)
    }

    /// Require that values of the two types can be compared with `==`/`!=`.
    pub fn check_comparison(&self, left: &Type, right: &Type, line: Line) -> QuillResult<()> {
        self.registry
            .check_comparison(left, right, line)
            .map_err(|err| err.or_line(line))
    }

    /// Check `value` against a slot declared as `declared` and return it.
    ///
    /// Nulls keep their original tag: a `Dog`-null stored in an `Animal`
    /// slot is still a `Dog`-null.
    pub fn bind_value(&self, declared: &Type, value: Value, line: Line) -> QuillResult<Value> {
        let actual = value.static_type();
        if self.is_assignable(declared, &actual, line)? {
            Ok(value)
        } else {
            Err(QuillError::type_mismatch(
                format!("expected a value of type `{declared}`, found `{actual}`"),
                line,
            ))
        }
    }

    /// Convert a literal for a slot declared as `declared` and check it.
    pub fn bind_literal(
        &self,
        declared: &Type,
        literal: &Literal,
        line: Line,
    ) -> QuillResult<Value> {
        let value = Value::from_literal(literal, declared).ok_or_else(|| {
            QuillError::type_mismatch(
                format!("`{literal}` is not a value of type `{declared}`"),
                line,
            )
        })?;
        self.bind_value(declared, value, line)
    }

    /// Store `value` into a field of `object` after checking it against the
    /// field's declared type.
    pub fn assign_field(
        &self,
        object: &ObjectRef,
        field: &str,
        value: Value,
        line: Line,
    ) -> QuillResult<()> {
        let declared = {
            let object = object.borrow();
            match object.slot(field) {
                Some(slot) => slot.ty.clone(),
                None => return Err(QuillError::unknown_field(object.class_name(), field, line)),
            }
        };

        let value = self.bind_value(&declared, value, line)?;
        if let Some(slot) = object.borrow_mut().slot_mut(field) {
            slot.value = value;
        }
        Ok(())
    }

    pub(crate) fn is_assignable(
        &self,
        declared: &Type,
        actual: &Type,
        line: Line,
    ) -> QuillResult<bool> {
        self.registry
            .compatible(declared, actual, true)
            .map_err(|err| err.or_line(line))
    }

    // Accessors

    pub fn config(&self) -> &SemaConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn classes(&self) -> &ClassTable {
        &self.classes
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    #[inline]
    pub fn class(&self, id: ClassId) -> &ClassDef {
        self.classes.get(id)
    }

    pub fn class_id(&self, name: &str) -> Option<ClassId> {
        self.classes.id(name)
    }
}

/// Class and template names must not collide with primitive keywords or
/// contain the template separator.
fn check_class_name(name: &str, line: Line) -> QuillResult<()> {
    if name.contains(TEMPLATE_SEPARATOR) {
        return Err(QuillError::malformed(
            format!("class name `{name}` cannot contain `{TEMPLATE_SEPARATOR}`"),
            line,
        ));
    }
    if !matches!(Type::from_token(name), Type::Class(_)) {
        return Err(QuillError::malformed(
            format!("`{name}` is a built-in type and cannot name a class"),
            line,
        ));
    }
    Ok(())
}
