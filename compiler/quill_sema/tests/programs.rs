//! End-to-end programs: source text → static phase → `main` through a small
//! statement executor.
//!
//! The executor understands just enough of the body language to drive the
//! core from the outside: `begin`, `print`, `return`, `set`, `call`
//! (including `super` receivers), `new` and `==`.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;
use quill_diagnostic::{ErrorCode, ErrorKind, QuillError, QuillResult};
use quill_ir::{Line, Literal, SExpr};
use quill_sema::{CallFrame, ClassEnv, MethodExecutor, SemaConfig, Type, Value};

/// Control flow out of a statement.
enum Flow {
    Next,
    Return(Option<Value>),
}

#[derive(Default)]
struct Script {
    output: Vec<String>,
}

impl MethodExecutor for Script {
    type Error = QuillError;

    fn execute(&mut self, env: &mut ClassEnv, mut frame: CallFrame) -> QuillResult<Option<Value>> {
        let body = frame.method.body.clone();
        match self.statement(env, &mut frame, &body)? {
            Flow::Next => Ok(None),
            Flow::Return(value) => Ok(value),
        }
    }
}

impl Script {
    fn statement(
        &mut self,
        env: &mut ClassEnv,
        frame: &mut CallFrame,
        stmt: &SExpr,
    ) -> QuillResult<Flow> {
        let list = stmt.as_list().expect("statements are lists");
        let line = list.line;
        match list.head().expect("statement keyword") {
            "begin" => {
                for inner in &list.items[1..] {
                    if let Flow::Return(value) = self.statement(env, frame, inner)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Next)
            }
            "print" => {
                let mut text = String::new();
                for arg in &list.items[1..] {
                    text.push_str(&self.expression(env, frame, arg)?.to_string());
                }
                self.output.push(text);
                Ok(Flow::Next)
            }
            "return" => match list.items.get(1) {
                None => Ok(Flow::Return(None)),
                Some(expr) if expr.is_atom("null") => {
                    let value = env.bind_literal(&frame.method.return_type, &Literal::Null, line)?;
                    Ok(Flow::Return(Some(value)))
                }
                Some(expr) => Ok(Flow::Return(Some(self.expression(env, frame, expr)?))),
            },
            "set" => {
                let name = list.items[1].atom_text().expect("variable name");
                let declared = match frame.locals.binding(name) {
                    Some(binding) => binding.ty.clone(),
                    None => frame
                        .receiver
                        .borrow()
                        .slot(name)
                        .map(|slot| slot.ty.clone())
                        .expect("known field"),
                };
                let value = if list.items[2].is_atom("null") {
                    env.bind_literal(&declared, &Literal::Null, line)?
                } else {
                    self.expression(env, frame, &list.items[2])?
                };

                // Parameters shadow fields.
                if let Some(binding) = frame.locals.binding_mut(name) {
                    binding.value = env.bind_value(&binding.ty, value, line)?;
                } else {
                    env.assign_field(&frame.receiver, name, value, line)?;
                }
                Ok(Flow::Next)
            }
            _ => {
                self.expression(env, frame, stmt)?;
                Ok(Flow::Next)
            }
        }
    }

    fn expression(
        &mut self,
        env: &mut ClassEnv,
        frame: &CallFrame,
        expr: &SExpr,
    ) -> QuillResult<Value> {
        let Some(list) = expr.as_list() else {
            let text = expr.atom_text().expect("atom");
            if text == "me" {
                return Ok(Value::Object(frame.receiver.clone()));
            }
            if let Some(literal) = Literal::parse(text) {
                return Ok(Value::from_literal(&literal, &Type::Void).expect("non-null literal"));
            }
            if let Some(value) = frame.locals.get(text) {
                return Ok(value.clone());
            }
            return Ok(frame.receiver.borrow().get(text).cloned().expect("known name"));
        };

        let line = list.line;
        match list.head().expect("operator") {
            "new" => {
                let class = list.items[1].atom_text().expect("class name");
                Ok(Value::Object(env.instantiate(class, line)?))
            }
            "==" => {
                // A bare `null` operand takes the type of the other side.
                let (left, right) = (&list.items[1], &list.items[2]);
                let (left, right) = if right.is_atom("null") {
                    let left = self.expression(env, frame, left)?;
                    let right = env.bind_literal(&left.static_type(), &Literal::Null, line)?;
                    (left, right)
                } else {
                    let right = self.expression(env, frame, right)?;
                    let left = if left.is_atom("null") {
                        env.bind_literal(&right.static_type(), &Literal::Null, line)?
                    } else {
                        self.expression(env, frame, left)?
                    };
                    (left, right)
                };
                env.check_comparison(&left.static_type(), &right.static_type(), line)?;
                Ok(Value::Bool(left == right))
            }
            "call" => {
                let method = list.items[2].atom_text().expect("method name");
                let mut args = Vec::new();
                for arg in &list.items[3..] {
                    args.push(self.expression(env, frame, arg)?);
                }
                let result = if list.items[1].is_atom("super") {
                    let from = frame.defining_class;
                    env.call_super(&frame.receiver, from, method, args, line, self)?
                } else {
                    let target = self.expression(env, frame, &list.items[1])?;
                    let object = target.as_object().expect("call on an object").clone();
                    env.resolve_and_call(&object, method, args, line, self)?
                };
                Ok(result.unwrap_or(Value::Bool(false)))
            }
            other => panic!("unsupported expression `{other}`"),
        }
    }
}

fn run(source: &str) -> QuillResult<Vec<String>> {
    let mut env = ClassEnv::load_source(source, SemaConfig::default())?;
    let mut script = Script::default();
    env.run_main(&mut script)?;
    Ok(script.output)
}

#[test]
fn linked_list_of_ints() {
    let output = run("
(tclass Node (field_type)
  (field Node@field_type next null)
  (field field_type value)
  (method void set_val ((field_type v)) (set value v))
  (method void set_next ((Node@field_type n)) (set next n))
  (method field_type get_val () (return value))
  (method Node@field_type get_next () (return next)))

(class main
  (field Node@int head)
  (method void main ()
    (begin
      (set head (new Node@int))
      (call head set_val 5)
      (call head set_next (new Node@int))
      (call (call head get_next) set_val 7)
      (print (call head get_val) \" \" (call (call head get_next) get_val))
      (print (== (call (call head get_next) get_next) null)))))
")
    .unwrap();
    assert_eq!(output, vec!["5 7", "true"]);
}

#[test]
fn distinct_instantiations_are_independent() {
    let output = run("
(tclass Box (T)
  (field T item)
  (method void put ((T x)) (set item x))
  (method T get () (return item)))
(class main
  (method void main ()
    (begin
      (call (new Box@int) put 4)
      (print (call (new Box@string) get) \"|\" (call (new Box@bool) get)))))
")
    .unwrap();
    assert_eq!(output, vec!["|false"]);
}

#[test]
fn wrong_instantiation_rejects_argument() {
    let err = run("
(tclass Box (T) (method void put ((T x)) (print x)))
(class main
  (method void main ()
    (call (new Box@int) put \"four\")))
")
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.line, Some(Line::new(5)));
}

#[test]
fn overriding_and_super() {
    let output = run("
(class Animal
  (method string speak () (return \"...\"))
  (method string describe () (return (call me speak))))
(class Dog inherits Animal
  (method string speak () (return \"woof\")))
(class Puppy inherits Dog
  (method string speak () (return (call super speak))))
(class main
  (method void main ()
    (begin
      (print (call (new Dog) describe))
      (print (call (new Puppy) describe))
      (print (call (new Animal) describe)))))
")
    .unwrap();
    assert_eq!(output, vec!["woof", "woof", "..."]);
}

#[test]
fn covariant_fields_and_rejected_narrowing() {
    let source = "
(class Animal)
(class Dog inherits Animal)
(class main
  (field Animal pet)
  (field Dog dog)
  (method void main ()
    (begin
      (set pet (new Dog))
      (print \"stored\")
      (set dog (new Animal)))))
";
    let err = run(source).unwrap_err();
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.line, Some(Line::new(11)));
}

#[test]
fn null_comparisons_follow_the_hierarchy() {
    let output = run("
(class Animal)
(class Dog inherits Animal)
(class main
  (field Dog dog null)
  (field Animal pet)
  (method void main ()
    (begin
      (set pet dog)
      (print (== pet dog)))))
")
    .unwrap();
    assert_eq!(output, vec!["true"]);

    let err = run("
(class Dog)
(class Robot)
(class main
  (field Dog dog)
  (field Robot robot)
  (method void main () (print (== dog robot))))
")
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.line, Some(Line::new(7)));
}

#[test]
fn fall_off_returns_defaults() {
    let output = run("
(class Dog)
(class Quiet
  (method int n () (print \"\"))
  (method bool b () (print \"\"))
  (method string s () (print \"\"))
  (method Dog d () (print \"\")))
(class main
  (field Quiet q)
  (method void main ()
    (begin
      (set q (new Quiet))
      (print (call q n) \",\" (call q b) \",\" (call q s) \",\" (call q d)))))
")
    .unwrap();
    assert_eq!(output.last().map(String::as_str), Some("0,false,,null"));
}

#[test]
fn arity_mismatch_at_call_site() {
    let err = run("
(class Calc (method int add3 ((int a) (int b) (int c)) (return a)))
(class main
  (method void main ()
    (print (call (new Calc) add3 1 2))))
")
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E2004);
    assert_eq!(err.kind(), ErrorKind::ArityMismatch);
}

#[test]
fn missing_method_at_call_site() {
    let err = run("
(class Dog)
(class main (method void main () (call (new Dog) fly)))
")
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E2003);
    assert_eq!(err.line, Some(Line::new(3)));
}

#[test]
fn cyclic_inheritance_never_runs() {
    let err = run("
(class A inherits C)
(class B inherits A)
(class C inherits B)
(class main (method void main () (print \"unreachable\")))
")
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn syntax_errors_surface_from_loading() {
    assert_eq!(run("(class main").unwrap_err().code, ErrorCode::E0002);
    assert_eq!(run("(class main (field string s \"open").unwrap_err().code, ErrorCode::E0001);
    assert_eq!(run("(class main (field int))").unwrap_err().code, ErrorCode::E1001);
}

#[test]
fn parameters_can_be_reassigned_with_checks() {
    let source = "
(class Animal)
(class Dog inherits Animal)
(class Robot)
(class main
  (field Animal pet)
  (method void adopt ((Animal a))
    (begin (set a (new Dog)) (set pet a) (set a null) (print a)))
  (method void main ()
    (begin (call me adopt (new Animal)) (print (call me describe))))
  (method bool describe () (return (== pet null))))
";
    assert_eq!(run(source).expect("runs"), vec!["null", "false"]);

    let err = run(&source.replace("(set a (new Dog))", "(set a (new Robot))"))
        .expect_err("a Robot is not an Animal");
    assert_eq!(err.code, ErrorCode::E2001);
    assert_eq!(err.line, Some(Line::new(8)));
}
