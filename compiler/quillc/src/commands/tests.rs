use pretty_assertions::assert_eq;
use quill_sema::{ClassEnv, SemaConfig};

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

#[test]
fn check_options_default() {
    let options = parse_check_options(&[]).expect("no flags");
    assert_eq!(options, CheckOptions::default());
    assert_eq!(options.config(), SemaConfig::default());
}

#[test]
fn check_options_flags() {
    let options =
        parse_check_options(&args(&["--max-template-depth=8", "-v"])).expect("valid flags");
    assert_eq!(options.max_template_depth, Some(8));
    assert!(options.verbose);
    assert_eq!(options.config().max_instantiation_depth, 8);
}

#[test]
fn check_options_errors() {
    let err = parse_check_options(&args(&["--max-template-depth=deep"]))
        .expect_err("not a number");
    assert!(err.contains("deep"));

    let err = parse_check_options(&args(&["--fast"])).expect_err("unknown flag");
    assert!(err.contains("--fast"));
}

#[test]
fn explain_known_and_unknown_codes() {
    let doc = explanation("e2005").expect("documented");
    assert!(doc.starts_with("# E2005"));

    let err = explanation("X999").expect_err("not a code");
    assert!(err.starts_with("Unknown error code: X999"));
}

#[test]
fn class_listing() {
    let env = ClassEnv::load_source(
        "(class Animal (field string name \"generic\"))
(class Dog inherits Animal
  (field int age 3)
  (method void fetch ((Animal friend) (int times)) (print times)))
(tclass Box (T) (field T item))
(class main (field Box@Dog kennel))",
        SemaConfig::default(),
    )
    .expect("valid program");

    assert_eq!(
        describe_classes(&env),
        "\
class Animal  # line 1
  field string name = \"generic\"
class Dog inherits Animal  # line 2
  field int age = 3
  method void fetch(Animal friend, int times)
class Box@Dog  # line 5
  field Dog item = null
class main  # line 6
  field Box@Dog kennel = null
"
    );
}
