#![cfg(test)]

use pretty_assertions::assert_eq;

use super::*;

fn store<const N: usize>(pairs: [(&str, Value); N]) -> VariableStore {
    pairs.into_iter().collect()
}

#[test]
fn present_names_resolve_to_their_value() {
    let binding = ContextBinding::new(store([
        ("x", Value::number(5.0)),
        ("name", Value::string("moqui")),
        ("on", Value::bool(true)),
    ]));

    assert_eq!(binding.get("x"), Ok(Value::number(5.0)));
    assert_eq!(binding.get("name"), Ok(Value::string("moqui")));
    assert_eq!(binding.get("on"), Ok(Value::bool(true)));
}

#[test]
fn absent_names_resolve_to_nil() {
    let binding = ContextBinding::new(store([("x", Value::number(5.0))]));

    assert_eq!(binding.get("x"), Ok(Value::number(5.0)));
    assert_eq!(binding.get("y"), Ok(Value::Nil));
    assert!(binding.has("y"));
}

#[test]
fn empty_store_reads_nil_and_reports_everything() {
    let binding = ContextBinding::new(VariableStore::new());

    assert_eq!(binding.get("anything"), Ok(Value::Nil));
    assert!(binding.has("anything"));
    assert!(binding.has(""));
}

#[test]
fn nil_entry_is_indistinguishable_from_absent() {
    let binding = ContextBinding::new(store([("flag", Value::Nil)]));

    assert_eq!(binding.get("flag"), Ok(Value::Nil));
    assert_eq!(binding.get("flag"), binding.get("missing"));
    assert!(binding.variables().contains("flag"));
    assert!(!binding.variables().contains("missing"));
}

#[test]
fn lookups_are_idempotent_and_side_effect_free() {
    let vars = store([("x", Value::number(1.0))]);
    let binding = ContextBinding::new(vars.clone());

    for _ in 0..3 {
        assert_eq!(binding.get("x"), Ok(Value::number(1.0)));
        assert_eq!(binding.get("y"), Ok(Value::Nil));
        assert!(binding.has("x"));
        assert!(binding.has("y"));
    }
    assert_eq!(vars.len(), 1);
    assert!(!vars.contains("y"));
}

#[test]
fn store_is_shared_not_copied() {
    let vars = VariableStore::new();
    let binding = ContextBinding::new(vars.clone());
    assert!(binding.variables().ptr_eq(&vars));

    vars.insert("late", Value::string("host"));
    assert_eq!(binding.get("late"), Ok(Value::string("host")));

    binding.set("from_script", Value::number(2.0));
    assert_eq!(vars.get("from_script"), Some(Value::number(2.0)));

    assert_eq!(binding.remove("late"), Some(Value::string("host")));
    assert_eq!(vars.get("late"), None);
    assert_eq!(binding.get("late"), Ok(Value::Nil));
}

#[test]
fn strict_binding_reports_missing_variables() {
    let binding = StrictBinding::new(store([("x", Value::number(5.0)), ("flag", Value::Nil)]));

    assert_eq!(binding.get("x"), Ok(Value::number(5.0)));
    assert_eq!(binding.get("flag"), Ok(Value::Nil));
    assert_eq!(
        binding.get("y"),
        Err(BindingError::MissingVariable("y".to_string()))
    );
    assert!(binding.has("x"));
    assert!(binding.has("flag"));
    assert!(!binding.has("y"));

    binding.set("y", Value::bool(false));
    assert!(binding.has("y"));
    assert_eq!(binding.get("y"), Ok(Value::bool(false)));
}

#[test]
fn binding_kind_selects_policy() {
    let vars = VariableStore::new();

    let context = BindingKind::default().bind(vars.clone());
    assert_eq!(context.get("nope"), Ok(Value::Nil));
    assert!(context.has("nope"));

    let strict = BindingKind::Strict.bind(vars.clone());
    assert!(strict.get("nope").is_err());
    assert!(!strict.has("nope"));

    assert!(context.variables().ptr_eq(strict.variables()));
}

#[test]
fn store_snapshot_is_sorted() {
    let vars = store([
        ("b", Value::number(2.0)),
        ("a", Value::number(1.0)),
        ("c", Value::Nil),
    ]);

    assert_eq!(vars.names(), vec!["a", "b", "c"]);
    assert_eq!(
        vars.snapshot(),
        vec![
            ("a".to_string(), Value::number(1.0)),
            ("b".to_string(), Value::number(2.0)),
            ("c".to_string(), Value::Nil),
        ]
    );
    assert_eq!(format!("{vars:?}"), r#"{"a": Number(1), "b": Number(2), "c": Nil}"#);
}

#[test]
fn value_operations() {
    let one = Value::number(1.0);
    let two = Value::number(2.0);
    let hi = Value::string("hi");

    assert_eq!(one.add(&two), Ok(Value::number(3.0)));
    assert_eq!(hi.add(&Value::string(" there")), Ok(Value::string("hi there")));
    assert_eq!(hi.add(&one), Err(InvalidOp::Binary("<string>", "<number>")));
    assert_eq!(two.div(&one), Ok(Value::number(2.0)));
    assert_eq!(one.lt(&two), Ok(Value::bool(true)));
    assert_eq!(Value::Nil.minus(), Err(InvalidOp::Unary("<nil>")));

    assert_eq!(one.eq(&Value::string("1")), Value::bool(false));
    assert_eq!(Value::Nil.eq(&Value::Nil), Value::bool(true));
    assert_eq!(Value::Nil.not(), Value::bool(true));
    assert_eq!(Value::from(None::<f64>), Value::Nil);

    assert_eq!(format!("{}", Value::number(5.0)), "5");
    assert_eq!(format!("{}", Value::number(2.5)), "2.5");
    assert_eq!(format!("{}", Value::Nil), "nil");
}
