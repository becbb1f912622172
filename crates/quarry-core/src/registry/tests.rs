use super::*;
use std::sync::Arc;

// ---- helpers -----------------------------------------------------------

fn builtin(token: &str) -> Condition {
    ConditionRegistry::with_builtins()
        .get(token)
        .unwrap_or_else(|| panic!("missing builtin '{token}'"))
}

fn check(token: &str, field: impl Into<Value>, operand: impl Into<Value>) -> bool {
    builtin(token).test(Some(&field.into()), &operand.into())
}

fn check_missing(token: &str, operand: impl Into<Value>) -> bool {
    builtin(token).test(None, &operand.into())
}

// ---- registry contract -------------------------------------------------

#[test]
fn builtins_cover_every_token() {
    let registry = ConditionRegistry::with_builtins();

    for token in BUILTIN_TOKENS {
        assert!(registry.contains(token), "missing builtin '{token}'");
    }
    assert_eq!(registry.len(), BUILTIN_TOKENS.len());
}

#[test]
fn empty_registry_has_no_tokens() {
    let registry = ConditionRegistry::empty();

    assert!(registry.is_empty());
    assert!(registry.get("=").is_none());
}

#[test]
fn register_overwrites_existing_token() {
    let registry = ConditionRegistry::with_builtins();
    registry.register("=", |_, _| true);

    let eq = registry.get("=").expect("registered");
    assert!(eq.test(Some(&Value::from(1)), &Value::from(2)));
    assert_eq!(registry.len(), BUILTIN_TOKENS.len());
}

#[test]
fn register_accepts_arbitrary_tokens() {
    let registry = ConditionRegistry::empty();
    registry.register("len>", |field, operand| {
        let len = field.and_then(Value::as_text).map_or(0, str::len);
        operand.as_i64().is_some_and(|n| i64::try_from(len).unwrap_or(i64::MAX) > n)
    });

    let cond = registry.get("len>").expect("registered");
    assert!(cond.test(Some(&Value::from("abcd")), &Value::from(3)));
    assert!(!cond.test(Some(&Value::from("ab")), &Value::from(3)));
    assert!(!cond.test(None, &Value::from(0)));
}

#[test]
fn snapshot_is_detached_from_later_registrations() {
    let registry = ConditionRegistry::with_builtins();
    let snapshot = registry.all();
    registry.register("~=", |_, _| true);

    assert!(!snapshot.contains_key("~="));
    assert!(registry.contains("~="));
}

#[test]
fn tokens_are_sorted() {
    let tokens = ConditionRegistry::with_builtins().tokens();
    let mut sorted = tokens.clone();
    sorted.sort();

    assert_eq!(tokens, sorted);
}

#[test]
fn shared_registry_accepts_registration_from_other_threads() {
    let registry = Arc::new(ConditionRegistry::empty());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = Arc::clone(&registry);
            std::thread::spawn(move || registry.register(format!("op{i}"), |_, _| false))
        })
        .collect();
    for handle in handles {
        handle.join().expect("register thread");
    }

    assert_eq!(registry.len(), 4);
}

#[test]
fn global_registry_round_trips_registration() {
    register_condition("global-test-op", |field, _| field.is_none());

    let cond = get_condition("global-test-op").expect("registered globally");
    assert!(cond.test(None, &Value::Null));
    assert!(get_all_conditions().contains_key("global-test-op"));
    assert!(global_registry().contains("global-test-op"));
}

#[test]
fn cloned_condition_shares_function() {
    let cond = builtin("=");
    let copy = cond.clone();

    assert!(cond.ptr_eq(&copy));
}

// ---- builtin semantics -------------------------------------------------

#[test]
fn within_scans_list_operand() {
    let list = Value::from(vec![20, 21, 22, 43]);

    assert!(check("within", 21, list.clone()));
    assert!(check("within", "43", list.clone()));
    assert!(!check("within", 42, list));
    assert!(!check("within", 20, 20));
}

#[test]
fn between_is_inclusive() {
    let range = Value::from(vec![20, 42]);

    assert!(check("between", 20, range.clone()));
    assert!(check("between", 42, range.clone()));
    assert!(check("between", 30.5, range.clone()));
    assert!(!check("between", 43, range.clone()));
    assert!(!check("between", 20, Value::from(vec![20])));
    assert!(!check_missing("between", range));
}

#[test]
fn relational_operators_coerce_numeric_text() {
    assert!(check(">", 42, 25));
    assert!(check(">", 42, "25"));
    assert!(!check(">", 20, "25"));
    assert!(check(">=", 42, 42));
    assert!(check("<", 20, 21));
    assert!(check("<=", 21, 21));
    assert!(!check("<=", 22, 21));
}

#[test]
fn relational_operators_compare_texts_lexicographically() {
    assert!(check("<", "Bob", "Rob"));
    assert!(check(">", "b", "B"));
    assert!(!check(">", "abc", "abd"));
}

#[test]
fn relational_operators_reject_incomparable_values() {
    assert!(!check(">", "abc", 1));
    assert!(!check("<", Value::from(vec![1]), 2));
    assert!(!check_missing(">", 0));
    assert!(!check_missing("<", 0));
}

#[test]
fn text_operators_match_substrings_and_affixes() {
    assert!(check("*=", "Bob", "o"));
    assert!(!check("*=", "Tim", "o"));
    assert!(check("^=", "Tim", "T"));
    assert!(!check("^=", "Bob", "T"));
    assert!(check("$=", "Tim", "m"));
    assert!(!check("$=", "Bob", "m"));
}

#[test]
fn text_operators_render_scalar_operands() {
    assert!(check("*=", "room 101", 10));
    assert!(check("^=", "true story", true));
}

#[test]
fn contains_matches_list_elements_strictly() {
    let tags = Value::from(vec!["admin", "user"]);

    assert!(check("*=", tags.clone(), "admin"));
    assert!(!check("*=", tags, "adm"));
    assert!(!check("*=", Value::from(vec![1, 2]), "1"));
}

#[test]
fn text_operators_ignore_non_text_fields() {
    assert!(!check("^=", 123, "1"));
    assert!(!check("$=", 123, "3"));
    assert!(!check_missing("*=", "a"));
}

#[test]
fn loose_and_strict_equality_differ_on_types() {
    assert!(check("=", 20, "20"));
    assert!(!check("==", 20, "20"));
    assert!(check("==", 20, 20.0));
    assert!(check("=", "Bob", "Bob"));
    assert!(check("!=", "Rob", "Bob"));
    assert!(!check("!=", 20, "20"));
}

#[test]
fn missing_field_only_equals_null() {
    assert!(check_missing("=", Value::Null));
    assert!(!check_missing("=", 0));
    assert!(!check_missing("==", Value::Null));
    assert!(check_missing("!=", "Bob"));
}
