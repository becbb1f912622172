use super::*;
use crate::record;

fn people() -> Vec<Record> {
    vec![
        record! { "name" => "Bob", "age" => 20 },
        record! { "name" => "Rob", "age" => 42 },
        record! { "name" => "Tim", "age" => 21 },
        record! { "name" => "Sam", "age" => 20 },
    ]
}

fn names(rows: &[&Record]) -> Vec<String> {
    rows.iter()
        .map(|r| r.get("name").and_then(Value::as_text).unwrap_or("").to_string())
        .collect()
}

fn sorted(records: &[Record], order: &OrderSpec) -> Vec<String> {
    let mut rows: Vec<&Record> = records.iter().collect();
    apply_order(&mut rows, order);
    names(&rows)
}

#[test]
fn ascending_field_order_is_stable() {
    let records = people();

    assert_eq!(
        sorted(&records, &OrderSpec::asc("age")),
        ["Bob", "Sam", "Tim", "Rob"]
    );
}

#[test]
fn descending_field_order_keeps_ties_in_input_order() {
    let records = people();

    assert_eq!(
        sorted(&records, &OrderSpec::desc("age")),
        ["Rob", "Tim", "Bob", "Sam"]
    );
}

#[test]
fn text_fields_sort_lexicographically() {
    let records = people();

    assert_eq!(
        sorted(&records, &OrderSpec::asc("name")),
        ["Bob", "Rob", "Sam", "Tim"]
    );
}

#[test]
fn missing_fields_sort_as_null() {
    let records = vec![
        record! { "name" => "a", "rank" => 2 },
        record! { "name" => "b" },
        record! { "name" => "c", "rank" => Value::Null },
        record! { "name" => "d", "rank" => 1 },
    ];

    assert_eq!(
        sorted(&records, &OrderSpec::asc("rank")),
        ["b", "c", "d", "a"]
    );
    assert_eq!(
        sorted(&records, &OrderSpec::desc("rank")),
        ["a", "d", "b", "c"]
    );
}

#[test]
fn mixed_kinds_follow_canonical_rank() {
    let records = vec![
        record! { "name" => "text", "v" => "x" },
        record! { "name" => "float", "v" => 1.5 },
        record! { "name" => "bool", "v" => true },
        record! { "name" => "int", "v" => 1 },
    ];

    assert_eq!(
        sorted(&records, &OrderSpec::asc("v")),
        ["bool", "int", "float", "text"]
    );
}

#[test]
fn comparator_order_is_delegated() {
    let records = people();
    let by_name_desc = OrderSpec::comparator(|a, b| {
        let name = |r: &Record| r.get("name").and_then(Value::as_text).unwrap_or("").to_string();
        name(b).cmp(&name(a))
    });

    assert_eq!(
        sorted(&records, &by_name_desc),
        ["Tim", "Sam", "Rob", "Bob"]
    );
}

#[test]
fn constant_comparator_keeps_input_order() {
    let records = people();
    let flat = OrderSpec::comparator(|_, _| Ordering::Equal);

    assert_eq!(sorted(&records, &flat), ["Bob", "Rob", "Tim", "Sam"]);
}

#[test]
fn direction_helpers() {
    assert_eq!(OrderDirection::from_descending(true), OrderDirection::Desc);
    assert_eq!(OrderDirection::from_descending(false), OrderDirection::Asc);
    assert!(OrderDirection::Desc.is_desc());
    assert_eq!(OrderDirection::Desc.apply(Ordering::Less), Ordering::Greater);
    assert_eq!(OrderDirection::Asc.apply(Ordering::Less), Ordering::Less);
}

#[test]
fn empty_field_name_is_rejected() {
    for field in ["", "   "] {
        let err = OrderSpec::asc(field).validate().unwrap_err();
        assert!(matches!(err, QueryError::InvalidOrderSpec { .. }));
    }

    assert!(OrderSpec::asc("age").validate().is_ok());
    assert!(OrderSpec::comparator(|_, _| Ordering::Equal).validate().is_ok());
}
