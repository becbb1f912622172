use crate::{
    registry::Condition,
    value::{Value, loose_cmp, loose_eq, strict_eq},
};
use std::{cmp::Ordering, collections::BTreeMap};

/// Every operator token the registry is seeded with.
pub const BUILTIN_TOKENS: [&str; 12] = [
    "within", "between", ">", ">=", "<", "<=", "*=", "^=", "$=", "=", "==", "!=",
];

pub(super) fn builtin_conditions() -> BTreeMap<String, Condition> {
    let entries: [(&str, fn(Option<&Value>, &Value) -> bool); 12] = [
        ("within", within),
        ("between", between),
        (">", gt),
        (">=", gte),
        ("<", lt),
        ("<=", lte),
        ("*=", contains),
        ("^=", starts_with),
        ("$=", ends_with),
        ("=", eq),
        ("==", eq_strict),
        ("!=", ne),
    ];

    entries
        .into_iter()
        .map(|(token, f)| (token.to_string(), Condition::new(f)))
        .collect()
}

///
/// MEMBERSHIP
///

// Linear scan of a list operand under loose equality.
fn within(field: Option<&Value>, operand: &Value) -> bool {
    let Some(items) = operand.as_list() else {
        return false;
    };

    items.iter().any(|item| eq(field, item))
}

// Inclusive range `operand[0] <= field <= operand[1]`.
fn between(field: Option<&Value>, operand: &Value) -> bool {
    let Some([low, high, ..]) = operand.as_list() else {
        return false;
    };

    gte(field, low) && lte(field, high)
}

///
/// ORDERING
///

fn ordered(field: Option<&Value>, operand: &Value, accept: fn(Ordering) -> bool) -> bool {
    field
        .and_then(|value| loose_cmp(value, operand))
        .is_some_and(accept)
}

fn gt(field: Option<&Value>, operand: &Value) -> bool {
    ordered(field, operand, Ordering::is_gt)
}

fn gte(field: Option<&Value>, operand: &Value) -> bool {
    ordered(field, operand, Ordering::is_ge)
}

fn lt(field: Option<&Value>, operand: &Value) -> bool {
    ordered(field, operand, Ordering::is_lt)
}

fn lte(field: Option<&Value>, operand: &Value) -> bool {
    ordered(field, operand, Ordering::is_le)
}

///
/// TEXT
///

// Text fields match a substring; list fields match a strictly-equal element.
fn contains(field: Option<&Value>, operand: &Value) -> bool {
    match field {
        Some(Value::Text(text)) => operand
            .to_text()
            .is_some_and(|needle| text.contains(needle.as_str())),
        Some(Value::List(items)) => items.iter().any(|item| strict_eq(item, operand)),
        _ => false,
    }
}

fn starts_with(field: Option<&Value>, operand: &Value) -> bool {
    text_pair(field, operand).is_some_and(|(text, affix)| text.starts_with(affix.as_str()))
}

fn ends_with(field: Option<&Value>, operand: &Value) -> bool {
    text_pair(field, operand).is_some_and(|(text, affix)| text.ends_with(affix.as_str()))
}

fn text_pair<'a>(field: Option<&'a Value>, operand: &Value) -> Option<(&'a str, String)> {
    let text = field?.as_text()?;
    let affix = operand.to_text()?;

    Some((text, affix))
}

///
/// EQUALITY
///

// A missing field is loosely equal only to null.
fn eq(field: Option<&Value>, operand: &Value) -> bool {
    field.map_or(operand.is_null(), |value| loose_eq(value, operand))
}

fn eq_strict(field: Option<&Value>, operand: &Value) -> bool {
    field.is_some_and(|value| strict_eq(value, operand))
}

fn ne(field: Option<&Value>, operand: &Value) -> bool {
    !eq(field, operand)
}
