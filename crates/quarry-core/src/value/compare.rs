use crate::value::Value;
use std::{cmp::Ordering, collections::BTreeMap};

/// Total canonical comparator used by field ordering.
///
/// Ordering rules:
/// 1. Kind rank (`Null < Bool < number < Text < List < Map`)
/// 2. Kind-specific comparison for same-ranked values
///
/// Numbers compare through `f64::total_cmp`, so the order stays total even
/// with NaN present.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.rank().cmp(&right.rank());
    if rank != Ordering::Equal {
        return rank;
    }

    canonical_cmp_same_rank(left, right)
}

/// Loose equality with scalar coercion.
///
/// - null equals only null
/// - numbers compare numerically regardless of `Int`/`Float`
/// - number vs text parses the text
/// - bools coerce to 0/1 against numbers and text
/// - collections only equal collections of the same kind, structurally
#[must_use]
pub fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,

        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::List(_), Value::List(_)) | (Value::Map(_), Value::Map(_)) => {
            strict_eq(left, right)
        }
        (Value::List(_) | Value::Map(_), _) | (_, Value::List(_) | Value::Map(_)) => false,

        // Remaining pairs mix numbers, text and bools: compare as numbers.
        _ => match (left.to_number(), right.to_number()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

/// Strict equality: same kind and same value, no coercion.
///
/// `Int` and `Float` are the same kind.
#[must_use]
pub fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Int(_) | Value::Float(_), Value::Int(_) | Value::Float(_)) => {
            left.as_f64() == right.as_f64()
        }
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_eq(x, y))
        }
        (Value::Map(a), Value::Map(b)) => strict_eq_map(a, b),
        _ => false,
    }
}

/// Relational comparison with scalar coercion.
///
/// Two texts compare lexicographically; any other pair is compared as numbers.
/// Returns `None` when either side has no numeric reading.
#[must_use]
pub fn loose_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Value::Text(a), Value::Text(b)) = (left, right) {
        return Some(a.cmp(b));
    }

    let a = left.to_number()?;
    let b = right.to_number()?;

    a.partial_cmp(&b)
}

fn canonical_cmp_same_rank(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::List(a), Value::List(b)) => canonical_cmp_list(a, b),
        (Value::Map(a), Value::Map(b)) => canonical_cmp_map(a, b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Int(a), Value::Float(b)) => canonical_cmp_int_float(*a, *b),
        (Value::Float(a), Value::Int(b)) => canonical_cmp_int_float(*b, *a).reverse(),
        _ => Ordering::Equal,
    }
}

// Exact mixed comparison, consistent with `f64::total_cmp` on floats:
// NaNs sit at the ends and `-0.0` sorts just below `Int(0)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn canonical_cmp_int_float(int: i64, float: f64) -> Ordering {
    const BOUND: f64 = 9_223_372_036_854_775_808.0; // 2^63

    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= BOUND {
        return Ordering::Less;
    }
    if float < -BOUND {
        return Ordering::Greater;
    }

    let whole = float.trunc();
    match int.cmp(&(whole as i64)) {
        Ordering::Equal if float > whole => Ordering::Less,
        Ordering::Equal if float < whole => Ordering::Greater,
        Ordering::Equal if int == 0 && float.is_sign_negative() => Ordering::Greater,
        other => other,
    }
}

fn canonical_cmp_list(left: &[Value], right: &[Value]) -> Ordering {
    for (left, right) in left.iter().zip(right.iter()) {
        let cmp = canonical_cmp(left, right);
        if cmp != Ordering::Equal {
            return cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn canonical_cmp_map(left: &BTreeMap<String, Value>, right: &BTreeMap<String, Value>) -> Ordering {
    for ((left_key, left_value), (right_key, right_value)) in left.iter().zip(right.iter()) {
        let key_cmp = left_key.cmp(right_key);
        if key_cmp != Ordering::Equal {
            return key_cmp;
        }

        let value_cmp = canonical_cmp(left_value, right_value);
        if value_cmp != Ordering::Equal {
            return value_cmp;
        }
    }

    left.len().cmp(&right.len())
}

fn strict_eq_map(left: &BTreeMap<String, Value>, right: &BTreeMap<String, Value>) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|((lk, lv), (rk, rv))| lk == rk && strict_eq(lv, rv))
}
