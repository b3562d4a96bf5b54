//! Predicates classifying parameter values. All of them are total.

use crate::params::Value;

pub fn is_string(v: &Value) -> bool {
    matches!(v, Value::Str(_))
}

/// True for anything that is not a non-empty string, including `Null`
/// and values of other kinds.
pub fn is_string_empty(v: Option<&Value>) -> bool {
    match v {
        Some(Value::Str(s)) => s.is_empty(),
        _ => true,
    }
}

pub fn is_array(v: &Value) -> bool {
    matches!(v, Value::List(_))
}

/// True for finite numbers and for strings that parse entirely as a
/// base-10 integer or float (`"5"`, `"-2"`, `"1.5"`, but not `"3abc"`).
pub fn is_number(v: &Value) -> bool {
    match v {
        Value::Int(_) => true,
        Value::Float(n) => n.is_finite(),
        Value::Str(s) => s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok_and(f64::is_finite),
        _ => false,
    }
}

pub fn is_object(v: &Value) -> bool {
    matches!(v, Value::Map(_))
}

pub fn is_date(v: &Value) -> bool {
    matches!(v, Value::Date(_))
}
