use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::catalog::Kind;
use crate::error::TypeError;
use crate::validation::is_object;

/// A single value in a parameter bag.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    List(Vec<String>),
    Map(BTreeMap<String, Value>),
    Date(DateTime<Utc>),
    Null,
}

impl Value {
    /// Text placed in the query string, before percent-encoding.
    pub fn to_query_string(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            Value::Float(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::List(items) => items.join(","),
            Value::Map(_) => serde_json::Value::from(self.clone()).to_string(),
            Value::Date(d) => d.timestamp().to_string(),
            Value::Null => "null".into(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Str(s.clone())
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Int(n.into())
                }
            }
        )*
    };
}

int_value!(i32, i64, u8, u16, u32);

// past i64::MAX only an approximation can be sent
macro_rules! wide_int_value {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    i64::try_from(n).map_or(Value::Float(n as f64), Value::Int)
                }
            }
        )*
    };
}

wide_int_value!(u64, usize);

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<Vec<&str>> for Value {
    fn from(items: Vec<&str>) -> Self {
        Value::List(items.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Value {
    fn from(items: [&str; N]) -> Self {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| match item {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })
                    .collect(),
            ),
            serde_json::Value::Object(map) => {
                Value::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(value: Value) -> Self {
        match value {
            Value::Str(s) => s.into(),
            Value::Int(n) => n.into(),
            Value::Float(n) => n.into(),
            Value::Bool(b) => b.into(),
            Value::List(items) => items.into(),
            Value::Map(map) => serde_json::Value::Object(
                map.into_iter().map(|(k, v)| (k, v.into())).collect(),
            ),
            Value::Date(d) => d.timestamp().into(),
            Value::Null => serde_json::Value::Null,
        }
    }
}

/// Caller-supplied parameters for one operation call.
///
/// Keys keep their insertion order; setting a key twice replaces the
/// value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params(Vec<(String, Value)>);

impl Params {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builder form of [`Params::set`].
    pub fn with<K: Into<String>, V: Into<Value>>(mut self, key: K, value: V) -> Self {
        self.set(key, value);
        self
    }

    /// Builder form of [`Params::set_opt`].
    pub fn with_opt<K: Into<String>, V: Into<Value>>(mut self, key: K, value: Option<V>) -> Self {
        self.set_opt(key, value);
        self
    }

    pub fn set<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((key, value)),
        }
    }

    /// Sets `key` when `value` is `Some`; `None` leaves the bag untouched.
    pub fn set_opt<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: Option<V>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Builds a bag from a JSON object. Anything else is rejected.
    pub fn from_json(json: serde_json::Value) -> Result<Self, TypeError> {
        let value = Value::from(json);
        if !is_object(&value) {
            return Err(TypeError::new("params", Kind::Object));
        }
        match value {
            Value::Map(map) => Ok(map.into_iter().collect()),
            _ => Err(TypeError::new("params", Kind::Object)),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}
