//! Turns an operation and its parameters into a request url.
//!
//! Validation stops at the first failing parameter. Nothing here touches
//! the network or holds state between calls.

use crate::catalog::{Endpoint, Kind, QueryMode};
use crate::error::TypeError;
use crate::params::{Params, Value};
use crate::validation::{is_array, is_date, is_number, is_object, is_string, is_string_empty};

/// Checks applied to every bag whatever the operation.
pub fn validate_common(params: &Params) -> Result<(), TypeError> {
    let checks: [(&str, Kind, fn(&Value) -> bool); 4] = [
        ("type", Kind::String, is_string),
        ("expanded", Kind::ArrayOfString, is_array),
        ("offset", Kind::Number, is_number),
        ("limit", Kind::Number, is_number),
    ];
    for (name, kind, check) in checks {
        match params.get(name) {
            Some(value) if !check(value) => return Err(TypeError::new(name, kind)),
            _ => {}
        }
    }
    Ok(())
}

fn matches_kind(kind: Kind, value: &Value) -> bool {
    match kind {
        Kind::String => is_string(value),
        Kind::NonEmptyString => !is_string_empty(Some(value)),
        Kind::Number => is_number(value),
        Kind::Timestamp => is_number(value) || is_date(value),
        Kind::ArrayOfString => is_array(value),
        Kind::Object => is_object(value),
    }
}

/// Checks required parameters in declaration order, then the optional
/// ones that are present.
pub fn validate_operation(endpoint: &Endpoint, params: &Params) -> Result<(), TypeError> {
    for param in endpoint.params.iter().filter(|p| p.required) {
        let value = params.get(param.name);
        let valid = match param.kind {
            Kind::String | Kind::NonEmptyString => !is_string_empty(value),
            kind => value.is_some_and(|v| matches_kind(kind, v)),
        };
        if !valid {
            return Err(TypeError::new(param.name, param.kind));
        }
    }
    for param in endpoint.params.iter().filter(|p| !p.required) {
        if let Some(value) = params.get(param.name) {
            if !matches_kind(param.kind, value) {
                return Err(TypeError::new(param.name, param.kind));
            }
        }
    }
    Ok(())
}

/// Substitutes `{name}` placeholders with the percent-encoded path values.
pub fn resolve_path(endpoint: &Endpoint, params: &Params) -> Result<String, TypeError> {
    let mut path = endpoint.path.to_string();
    for param in endpoint.path_params() {
        let value = params
            .get(param.name)
            .ok_or_else(|| TypeError::new(param.name, param.kind))?;
        let placeholder = format!("{{{}}}", param.name);
        path = path.replace(&placeholder, &urlencoding::encode(&value.to_query_string()));
    }
    Ok(path)
}

/// Restricts the bag to the query parameters the endpoint declares.
///
/// This is a projection on keys: a declared parameter set to `0` or an
/// empty list is kept, undeclared keys are dropped. Pass-through
/// operations forward every key except those set to `Null`.
pub fn select_query_params(endpoint: &Endpoint, params: &Params) -> Vec<(String, String)> {
    match endpoint.query {
        QueryMode::Declared => endpoint
            .query_params()
            .filter_map(|p| {
                params
                    .get(p.name)
                    .map(|v| (p.name.to_string(), v.to_query_string()))
            })
            .collect(),
        QueryMode::PassThrough => params
            .iter()
            .filter(|(_, v)| **v != Value::Null)
            .map(|(k, v)| (k.to_string(), v.to_query_string()))
            .collect(),
    }
}

/// `k1=v1&k2=v2`, every key and value percent-encoded on its own.
pub fn encode_query(query: &[(String, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

pub fn build_url(base_url: &str, path: &str, query: &[(String, String)]) -> String {
    let base_url = base_url.trim_end_matches('/');
    let encoded = encode_query(query);
    if encoded.is_empty() {
        format!("{base_url}/{path}")
    } else {
        format!("{base_url}/{path}?{encoded}")
    }
}

/// Runs the whole pipeline for one call.
pub fn prepare(base_url: &str, endpoint: &Endpoint, params: &Params) -> Result<String, TypeError> {
    validate_common(params)?;
    validate_operation(endpoint, params)?;
    let path = resolve_path(endpoint, params)?;
    let query = select_query_params(endpoint, params);
    Ok(build_url(base_url, &path, &query))
}
