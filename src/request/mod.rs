//! Typed request definitions.
//!
//! A [`RestRequest`] describes one call: the attributes that say how it maps
//! onto HTTP, the field values that fill route placeholders, query and body,
//! and optionally its own headers.

pub mod attribute;
pub mod definition;
pub mod header;

pub use attribute::{AttributeKind, RequestAttribute};
pub use definition::DefinitionStage;
pub use header::{HeaderCollection, RequestHeader};

use crate::error::{RestError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

/// A typed request that can be turned into an HTTP message.
pub trait RestRequest: Send + Sync {
    /// Attributes in declaration order.
    fn attributes(&self) -> Vec<RequestAttribute>;

    /// Field values as a JSON object.
    ///
    /// Requests with data usually implement this with [`to_fields`].
    fn fields(&self) -> Result<Value> {
        Ok(Value::Object(Map::new()))
    }

    /// Headers supplied by the request itself.
    fn header(&self) -> Option<&dyn RequestHeader> {
        None
    }
}

/// Serializes a value into the field object expected by [`RestRequest::fields`].
///
/// # Returns
///
/// `Err(RestError::Build)` if the value serializes to anything other than an
/// object or `null`.
pub fn to_fields<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    match serde_json::to_value(value)? {
        Value::Null => Ok(Value::Object(Map::new())),
        object @ Value::Object(_) => Ok(object),
        other => Err(RestError::Build(format!(
            "request fields must serialize to an object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Returns the request's fields as a map.
pub fn field_map(request: &dyn RestRequest) -> Result<Map<String, Value>> {
    match request.fields()? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(RestError::Build(format!(
            "request fields must be an object, got {}",
            json_type_name(&other)
        ))),
    }
}

/// Names of the `{placeholder}`s in a route template, in order.
pub fn route_placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|c| c[1].to_string())
        .collect()
}

/// Replaces each `{placeholder}` in a template using `lookup`.
///
/// Stops at the first placeholder for which `lookup` fails.
pub fn render_template<F>(template: &str, mut lookup: F) -> Result<String>
where
    F: FnMut(&str) -> Result<String>,
{
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;
    for captures in PLACEHOLDER.captures_iter(template) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        rendered.push_str(&template[last..whole.start()]);
        rendered.push_str(&lookup(&captures[1])?);
        last = whole.end();
    }
    rendered.push_str(&template[last..]);
    Ok(rendered)
}

/// Field names consumed by route placeholders.
pub fn route_fields(attributes: &[RequestAttribute]) -> HashSet<String> {
    attributes
        .iter()
        .filter_map(|a| match a {
            RequestAttribute::Route { template, .. } => Some(route_placeholders(template)),
            _ => None,
        })
        .flatten()
        .collect()
}

/// Field names one query attribute sends, in order.
///
/// An empty `names` list selects every field not consumed by a route
/// placeholder.
pub fn query_selection(
    names: &[String],
    attributes: &[RequestAttribute],
    fields: &Map<String, Value>,
) -> Vec<String> {
    if !names.is_empty() {
        return names.to_vec();
    }
    let consumed = route_fields(attributes);
    fields
        .keys()
        .filter(|name| !consumed.contains(*name))
        .cloned()
        .collect()
}

/// Field names sent as query parameters by any query attribute.
pub fn query_fields(
    attributes: &[RequestAttribute],
    fields: &Map<String, Value>,
) -> HashSet<String> {
    attributes
        .iter()
        .filter_map(|a| match a {
            RequestAttribute::Query { fields: names } => {
                Some(query_selection(names, attributes, fields))
            }
            _ => None,
        })
        .flatten()
        .collect()
}

/// Renders a scalar JSON value as it appears in a URL.
///
/// Returns `None` for null, arrays and objects.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
