//! JSON serializer options shared by request bodies and response decoding.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// How object member names are written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingPolicy {
    /// Keep names exactly as the Rust type serializes them.
    #[default]
    AsIs,
    /// `user_name` is written as `userName`.
    CamelCase,
    /// `userName` is written as `user_name`.
    SnakeCase,
}

/// Serializer configuration used to encode bodies and decode responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializerOptions {
    /// Naming policy for object members.
    #[serde(default)]
    pub naming: NamingPolicy,

    /// Drop members whose value is `null` when writing.
    #[serde(default)]
    pub ignore_null_values: bool,

    /// Accept PascalCase, camelCase and snake_case member names on read.
    ///
    /// When a document does not decode as-is, its member names are
    /// normalized to snake_case and decoding is retried, so Rust fields match
    /// regardless of the server's casing.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            naming: NamingPolicy::AsIs,
            ignore_null_values: false,
            case_insensitive: false,
        }
    }
}

impl SerializerOptions {
    /// Options that write camelCase, drop nulls and read any casing.
    pub fn web() -> Self {
        Self {
            naming: NamingPolicy::CamelCase,
            ignore_null_values: true,
            case_insensitive: true,
        }
    }

    /// Serializes a value to a JSON string under these options.
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let value = self.to_wire(serde_json::to_value(value)?);
        Ok(serde_json::to_string(&value)?)
    }

    /// Applies the naming and null policies to an already-built JSON value.
    pub fn to_wire(&self, value: Value) -> Value {
        transform(value, &|name| self.wire_name(name), self.ignore_null_values)
    }

    /// Renames a single member name according to the naming policy.
    pub fn wire_name(&self, name: &str) -> String {
        match self.naming {
            NamingPolicy::AsIs => name.to_string(),
            NamingPolicy::CamelCase => to_camel_case(name),
            NamingPolicy::SnakeCase => to_snake_case(name),
        }
    }

    /// Decodes a JSON document under these options.
    ///
    /// The document is decoded as-is first. When that fails and
    /// `case_insensitive` is set, member names are normalized to snake_case
    /// and decoding is retried, so map keys and types with their own serde
    /// renames are only rewritten when they could not be decoded otherwise.
    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        let value: Value = serde_json::from_slice(bytes)?;
        if !self.case_insensitive {
            return Ok(serde_json::from_value(value)?);
        }

        let normalized = transform(value.clone(), &to_snake_case, false);
        if normalized == value {
            return Ok(serde_json::from_value(value)?);
        }
        match serde_json::from_value(value) {
            Ok(decoded) => Ok(decoded),
            Err(_) => Ok(serde_json::from_value(normalized)?),
        }
    }
}

fn transform(value: Value, rename: &dyn Fn(&str) -> String, drop_nulls: bool) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = Map::with_capacity(map.len());
            for (key, value) in map {
                if drop_nulls && value.is_null() {
                    continue;
                }
                out.insert(rename(&key), transform(value, rename, drop_nulls));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|v| transform(v, rename, drop_nulls))
                .collect(),
        ),
        other => other,
    }
}

/// Converts `snake_case` (or `PascalCase`) to `camelCase`.
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for (i, c) in name.chars().enumerate() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Converts `camelCase` or `PascalCase` to `snake_case`.
///
/// Acronyms stay together: `userID` becomes `user_id` and `HTTPServer`
/// becomes `http_server`.
pub fn to_snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = if i > 0 { Some(chars[i - 1]) } else { None };
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.map_or(false, |n| n.is_lowercase()),
                _ => false,
            };
            if boundary && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
