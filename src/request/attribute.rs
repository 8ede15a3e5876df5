//! Request attributes and their type tags.

use crate::models::HttpMethod;
use std::fmt;

/// Type tag used to match an attribute against registered builders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Route,
    Query,
    Header,
    Body,
    /// Application-defined attribute, matched by name.
    Custom(String),
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Route => write!(f, "route"),
            AttributeKind::Query => write!(f, "query"),
            AttributeKind::Header => write!(f, "header"),
            AttributeKind::Body => write!(f, "body"),
            AttributeKind::Custom(name) => write!(f, "custom:{}", name),
        }
    }
}

/// Metadata describing how part of a request maps onto an HTTP message.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestAttribute {
    /// Method plus a path template such as `/users/{id}`.
    ///
    /// Placeholders are filled from the request's fields and the rendered
    /// path is joined onto the base URL.
    Route {
        method: HttpMethod,
        template: String,
    },

    /// Field names to send as query parameters.
    ///
    /// An empty list means every field not consumed by the route.
    Query { fields: Vec<String> },

    /// A fixed header.
    Header { name: String, value: String },

    /// Send the fields not consumed by route or query as a JSON body.
    Body,

    /// Application-defined attribute handled by a custom builder.
    Custom { kind: String, value: String },
}

impl RequestAttribute {
    /// Shorthand for a route attribute.
    pub fn route(method: HttpMethod, template: impl Into<String>) -> Self {
        RequestAttribute::Route {
            method,
            template: template.into(),
        }
    }

    /// Shorthand for a query attribute over the given fields.
    pub fn query<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RequestAttribute::Query {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Shorthand for a header attribute.
    pub fn header(name: impl Into<String>, value: impl Into<String>) -> Self {
        RequestAttribute::Header {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Shorthand for a custom attribute.
    pub fn custom(kind: impl Into<String>, value: impl Into<String>) -> Self {
        RequestAttribute::Custom {
            kind: kind.into(),
            value: value.into(),
        }
    }

    /// Returns the type tag of this attribute.
    pub fn kind(&self) -> AttributeKind {
        match self {
            RequestAttribute::Route { .. } => AttributeKind::Route,
            RequestAttribute::Query { .. } => AttributeKind::Query,
            RequestAttribute::Header { .. } => AttributeKind::Header,
            RequestAttribute::Body => AttributeKind::Body,
            RequestAttribute::Custom { kind, .. } => AttributeKind::Custom(kind.clone()),
        }
    }
}
