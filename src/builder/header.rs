//! Adds fixed headers declared as attributes.

use super::RequestBuilder;
use crate::error::{RestError, Result};
use crate::models::HttpRequestMessage;
use crate::request::{AttributeKind, RequestAttribute, RestRequest};
use reqwest::header::{HeaderName, HeaderValue};

/// Handles [`RequestAttribute::Header`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderBuilder;

impl RequestBuilder for HeaderBuilder {
    fn can_build(&self, kind: &AttributeKind) -> bool {
        *kind == AttributeKind::Header
    }

    fn build(
        &self,
        attribute: &RequestAttribute,
        _request: &dyn RestRequest,
        mut message: HttpRequestMessage,
    ) -> Result<HttpRequestMessage> {
        let RequestAttribute::Header { name, value } = attribute else {
            return Err(RestError::Build(format!(
                "header builder cannot handle '{}' attributes",
                attribute.kind()
            )));
        };

        validate_header(name, value)?;
        message.set_header(name.clone(), value.clone());
        Ok(message)
    }
}

/// Checks that a header name and value are valid HTTP.
pub fn validate_header(name: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(name.as_bytes()).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    HeaderValue::from_str(value).map_err(|e| RestError::InvalidHeader {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
