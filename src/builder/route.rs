//! Sets the method and path of a request.

use super::RequestBuilder;
use crate::error::{RestError, Result};
use crate::models::HttpRequestMessage;
use crate::request::{
    field_map, render_template, scalar_to_string, AttributeKind, DefinitionStage,
    RequestAttribute, RestRequest,
};

/// Handles [`RequestAttribute::Route`] at the start stage.
///
/// Placeholders are filled from the request's fields, each value
/// percent-encoded as a single path segment. Values of `.` or `..` are
/// rejected. Relative routes are joined onto
/// the message URL, which the client initialises to the base URL.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteBuilder;

impl RequestBuilder for RouteBuilder {
    fn can_build(&self, kind: &AttributeKind) -> bool {
        *kind == AttributeKind::Route
    }

    fn build(
        &self,
        attribute: &RequestAttribute,
        request: &dyn RestRequest,
        mut message: HttpRequestMessage,
    ) -> Result<HttpRequestMessage> {
        let RequestAttribute::Route { method, template } = attribute else {
            return Err(RestError::Build(format!(
                "route builder cannot handle '{}' attributes",
                attribute.kind()
            )));
        };

        let fields = field_map(request)?;
        let path = render_template(template, |name| {
            let value = fields.get(name).and_then(scalar_to_string).ok_or_else(|| {
                RestError::Build(format!(
                    "route '{}' needs a scalar value for '{}'",
                    template, name
                ))
            })?;
            path_segment(name, &value)
        })?;

        message.method = *method;
        message.url = join_url(&message.url, &path)?;
        Ok(message)
    }

    fn stage(&self) -> DefinitionStage {
        DefinitionStage::Start
    }
}

/// Percent-encodes a placeholder value as exactly one path segment.
///
/// `.` and `..` are rejected: URL parsing treats them as dot-segments even
/// when percent-encoded, so they would address a different resource.
fn path_segment(name: &str, value: &str) -> Result<String> {
    if value == "." || value == ".." {
        return Err(RestError::Build(format!(
            "route value '{}' for '{}' is a dot-segment",
            value, name
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Joins a rendered route onto a base URL.
///
/// Absolute routes replace the base. Exactly one `/` separates base and path.
fn join_url(base: &str, path: &str) -> Result<String> {
    if path.starts_with("http://") || path.starts_with("https://") {
        url::Url::parse(path)?;
        return Ok(path.to_string());
    }
    if base.is_empty() {
        return Err(RestError::InvalidUrl(format!(
            "relative route '{}' needs a base URL",
            path
        )));
    }

    let joined = match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) if !path.is_empty() => format!("{}/{}", base, path),
        _ => format!("{}{}", base, path),
    };
    url::Url::parse(&joined)?;
    Ok(joined)
}
