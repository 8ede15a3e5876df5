//! Serializes remaining request fields into a JSON body.

use super::RequestBuilder;
use crate::error::{RestError, Result};
use crate::models::HttpRequestMessage;
use crate::request::{
    field_map, query_fields, route_fields, AttributeKind, RequestAttribute, RestRequest,
};
use crate::serializer::SerializerOptions;
use log::debug;
use serde_json::Value;

/// Handles [`RequestAttribute::Body`].
///
/// Fields used by route placeholders or sent by a query attribute are left
/// out of the body. A query attribute with no field names takes every
/// unrouted field, leaving the body empty.
#[derive(Debug, Clone, Default)]
pub struct BodyBuilder {
    serializer: SerializerOptions,
}

impl BodyBuilder {
    pub fn new(serializer: SerializerOptions) -> Self {
        Self { serializer }
    }
}

impl RequestBuilder for BodyBuilder {
    fn can_build(&self, kind: &AttributeKind) -> bool {
        *kind == AttributeKind::Body
    }

    fn build(
        &self,
        attribute: &RequestAttribute,
        request: &dyn RestRequest,
        mut message: HttpRequestMessage,
    ) -> Result<HttpRequestMessage> {
        if *attribute != RequestAttribute::Body {
            return Err(RestError::Build(format!(
                "body builder cannot handle '{}' attributes",
                attribute.kind()
            )));
        }

        let attributes = request.attributes();
        let mut fields = field_map(request)?;
        let mut excluded = route_fields(&attributes);
        excluded.extend(query_fields(&attributes, &fields));

        fields.retain(|name, _| !excluded.contains(name));

        if !message.method.allows_body() {
            debug!(
                "[{}] attaching a body to a {} request",
                message.id, message.method
            );
        }

        let body = self.serializer.to_wire(Value::Object(fields));
        message.set_body(serde_json::to_string(&body)?);
        if message.content_type().is_none() {
            message.set_header("Content-Type", "application/json");
        }
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::request::to_fields;
    use serde::Serialize;

    #[derive(Serialize)]
    struct CreateIssue {
        repo: String,
        notify: bool,
        issue_title: String,
        assignee: Option<String>,
    }

    impl RestRequest for CreateIssue {
        fn attributes(&self) -> Vec<RequestAttribute> {
            vec![
                RequestAttribute::route(HttpMethod::Post, "/repos/{repo}/issues"),
                RequestAttribute::query(["notify"]),
                RequestAttribute::Body,
            ]
        }

        fn fields(&self) -> Result<Value> {
            to_fields(self)
        }
    }

    fn issue() -> CreateIssue {
        CreateIssue {
            repo: "cargo".into(),
            notify: true,
            issue_title: "Build fails".into(),
            assignee: None,
        }
    }

    fn message() -> HttpRequestMessage {
        HttpRequestMessage::new(HttpMethod::Post, "https://api.example.com")
    }

    #[test]
    fn test_body_excludes_route_and_query_fields() {
        let request = issue();
        let built = BodyBuilder::default()
            .build(&RequestAttribute::Body, &request, message())
            .unwrap();

        let body: Value = serde_json::from_str(built.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"issue_title": "Build fails", "assignee": null})
        );
        assert_eq!(built.content_type(), Some("application/json"));
    }

    #[test]
    fn test_body_follows_serializer_options() {
        let request = issue();
        let built = BodyBuilder::new(SerializerOptions::web())
            .build(&RequestAttribute::Body, &request, message())
            .unwrap();

        assert_eq!(built.body.as_deref(), Some(r#"{"issueTitle":"Build fails"}"#));
    }

    #[test]
    fn test_existing_content_type_is_kept() {
        let request = issue();
        let mut initial = message();
        initial.set_header("content-type", "application/vnd.api+json");
        let built = BodyBuilder::default()
            .build(&RequestAttribute::Body, &request, initial)
            .unwrap();
        assert_eq!(built.content_type(), Some("application/vnd.api+json"));
    }

    #[derive(Serialize)]
    struct SearchOrg {
        org: String,
        term: String,
    }

    impl RestRequest for SearchOrg {
        fn attributes(&self) -> Vec<RequestAttribute> {
            vec![
                RequestAttribute::route(HttpMethod::Post, "/orgs/{org}/search"),
                RequestAttribute::query(Vec::<String>::new()),
                RequestAttribute::Body,
            ]
        }

        fn fields(&self) -> Result<Value> {
            to_fields(self)
        }
    }

    #[test]
    fn test_open_query_leaves_nothing_for_body() {
        let request = SearchOrg {
            org: "a".into(),
            term: "rust".into(),
        };
        let built = BodyBuilder::default()
            .build(&RequestAttribute::Body, &request, message())
            .unwrap();

        assert_eq!(built.body.as_deref(), Some("{}"));
    }
}
