//! Adds request fields to the query string.

use super::RequestBuilder;
use crate::error::{RestError, Result};
use crate::models::HttpRequestMessage;
use crate::request::{
    field_map, query_selection, scalar_to_string, AttributeKind, RequestAttribute, RestRequest,
};
use crate::serializer::SerializerOptions;
use serde_json::Value;

/// Handles [`RequestAttribute::Query`].
///
/// Arrays become repeated pairs and null or missing fields are skipped.
/// Parameter names follow the serializer's naming policy.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    serializer: SerializerOptions,
}

impl QueryBuilder {
    pub fn new(serializer: SerializerOptions) -> Self {
        Self { serializer }
    }
}

impl RequestBuilder for QueryBuilder {
    fn can_build(&self, kind: &AttributeKind) -> bool {
        *kind == AttributeKind::Query
    }

    fn build(
        &self,
        attribute: &RequestAttribute,
        request: &dyn RestRequest,
        mut message: HttpRequestMessage,
    ) -> Result<HttpRequestMessage> {
        let RequestAttribute::Query { fields: names } = attribute else {
            return Err(RestError::Build(format!(
                "query builder cannot handle '{}' attributes",
                attribute.kind()
            )));
        };

        let fields = field_map(request)?;
        let selected = query_selection(names, &request.attributes(), &fields);

        for name in selected {
            let wire_name = self.serializer.wire_name(&name);
            match fields.get(&name) {
                None | Some(Value::Null) => {}
                Some(Value::Array(items)) => {
                    for item in items {
                        let value = scalar_to_string(item).ok_or_else(|| nested(&name))?;
                        message.add_query(wire_name.clone(), value);
                    }
                }
                Some(value) => {
                    let value = scalar_to_string(value).ok_or_else(|| nested(&name))?;
                    message.add_query(wire_name, value);
                }
            }
        }
        Ok(message)
    }
}

fn nested(name: &str) -> RestError {
    RestError::Build(format!("query field '{}' must be a scalar or list of scalars", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HttpMethod;
    use crate::request::to_fields;
    use crate::serializer::NamingPolicy;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Search {
        org: String,
        page_size: u32,
        tags: Vec<String>,
        cursor: Option<String>,
    }

    impl RestRequest for Search {
        fn attributes(&self) -> Vec<RequestAttribute> {
            vec![
                RequestAttribute::route(HttpMethod::Get, "/orgs/{org}/search"),
                RequestAttribute::query(Vec::<String>::new()),
            ]
        }

        fn fields(&self) -> Result<Value> {
            to_fields(self)
        }
    }

    fn search() -> Search {
        Search {
            org: "acme".into(),
            page_size: 20,
            tags: vec!["a".into(), "b".into()],
            cursor: None,
        }
    }

    fn message() -> HttpRequestMessage {
        HttpRequestMessage::new(HttpMethod::Get, "https://api.example.com")
    }

    #[test]
    fn test_all_unconsumed_fields() {
        let request = search();
        let built = QueryBuilder::default()
            .build(&request.attributes()[1], &request, message())
            .unwrap();

        assert_eq!(
            built.query,
            vec![
                ("page_size".to_string(), "20".to_string()),
                ("tags".to_string(), "a".to_string()),
                ("tags".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn test_explicit_fields_use_naming_policy() {
        let request = search();
        let builder = QueryBuilder::new(SerializerOptions {
            naming: NamingPolicy::CamelCase,
            ..SerializerOptions::default()
        });
        let built = builder
            .build(&RequestAttribute::query(["page_size", "cursor"]), &request, message())
            .unwrap();

        assert_eq!(built.query, vec![("pageSize".to_string(), "20".to_string())]);
    }

    #[test]
    fn test_nested_objects_are_rejected() {
        struct Nested;
        impl RestRequest for Nested {
            fn attributes(&self) -> Vec<RequestAttribute> {
                vec![RequestAttribute::query(["filter"])]
            }
            fn fields(&self) -> Result<Value> {
                Ok(serde_json::json!({"filter": {"a": 1}}))
            }
        }

        let err = QueryBuilder::default()
            .build(&RequestAttribute::query(["filter"]), &Nested, message())
            .unwrap_err();
        assert!(err.to_string().contains("'filter'"));
    }
}
