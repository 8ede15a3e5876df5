//! Integration tests module for rest-dispatch
//!
//! Shared request types and test setup for the integration suites.

pub mod dispatch_test;
pub mod pipeline_test;

use rest_dispatch::{
    to_fields, HeaderCollection, HttpMethod, RequestAttribute, RequestHeader, RestRequest, Result,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// `GET /users/{id}` with optional query parameters.
#[derive(Debug, Clone, Serialize)]
pub struct GetUser {
    pub id: u64,
    pub include_teams: Option<bool>,
}

impl RestRequest for GetUser {
    fn attributes(&self) -> Vec<RequestAttribute> {
        vec![
            RequestAttribute::route(HttpMethod::Get, "/users/{id}"),
            RequestAttribute::query(["include_teams"]),
        ]
    }

    fn fields(&self) -> Result<Value> {
        to_fields(self)
    }
}

/// `POST /orgs/{org}/users` with a JSON body and tenant headers.
#[derive(Debug, Clone, Serialize)]
pub struct CreateUser {
    pub org: String,
    pub user_name: String,
    pub email: Option<String>,
    #[serde(skip)]
    pub tenant: Option<String>,
}

impl RestRequest for CreateUser {
    fn attributes(&self) -> Vec<RequestAttribute> {
        vec![
            RequestAttribute::route(HttpMethod::Post, "/orgs/{org}/users"),
            RequestAttribute::header("X-Api-Version", "2024-01"),
            RequestAttribute::Body,
        ]
    }

    fn fields(&self) -> Result<Value> {
        to_fields(self)
    }

    fn header(&self) -> Option<&dyn RequestHeader> {
        Some(self)
    }
}

impl RequestHeader for CreateUser {
    fn headers(&self) -> HeaderCollection {
        vec![("Idempotency-Key".to_string(), format!("create-{}", self.user_name))]
    }

    fn header_model_name(&self) -> Option<&str> {
        self.tenant.as_deref()
    }
}
