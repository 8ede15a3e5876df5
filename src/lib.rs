//! Attribute-driven HTTP request building and dispatch.
//!
//! Requests are plain Rust types that implement [`RestRequest`]: they list
//! [`RequestAttribute`]s describing how they map onto HTTP and expose their
//! field values as JSON. A [`RestClient`] turns such a request into an
//! [`HttpRequestMessage`] and sends it.
//!
//! # Architecture
//!
//! - **request**: the request trait, attributes, pipeline stages and
//!   request-supplied headers
//! - **builder**: the [`RequestBuilder`] trait, the registry that selects a
//!   builder per attribute, and the built-in route/query/header/body builders
//! - **options**: shared options, the type-keyed resolver and the
//!   configuration hook that installs it
//! - **auth**: authentication header providers
//! - **serializer**: JSON naming and null policies
//! - **executor**: the transport seam and its reqwest implementation
//! - **context**: the response paired with its serializer options
//! - **config**: settings loading and the global configuration
//!
//! # Pipeline
//!
//! 1. The message starts as `GET <base URL>`
//! 2. Start-stage builders run for every attribute (method and path)
//! 3. Complete-stage builders run for every attribute (query, headers, body)
//! 4. Default headers, the request's header model and its own headers apply
//! 5. The authentication provider may add an `Authorization` header
//! 6. The executor sends the message and the response is wrapped in a
//!    [`RestResponseContext`]
//!
//! # Example
//!
//! ```no_run
//! use rest_dispatch::{
//!     to_fields, HttpMethod, RequestAttribute, RestClient, RestRequest, Result,
//! };
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize)]
//! struct GetRepo {
//!     owner: String,
//!     repo: String,
//! }
//!
//! impl RestRequest for GetRepo {
//!     fn attributes(&self) -> Vec<RequestAttribute> {
//!         vec![RequestAttribute::route(HttpMethod::Get, "/repos/{owner}/{repo}")]
//!     }
//!
//!     fn fields(&self) -> Result<serde_json::Value> {
//!         to_fields(self)
//!     }
//! }
//!
//! #[derive(Deserialize)]
//! struct Repo {
//!     full_name: String,
//! }
//!
//! # async fn run() -> Result<()> {
//! let config = rest_dispatch::config::load_config(Some(serde_json::json!({
//!     "rest-client": { "baseUrl": "https://api.github.com" }
//! })))?;
//! let client = RestClient::from_config(&config)?;
//! let repo: Repo = client
//!     .send_json(&GetRepo { owner: "rust-lang".into(), repo: "cargo".into() })
//!     .await?;
//! println!("{}", repo.full_name);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod builder;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod executor;
pub mod models;
pub mod options;
pub mod request;
pub mod serializer;

pub use auth::{AuthScheme, AuthenticationHeaderValueProvider};
pub use builder::{BuilderRegistry, RequestBuilder};
pub use client::RestClient;
pub use config::ClientConfig;
pub use context::RestResponseContext;
pub use error::{HttpRequestError, RestError, Result};
pub use executor::{HttpExecutor, ReqwestExecutor};
pub use models::{HttpMethod, HttpRequestMessage, HttpResponse};
pub use options::{Resolver, RestOptions, RestOptionsConfiguration, ServiceRegistry};
pub use request::{
    to_fields, AttributeKind, DefinitionStage, HeaderCollection, RequestAttribute,
    RequestHeader, RestRequest,
};
pub use serializer::{NamingPolicy, SerializerOptions};
