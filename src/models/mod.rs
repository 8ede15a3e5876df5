//! Data models for HTTP request messages and responses.
//!
//! These are the transport-level shapes the builder pipeline produces and the
//! executor consumes.

pub mod request;
pub mod response;

pub use request::{HttpMethod, HttpRequestMessage};
pub use response::HttpResponse;
