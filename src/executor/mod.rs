//! HTTP transport.
//!
//! The client hands finished [`HttpRequestMessage`]s to an [`HttpExecutor`].
//! [`ReqwestExecutor`] is the default; tests and callers can plug in their
//! own transport.

pub mod native;

pub use native::ReqwestExecutor;

use crate::error::Result;
use crate::models::{HttpRequestMessage, HttpResponse};
use async_trait::async_trait;

/// Sends a built request message and returns the complete response.
#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, message: &HttpRequestMessage) -> Result<HttpResponse>;
}
