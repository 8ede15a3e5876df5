//! Response paired with the serializer options needed to decode it.

use crate::error::{HttpRequestError, Result};
use crate::models::HttpResponse;
use crate::serializer::SerializerOptions;
use serde::de::DeserializeOwned;

/// Immutable snapshot of a response and its decoding options.
#[derive(Debug, Clone)]
pub struct RestResponseContext {
    response: HttpResponse,
    serializer: SerializerOptions,
}

impl RestResponseContext {
    /// Creates a context. Both parts are required.
    pub fn new(response: HttpResponse, serializer: SerializerOptions) -> Self {
        Self {
            response,
            serializer,
        }
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn serializer(&self) -> &SerializerOptions {
        &self.serializer
    }

    pub fn status(&self) -> u16 {
        self.response.status_code
    }

    pub fn is_success(&self) -> bool {
        self.response.is_success()
    }

    /// Fails unless the status is 2xx.
    ///
    /// # Returns
    ///
    /// `Err(HttpRequestError)` whose message names the status code and
    /// reason phrase.
    pub fn ensure_success(&self) -> std::result::Result<&Self, HttpRequestError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(HttpRequestError::with_message(format!(
                "Response status code does not indicate success: {} ({})",
                self.response.status_code, self.response.status_text
            )))
        }
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        self.response.body_text()
    }

    /// Decodes the body as JSON under the context's serializer options.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        self.serializer.deserialize(&self.response.body)
    }

    pub fn into_response(self) -> HttpResponse {
        self.response
    }
}
