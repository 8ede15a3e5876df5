//! Transport-level HTTP request message.
//!
//! [`HttpRequestMessage`] is what request builders mutate. It is deliberately
//! independent of the transport so builders can be tested without a client.

use serde::{Deserialize, Serialize};

/// HTTP request method.
///
/// Represents all standard HTTP methods as defined in RFC 7231 and RFC 5789.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET method - retrieve a resource
    Get,
    /// HTTP POST method - submit data to create a resource
    Post,
    /// HTTP PUT method - replace a resource
    Put,
    /// HTTP DELETE method - remove a resource
    Delete,
    /// HTTP PATCH method - partially modify a resource
    Patch,
    /// HTTP OPTIONS method - describe communication options
    Options,
    /// HTTP HEAD method - retrieve headers only
    Head,
    /// HTTP TRACE method - perform a message loop-back test
    Trace,
    /// HTTP CONNECT method - establish a tunnel to the server
    Connect,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }

    /// Parses a method name, ignoring case.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a valid HTTP method, `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            "PATCH" => Some(HttpMethod::Patch),
            "OPTIONS" => Some(HttpMethod::Options),
            "HEAD" => Some(HttpMethod::Head),
            "TRACE" => Some(HttpMethod::Trace),
            "CONNECT" => Some(HttpMethod::Connect),
            _ => None,
        }
    }

    /// Whether requests with this method conventionally carry a body.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An HTTP request message under construction.
///
/// Builders receive the message by value and hand it back, so a message is
/// always owned by exactly one stage of the pipeline at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRequestMessage {
    /// Unique identifier used to correlate log lines for this request.
    pub id: String,

    /// HTTP method (GET, POST, PUT, DELETE, etc.).
    pub method: HttpMethod,

    /// Target URL without the query string.
    pub url: String,

    /// Request headers in insertion order.
    ///
    /// Names keep the casing they were set with; lookups ignore case.
    pub headers: Vec<(String, String)>,

    /// Query string pairs in insertion order, not yet encoded.
    pub query: Vec<(String, String)>,

    /// Optional request body.
    pub body: Option<String>,
}

impl HttpRequestMessage {
    /// Creates a message with a fresh id and no headers, query or body.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `url` - Target URL
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Sets a header, replacing any existing header with the same name.
    ///
    /// # Arguments
    ///
    /// * `name` - Header name (compared case-insensitively)
    /// * `value` - Header value
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            *slot = (name, value);
        } else {
            self.headers.push((name, value));
        }
    }

    /// Gets a header value by name, ignoring case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Removes a header by name, ignoring case.
    ///
    /// # Returns
    ///
    /// The removed value, if the header was present.
    pub fn remove_header(&mut self, name: &str) -> Option<String> {
        let index = self
            .headers
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))?;
        Some(self.headers.remove(index).1)
    }

    /// Appends a query pair. Repeated names are kept.
    pub fn add_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.query.push((name.into(), value.into()));
    }

    /// Sets the request body.
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = Some(body.into());
    }

    /// Checks if the request has a non-empty body.
    pub fn has_body(&self) -> bool {
        self.body.as_ref().map_or(false, |b| !b.is_empty())
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Returns the URL with the query pairs form-encoded and appended.
    ///
    /// # Returns
    ///
    /// `Err(RestError::InvalidUrl)` if the URL cannot be parsed.
    pub fn full_url(&self) -> crate::error::Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}
