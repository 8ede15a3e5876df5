//! Request-supplied headers and header models.

/// Ordered list of header name/value pairs.
pub type HeaderCollection = Vec<(String, String)>;

/// Capability for requests that supply their own headers.
///
/// A request may also name a header model registered on
/// [`RestOptions`](crate::options::RestOptions); the model's headers are
/// applied first and the request's own headers override them.
pub trait RequestHeader: Send + Sync {
    /// Headers to attach to the request.
    fn headers(&self) -> HeaderCollection;

    /// Name of the header model to apply, if any.
    fn header_model_name(&self) -> Option<&str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TraceHeaders;

    impl RequestHeader for TraceHeaders {
        fn headers(&self) -> HeaderCollection {
            vec![("X-Trace-Id".to_string(), "abc".to_string())]
        }
    }

    #[test]
    fn test_header_model_name_defaults_to_none() {
        let headers = TraceHeaders;
        assert_eq!(headers.header_model_name(), None);
        assert_eq!(headers.headers().len(), 1);
    }
}
