//! Authentication header providers.
//!
//! An [`AuthenticationHeaderValueProvider`] inspects a request and decides
//! the value of its `Authorization` header. Returning `None` leaves the
//! request unauthenticated.

use crate::request::RestRequest;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::sync::Arc;

/// Computes the `Authorization` header value for a request.
pub type AuthenticationHeaderValueProvider =
    Arc<dyn Fn(&dyn RestRequest) -> Option<String> + Send + Sync>;

/// Credentials that render to a standard `Authorization` value.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthScheme {
    /// HTTP Basic authentication (RFC 7617)
    Basic { username: String, password: String },
    /// Bearer token authentication (RFC 6750)
    Bearer { token: String },
}

impl AuthScheme {
    /// Renders the `Authorization` header value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rest_dispatch::auth::AuthScheme;
    ///
    /// let basic = AuthScheme::Basic { username: "user".into(), password: "pass123".into() };
    /// assert_eq!(basic.header_value(), "Basic dXNlcjpwYXNzMTIz");
    ///
    /// let bearer = AuthScheme::Bearer { token: "abc123xyz".into() };
    /// assert_eq!(bearer.header_value(), "Bearer abc123xyz");
    /// ```
    pub fn header_value(&self) -> String {
        match self {
            AuthScheme::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                format!("Basic {}", encoded)
            }
            AuthScheme::Bearer { token } => format!("Bearer {}", token),
        }
    }

    /// Parses an `Authorization` header value.
    ///
    /// The scheme name is matched exactly. Basic credentials split on the
    /// first colon, so passwords may contain colons.
    ///
    /// # Returns
    ///
    /// `None` for unknown schemes, bad base64, or empty credentials.
    pub fn parse(header: &str) -> Option<Self> {
        let header = header.trim();
        if let Some(encoded) = header.strip_prefix("Basic ") {
            let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
            let (username, password) = decoded.split_once(':')?;
            return Some(AuthScheme::Basic {
                username: username.to_string(),
                password: password.to_string(),
            });
        }
        if let Some(token) = header.strip_prefix("Bearer ") {
            let token = token.trim();
            if token.is_empty() {
                return None;
            }
            return Some(AuthScheme::Bearer {
                token: token.to_string(),
            });
        }
        None
    }
}

impl fmt::Debug for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthScheme::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
            AuthScheme::Bearer { .. } => f.debug_struct("Bearer").field("token", &"***").finish(),
        }
    }
}

/// Wraps a closure as a provider.
pub fn from_fn<F>(f: F) -> AuthenticationHeaderValueProvider
where
    F: Fn(&dyn RestRequest) -> Option<String> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Provider that attaches the same scheme to every request.
pub fn scheme(scheme: AuthScheme) -> AuthenticationHeaderValueProvider {
    let value = scheme.header_value();
    from_fn(move |_| Some(value.clone()))
}

/// Provider that attaches `Bearer <token>` to every request.
pub fn bearer(token: impl Into<String>) -> AuthenticationHeaderValueProvider {
    scheme(AuthScheme::Bearer {
        token: token.into(),
    })
}

/// Provider that attaches Basic credentials to every request.
pub fn basic(username: impl Into<String>, password: impl Into<String>) -> AuthenticationHeaderValueProvider {
    scheme(AuthScheme::Basic {
        username: username.into(),
        password: password.into(),
    })
}
