//! Transport backed by reqwest.

use super::HttpExecutor;
use crate::config::ClientConfig;
use crate::error::{RestError, Result};
use crate::models::{HttpMethod, HttpRequestMessage, HttpResponse};
use async_trait::async_trait;
use log::debug;
use std::time::Instant;

/// Executes request messages with a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestExecutor {
    client: reqwest::Client,
}

impl ReqwestExecutor {
    /// Wraps an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Builds a client from settings: timeout, redirects, TLS validation and
    /// user agent.
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RestError::Configuration(format!("Cannot build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
        HttpMethod::Trace => reqwest::Method::TRACE,
        HttpMethod::Connect => reqwest::Method::CONNECT,
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, message: &HttpRequestMessage) -> Result<HttpResponse> {
        let start_time = Instant::now();
        let url = message.full_url()?;
        debug!("[{}] {} {}", message.id, message.method, url);

        let mut req_builder = self
            .client
            .request(to_reqwest_method(message.method), url);

        for (name, value) in &message.headers {
            req_builder = req_builder.header(name.as_str(), value.as_str());
        }

        if let Some(body) = &message.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response.bytes().await?.to_vec();
        let duration = start_time.elapsed();
        debug!(
            "[{}] {} {} in {:?} ({} bytes)",
            message.id,
            status_code,
            status_text,
            duration,
            body.len()
        );

        Ok(HttpResponse {
            status_code,
            status_text,
            headers,
            body,
            duration,
        })
    }
}
