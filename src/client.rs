//! Request dispatcher.
//!
//! [`RestClient`] turns a [`RestRequest`] into an [`HttpRequestMessage`] by
//! running the registered builders stage by stage, layers on default headers,
//! header models and authentication, then sends the message.

use crate::builder::{header::validate_header, BuilderRegistry};
use crate::config::{get_config, ClientConfig};
use crate::context::RestResponseContext;
use crate::error::{RestError, Result};
use crate::executor::{HttpExecutor, ReqwestExecutor};
use crate::models::{HttpMethod, HttpRequestMessage};
use crate::options::RestOptions;
use crate::request::{DefinitionStage, RequestAttribute, RequestHeader, RestRequest};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Dispatches typed requests through the builder pipeline.
#[derive(Clone)]
pub struct RestClient {
    options: Arc<RestOptions>,
    builders: Arc<BuilderRegistry>,
    executor: Arc<dyn HttpExecutor>,
}

impl RestClient {
    /// Creates a client from explicit settings.
    ///
    /// Uses the default builders unless the options' resolver supplies a
    /// [`BuilderRegistry`].
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate().map_err(RestError::Configuration)?;
        let options = RestOptions::from_config(config);
        let executor = ReqwestExecutor::from_config(config)?;
        Ok(Self::with_parts(options, None, Arc::new(executor)))
    }

    /// Creates a client from the global configuration.
    pub fn from_global_config() -> Result<Self> {
        Self::from_config(&get_config())
    }

    /// Assembles a client from its parts.
    ///
    /// # Arguments
    ///
    /// * `options` - Shared request options
    /// * `builders` - Builder registry; when `None`, one is resolved from the
    ///   options or the defaults are used
    /// * `executor` - Transport used to send messages
    pub fn with_parts(
        options: RestOptions,
        builders: Option<BuilderRegistry>,
        executor: Arc<dyn HttpExecutor>,
    ) -> Self {
        let builders = match builders {
            Some(registry) => Arc::new(registry),
            None => options
                .resolve::<BuilderRegistry>()
                .unwrap_or_else(|| Arc::new(BuilderRegistry::with_defaults(options.serializer.clone()))),
        };
        Self {
            options: Arc::new(options),
            builders,
            executor,
        }
    }

    pub fn options(&self) -> &RestOptions {
        &self.options
    }

    pub fn builders(&self) -> &BuilderRegistry {
        &self.builders
    }

    /// Builds the HTTP message for a request without sending it.
    ///
    /// Start-stage builders run for every attribute before any
    /// complete-stage builder. Headers are then applied in order: defaults,
    /// the named header model, the request's own headers, and finally the
    /// authentication header.
    pub fn build_message(&self, request: &dyn RestRequest) -> Result<HttpRequestMessage> {
        let attributes = request.attributes();
        if let Some(attribute) = attributes
            .iter()
            .find(|a| !self.builders.supports(&a.kind()))
        {
            return Err(RestError::NoBuilder(attribute.kind()));
        }

        let prepared = Prepared {
            request,
            fields: request.fields()?,
            attributes,
        };
        let mut message = HttpRequestMessage::new(HttpMethod::Get, self.options.base_url.clone());

        for stage in DefinitionStage::ALL {
            for attribute in &prepared.attributes {
                let kind = attribute.kind();
                if let Some(builder) = self.builders.select(stage, &kind) {
                    debug!("[{}] {} stage: {} handles {}", message.id, stage, builder.name(), kind);
                    message = builder.build(attribute, &prepared, message)?;
                }
            }
        }

        self.apply_headers(request, &mut message)?;
        self.apply_authentication(request, &mut message)?;
        Ok(message)
    }

    fn apply_headers(&self, request: &dyn RestRequest, message: &mut HttpRequestMessage) -> Result<()> {
        for (name, value) in &self.options.default_headers {
            if message.header(name).is_none() {
                validate_header(name, value)?;
                message.set_header(name.clone(), value.clone());
            }
        }

        let Some(header) = request.header() else {
            return Ok(());
        };

        if let Some(model_name) = header.header_model_name() {
            let model = self
                .options
                .header_models
                .get(model_name)
                .ok_or_else(|| RestError::UnknownHeaderModel(model_name.to_string()))?;
            for (name, value) in model {
                validate_header(name, value)?;
                message.set_header(name.clone(), value.clone());
            }
        }

        for (name, value) in header.headers() {
            validate_header(&name, &value)?;
            message.set_header(name, value);
        }
        Ok(())
    }

    fn apply_authentication(
        &self,
        request: &dyn RestRequest,
        message: &mut HttpRequestMessage,
    ) -> Result<()> {
        let Some(provider) = self.options.authentication_provider() else {
            return Ok(());
        };
        if let Some(value) = provider(request) {
            validate_header("Authorization", &value)?;
            message.set_header("Authorization", value);
        }
        Ok(())
    }

    /// Builds and sends a request.
    pub async fn send(&self, request: &dyn RestRequest) -> Result<RestResponseContext> {
        let message = self.build_message(request)?;
        let response = self.executor.execute(&message).await?;
        Ok(RestResponseContext::new(
            response,
            self.options.serializer.clone(),
        ))
    }

    /// Sends a request, requires a 2xx status, and decodes the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, request: &dyn RestRequest) -> Result<T> {
        let context = self.send(request).await?;
        context.ensure_success()?;
        context.json()
    }
}

/// A request whose attributes and fields are computed once per build.
struct Prepared<'a> {
    request: &'a dyn RestRequest,
    attributes: Vec<RequestAttribute>,
    fields: Value,
}

impl RestRequest for Prepared<'_> {
    fn attributes(&self) -> Vec<RequestAttribute> {
        self.attributes.clone()
    }

    fn fields(&self) -> Result<Value> {
        Ok(self.fields.clone())
    }

    fn header(&self) -> Option<&dyn RequestHeader> {
        self.request.header()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("options", &self.options)
            .field("builders", &self.builders)
            .finish_non_exhaustive()
    }
}
