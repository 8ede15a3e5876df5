//! Shared options consumed by the request pipeline.

pub mod configuration;
pub mod resolver;

pub use configuration::RestOptionsConfiguration;
pub use resolver::{Resolver, Service, ServiceRegistry};

use crate::auth::AuthenticationHeaderValueProvider;
use crate::config::ClientConfig;
use crate::request::HeaderCollection;
use crate::serializer::SerializerOptions;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Options shared by every request a client sends.
#[derive(Clone, Default)]
pub struct RestOptions {
    /// Base URL that route templates are joined onto.
    pub base_url: String,

    /// Headers applied to every request first.
    pub default_headers: HeaderCollection,

    /// Named header groups, applied when a request asks for them.
    pub header_models: HashMap<String, HeaderCollection>,

    /// Serializer used for bodies and handed to response contexts.
    pub serializer: SerializerOptions,

    /// Authentication provider. Takes precedence over one found through
    /// the resolver.
    pub authentication: Option<AuthenticationHeaderValueProvider>,

    /// Service lookup installed by [`RestOptionsConfiguration`].
    pub resolver: Option<Resolver>,
}

impl RestOptions {
    /// Builds options from loaded settings.
    ///
    /// Header maps are sorted by name so requests are built deterministically.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            default_headers: sorted_pairs(&config.default_headers),
            header_models: config
                .header_models
                .iter()
                .map(|(name, headers)| (name.clone(), sorted_pairs(headers)))
                .collect(),
            serializer: config.serializer.clone(),
            authentication: None,
            resolver: None,
        }
    }

    /// Registers a header model.
    pub fn with_header_model(mut self, name: impl Into<String>, headers: HeaderCollection) -> Self {
        self.header_models.insert(name.into(), headers);
        self
    }

    /// Sets the authentication provider.
    pub fn with_authentication(mut self, provider: AuthenticationHeaderValueProvider) -> Self {
        self.authentication = Some(provider);
        self
    }

    /// Looks up a service of type `T` through the installed resolver.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let resolver = self.resolver.as_ref()?;
        resolver(TypeId::of::<T>())?.downcast::<T>().ok()
    }

    /// The authentication provider to use, if any.
    ///
    /// Falls back to a provider registered with the resolver.
    pub fn authentication_provider(&self) -> Option<AuthenticationHeaderValueProvider> {
        self.authentication.clone().or_else(|| {
            self.resolve::<AuthenticationHeaderValueProvider>()
                .map(|provider| provider.as_ref().clone())
        })
    }
}

impl fmt::Debug for RestOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestOptions")
            .field("base_url", &self.base_url)
            .field("default_headers", &self.default_headers)
            .field("header_models", &self.header_models.keys().collect::<Vec<_>>())
            .field("serializer", &self.serializer)
            .field("authentication", &self.authentication.is_some())
            .field("resolver", &self.resolver.is_some())
            .finish()
    }
}

fn sorted_pairs(map: &HashMap<String, String>) -> HeaderCollection {
    let mut pairs: HeaderCollection = map.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
    pairs.sort();
    pairs
}
