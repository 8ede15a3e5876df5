//! Installs the service resolver into [`RestOptions`].

use super::resolver::{Resolver, ServiceRegistry};
use super::RestOptions;
use crate::error::{RestError, Result};

/// Configuration hook run once at startup to wire the resolver.
#[derive(Clone)]
pub struct RestOptionsConfiguration {
    resolver: Resolver,
}

impl RestOptionsConfiguration {
    /// Creates a configurator that resolves from the given registry.
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            resolver: services.into_resolver(),
        }
    }

    /// Creates a configurator around an existing resolver.
    pub fn from_resolver(resolver: Resolver) -> Self {
        Self { resolver }
    }

    /// Installs the resolver into `options`.
    ///
    /// # Returns
    ///
    /// `Err(RestError::Configuration)` when no options are supplied.
    pub fn configure(&self, options: Option<&mut RestOptions>) -> Result<()> {
        let options =
            options.ok_or_else(|| RestError::Configuration("options must not be null".into()))?;
        options.resolver = Some(self.resolver.clone());
        Ok(())
    }
}

impl std::fmt::Debug for RestOptionsConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestOptionsConfiguration").finish_non_exhaustive()
    }
}
