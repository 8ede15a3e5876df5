//! Type-keyed service lookup.
//!
//! Builders and the client ask the resolver for collaborators by type at the
//! moment they need them, so options can be assembled before every service
//! exists.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A shared service instance.
pub type Service = Arc<dyn Any + Send + Sync>;

/// Looks up a service by its type.
pub type Resolver = Arc<dyn Fn(TypeId) -> Option<Service> + Send + Sync>;

/// Map from type to a single shared instance of that type.
#[derive(Default, Clone)]
pub struct ServiceRegistry {
    services: HashMap<TypeId, Service>,
}

impl ServiceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a value, replacing any earlier value of the same type.
    pub fn register<T: Any + Send + Sync>(&mut self, value: T) -> &mut Self {
        self.register_shared(Arc::new(value))
    }

    /// Registers an already shared value.
    pub fn register_shared<T: Any + Send + Sync>(&mut self, value: Arc<T>) -> &mut Self {
        self.services.insert(TypeId::of::<T>(), value);
        self
    }

    /// Gets the value registered for `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.services
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|s| s.downcast::<T>().ok())
    }

    /// Whether a value is registered for `T`.
    pub fn contains<T: Any>(&self) -> bool {
        self.services.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Freezes the registry into a resolver function.
    pub fn into_resolver(self) -> Resolver {
        let services = Arc::new(self.services);
        Arc::new(move |type_id| services.get(&type_id).cloned())
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("services", &self.services.len())
            .finish()
    }
}
