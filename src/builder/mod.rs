//! Request builders and their registry.
//!
//! A [`RequestBuilder`] turns one [`RequestAttribute`] into changes on an
//! [`HttpRequestMessage`]. The [`BuilderRegistry`] picks the builder for each
//! attribute by matching its [`AttributeKind`] type tag.
//!
//! # Selection
//!
//! For a given stage and attribute kind, candidates are the builders whose
//! [`stage`](RequestBuilder::stage) equals that stage and whose
//! [`can_build`](RequestBuilder::can_build) accepts the kind. The candidate
//! with the highest [`priority`](RequestBuilder::priority) runs; on a tie the
//! one registered first runs. Exactly one builder handles each attribute.

pub mod body;
pub mod header;
pub mod query;
pub mod route;

pub use body::BodyBuilder;
pub use header::HeaderBuilder;
pub use query::QueryBuilder;
pub use route::RouteBuilder;

use crate::error::Result;
use crate::models::HttpRequestMessage;
use crate::request::{AttributeKind, DefinitionStage, RequestAttribute, RestRequest};
use crate::serializer::SerializerOptions;
use std::fmt;
use std::sync::Arc;

/// Applies one kind of attribute to a request message.
pub trait RequestBuilder: Send + Sync {
    /// Whether this builder handles attributes of `kind`.
    fn can_build(&self, kind: &AttributeKind) -> bool;

    /// Applies `attribute` from `request` to `message` and returns it.
    fn build(
        &self,
        attribute: &RequestAttribute,
        request: &dyn RestRequest,
        message: HttpRequestMessage,
    ) -> Result<HttpRequestMessage>;

    /// Pipeline stage this builder runs in.
    fn stage(&self) -> DefinitionStage {
        DefinitionStage::Complete
    }

    /// Higher priorities win when several builders accept the same kind.
    fn priority(&self) -> i32 {
        0
    }

    /// Name used in log output.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Ordered collection of request builders.
#[derive(Clone, Default)]
pub struct BuilderRegistry {
    builders: Vec<Arc<dyn RequestBuilder>>,
}

impl BuilderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the route, query, header and body builders.
    ///
    /// # Arguments
    ///
    /// * `serializer` - Options the query and body builders use for field names
    pub fn with_defaults(serializer: SerializerOptions) -> Self {
        let mut registry = Self::new();
        registry
            .register(RouteBuilder)
            .register(QueryBuilder::new(serializer.clone()))
            .register(HeaderBuilder)
            .register(BodyBuilder::new(serializer));
        registry
    }

    /// Appends a builder.
    pub fn register<B: RequestBuilder + 'static>(&mut self, builder: B) -> &mut Self {
        self.register_shared(Arc::new(builder))
    }

    /// Appends an already shared builder.
    pub fn register_shared(&mut self, builder: Arc<dyn RequestBuilder>) -> &mut Self {
        self.builders.push(builder);
        self
    }

    /// Selects the builder for `kind` at `stage`.
    ///
    /// # Returns
    ///
    /// The highest-priority matching builder, earliest registered on ties,
    /// or `None` if no builder at this stage accepts the kind.
    pub fn select(
        &self,
        stage: DefinitionStage,
        kind: &AttributeKind,
    ) -> Option<&Arc<dyn RequestBuilder>> {
        let mut selected: Option<&Arc<dyn RequestBuilder>> = None;
        for builder in &self.builders {
            if builder.stage() != stage || !builder.can_build(kind) {
                continue;
            }
            match selected {
                Some(current) if current.priority() >= builder.priority() => {}
                _ => selected = Some(builder),
            }
        }
        selected
    }

    /// Whether any builder, at any stage, accepts `kind`.
    pub fn supports(&self, kind: &AttributeKind) -> bool {
        self.builders.iter().any(|b| b.can_build(kind))
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl fmt::Debug for BuilderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.builders.iter().map(|b| (b.name(), b.stage(), b.priority())))
            .finish()
    }
}
