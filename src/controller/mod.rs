use crate::context::RequestContext;
use crate::di::Lazy;
use crate::resolver::{ServiceKey, TypeKey};
use async_trait::async_trait;
use axum::{body::Body, http::Request, response::Response};
use std::fmt;
use std::sync::Arc;

/// A request handler selected at dispatch time
///
/// # Example
/// ```
/// use keyed_dispatch::prelude::*;
/// use axum::body::Body;
/// use axum::http::Request;
///
/// struct HomeController;
///
/// #[async_trait]
/// impl Controller for HomeController {
///     async fn execute(&self, _context: &RequestContext, _request: Request<Body>) -> Response {
///         "home".into_response()
///     }
/// }
/// ```
#[async_trait]
pub trait Controller: Send + Sync + 'static {
    async fn execute(&self, context: &RequestContext, request: Request<Body>) -> Response;
}

/// Identity of a concrete controller type
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ControllerType(TypeKey);

impl ControllerType {
    pub fn of<C: Controller>() -> Self {
        Self(TypeKey::of::<C>())
    }

    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Key under which instances of this type are registered
    pub fn key(&self) -> ServiceKey {
        ServiceKey::Type(self.0)
    }
}

impl fmt::Debug for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ControllerType({})", self.name())
    }
}

impl fmt::Display for ControllerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metadata attached to a [`ControllerHandle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerTypeMetadata {
    pub controller_type: ControllerType,
}

/// Deferred controller instance, registered under its `area/name` key.
///
/// The value is `None` when the controller's own registration cannot be
/// satisfied by the resolver it is forced with.
pub type ControllerHandle = Lazy<Option<Arc<dyn Controller>>, ControllerTypeMetadata>;

/// Lookup key for a controller: `lowercase(area + "/" + controller_name)`.
///
/// A missing area contributes an empty prefix.
pub fn service_key(area: Option<&str>, controller_name: &str) -> String {
    format!("{}/{}", area.unwrap_or_default(), controller_name).to_lowercase()
}
