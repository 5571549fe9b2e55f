use crate::resolver::Resolver;
use crate::routing::{DataTokens, RouteBase, RouteData};
use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

/// Request extension handing the request's resolution scope to dispatch.
///
/// [`ScopeLayer`](crate::dispatch::ScopeLayer) inserts one for every request; hosts
/// that bring their own container insert their own.
#[derive(Clone)]
pub struct ScopeHandle(Arc<dyn Resolver>);

impl ScopeHandle {
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self(resolver)
    }

    pub fn resolver(&self) -> &Arc<dyn Resolver> {
        &self.0
    }
}

/// Per-request state seen by controller resolution
#[derive(Clone, Default)]
pub struct RequestContext {
    route_data: RouteData,
    scope: Option<Arc<dyn Resolver>>,
}

impl RequestContext {
    pub fn new(route_data: RouteData) -> Self {
        Self {
            route_data,
            scope: None,
        }
    }

    /// Attach the request scope
    pub fn with_scope(mut self, scope: Arc<dyn Resolver>) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn route_data(&self) -> &RouteData {
        &self.route_data
    }

    /// The request scope, if the host attached one
    pub fn scope(&self) -> Option<&dyn Resolver> {
        self.scope.as_deref()
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("route_data", &self.route_data)
            .field("scope", &self.scope.is_some())
            .finish()
    }
}

/// Builds the context from what the host put on the request: matched path
/// parameters, an optional [`DataTokens`] extension, an optional `Arc<RouteBase>`
/// extension and an optional [`ScopeHandle`] extension.
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let values = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map(|Path(values)| values)
            .unwrap_or_default();

        let route_data = RouteData {
            values,
            data_tokens: parts
                .extensions
                .get::<DataTokens>()
                .cloned()
                .unwrap_or_default(),
            route: parts.extensions.get::<Arc<RouteBase>>().cloned(),
        };

        Ok(Self {
            route_data,
            scope: parts
                .extensions
                .get::<ScopeHandle>()
                .map(|handle| Arc::clone(handle.resolver())),
        })
    }
}
