use crate::controller::{
    Controller, ControllerHandle, ControllerType, ControllerTypeMetadata, service_key,
};
use crate::di::{Container, Lifetime};
use crate::resolver::{Resolver, ResolverExt, ServiceKey};
use std::sync::Arc;

/// Builder for constructing a keyed dependency container
///
/// Use this to register services and controllers before building the container
/// that request scopes are opened from.
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
///
/// let container = ContainerBuilder::new()
///     .register_keyed("greeting", "hello".to_string())
///     .register_controller(Some("Admin"), "Home", |_| HomeController)
///     .build();
///
/// assert_eq!(container.len(), 3);
/// ```
pub struct ContainerBuilder {
    container: Container,
    default_lifetime: Lifetime,
}

impl ContainerBuilder {
    /// Create a new container builder
    pub fn new() -> Self {
        Self {
            container: Container::new(),
            default_lifetime: Lifetime::default(),
        }
    }

    /// Lifetime used by [`ContainerBuilder::register_controller`]
    pub fn default_lifetime(mut self, lifetime: Lifetime) -> Self {
        self.default_lifetime = lifetime;
        self
    }

    /// Register a service instance under `key`
    pub fn register_keyed<T>(mut self, key: impl Into<ServiceKey>, instance: T) -> Self
    where
        T: Clone + Send + Sync + 'static,
    {
        self.container.register_keyed(key, instance);
        self
    }

    /// Register a service factory under `key`
    pub fn register_keyed_factory<T, F>(
        mut self,
        key: impl Into<ServiceKey>,
        lifetime: Lifetime,
        factory: F,
    ) -> Self
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(&dyn Resolver) -> T + Send + Sync + 'static,
    {
        self.container.register_keyed_factory(key, lifetime, factory);
        self
    }

    /// Register a controller for `area`/`name` using the default lifetime
    pub fn register_controller<C, F>(self, area: Option<&str>, name: &str, factory: F) -> Self
    where
        C: Controller,
        F: Fn(&dyn Resolver) -> C + Send + Sync + 'static,
    {
        let lifetime = self.default_lifetime;
        self.register_controller_with(area, name, lifetime, factory)
    }

    /// Register a controller for `area`/`name`.
    ///
    /// Two registrations are made:
    /// - the `area/name` key (lowercased) maps to a [`ControllerHandle`] carrying the
    ///   controller type, so the type can be learned without building the controller;
    /// - the controller type itself maps to an `Arc<dyn Controller>` with `lifetime`.
    ///
    /// The handle builds its controller through the type registration, so a handle
    /// forced outside a request scope stays empty for a scoped controller.
    pub fn register_controller_with<C, F>(
        mut self,
        area: Option<&str>,
        name: &str,
        lifetime: Lifetime,
        factory: F,
    ) -> Self
    where
        C: Controller,
        F: Fn(&dyn Resolver) -> C + Send + Sync + 'static,
    {
        let controller_type = ControllerType::of::<C>();
        let metadata = ControllerTypeMetadata { controller_type };

        self.container.register_keyed_factory(
            controller_type.key(),
            lifetime,
            move |resolver| Arc::new(factory(resolver)) as Arc<dyn Controller>,
        );

        let key = service_key(area, name);
        tracing::debug!("Registering controller {} as {:?}", controller_type, key);
        self.container
            .register_keyed_factory(key, Lifetime::Transient, move |_| {
                ControllerHandle::new(metadata, move |resolver| {
                    resolver.resolve_keyed::<Arc<dyn Controller>>(&controller_type.key())
                })
            });
        self
    }

    /// Build the container
    pub fn build(self) -> Container {
        self.container
    }
}

impl Default for ContainerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
