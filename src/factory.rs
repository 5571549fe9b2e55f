//! Controller factories
//!
//! A [`ControllerFactory`] turns a controller name from the route into a running
//! controller. [`KeyedControllerFactory`] does so by looking both steps up in the
//! request's resolution scope.

use crate::context::RequestContext;
use crate::controller::{Controller, ControllerHandle, ControllerType, service_key};
use crate::resolver::{ResolverExt, ServiceKey};
use crate::routing::AREA_TOKEN;
use std::sync::Arc;

/// Pluggable controller-selection step of the dispatcher.
///
/// `None` means "not found": the host falls back however it sees fit.
pub trait ControllerFactory: Send + Sync + 'static {
    /// Find the controller type registered for `controller_name`
    fn controller_type(
        &self,
        context: &RequestContext,
        controller_name: &str,
    ) -> Option<ControllerType>;

    /// Obtain an instance of `controller_type`
    fn controller_instance(
        &self,
        context: &RequestContext,
        controller_type: ControllerType,
    ) -> Option<Arc<dyn Controller>>;

    /// Resolve the type for `controller_name`, then an instance of it.
    fn create_controller(
        &self,
        context: &RequestContext,
        controller_name: &str,
    ) -> Option<Arc<dyn Controller>> {
        let controller_type = self.controller_type(context, controller_name)?;
        self.controller_instance(context, controller_type)
    }

    /// Hand a controller back once the request is done with it.
    fn release_controller(&self, controller: Arc<dyn Controller>) {
        drop(controller);
    }
}

/// Resolves controllers from the request scope by key.
///
/// - names are looked up under `lowercase(area + "/" + name)` as a
///   [`ControllerHandle`], whose metadata supplies the controller type;
/// - instances are looked up under the controller type itself.
///
/// A request without a scope, or a key nobody registered, resolves to `None`.
#[derive(Debug, Clone)]
pub struct KeyedControllerFactory {
    area_token: String,
}

impl KeyedControllerFactory {
    pub fn new() -> Self {
        Self::with_area_token(AREA_TOKEN)
    }

    /// Use `area_token` instead of `"area"` to find the area name
    pub fn with_area_token(area_token: impl Into<String>) -> Self {
        Self {
            area_token: area_token.into(),
        }
    }

    fn try_resolve<T>(&self, context: &RequestContext, key: &ServiceKey) -> Option<T>
    where
        T: Clone + Send + Sync + 'static,
    {
        let Some(scope) = context.scope() else {
            tracing::debug!("No request scope attached; cannot resolve {}", key);
            return None;
        };
        scope.resolve_keyed::<T>(key)
    }
}

impl Default for KeyedControllerFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerFactory for KeyedControllerFactory {
    fn controller_type(
        &self,
        context: &RequestContext,
        controller_name: &str,
    ) -> Option<ControllerType> {
        let area = context.route_data().area_name_by(&self.area_token);
        let key = ServiceKey::Named(service_key(area, controller_name));

        let handle = self.try_resolve::<ControllerHandle>(context, &key)?;
        let controller_type = handle.metadata().controller_type;
        tracing::trace!("Resolved {} to {}", key, controller_type);
        Some(controller_type)
    }

    fn controller_instance(
        &self,
        context: &RequestContext,
        controller_type: ControllerType,
    ) -> Option<Arc<dyn Controller>> {
        self.try_resolve::<Arc<dyn Controller>>(context, &controller_type.key())
    }

    fn release_controller(&self, controller: Arc<dyn Controller>) {
        tracing::trace!(
            references = Arc::strong_count(&controller),
            "Releasing controller"
        );
        drop(controller);
    }
}
