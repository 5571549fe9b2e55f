//! Request dispatch
//!
//! [`ScopeLayer`] opens a request scope for each request. [`dispatch`] picks the
//! controller named by the matched route through a [`ControllerFactory`] and runs
//! it, answering `404 Not Found` when nothing is registered for the name.
//!
//! ```rust,no_run
//! use keyed_dispatch::prelude::*;
//! use keyed_dispatch::dispatch::{DispatchState, ScopeLayer, routes};
//!
//! # fn container() -> Container { Container::new() }
//! let container = Arc::new(container());
//! let state = DispatchState::from_config(DispatchConfig::default());
//!
//! let app: Router = routes(state).layer(ScopeLayer::new(container));
//! ```

mod layer;

pub use layer::{ScopeLayer, ScopeMiddleware};

use crate::common::ApiResponse;
use crate::config::DispatchConfig;
use crate::context::RequestContext;
use crate::error::DispatchError;
use crate::factory::{ControllerFactory, KeyedControllerFactory};
use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
};
use std::sync::Arc;

/// Shared state of the [`dispatch`] handler
#[derive(Clone)]
pub struct DispatchState {
    factory: Arc<dyn ControllerFactory>,
    config: Arc<DispatchConfig>,
}

impl DispatchState {
    pub fn new(factory: impl ControllerFactory, config: DispatchConfig) -> Self {
        Self {
            factory: Arc::new(factory),
            config: Arc::new(config),
        }
    }

    /// Keyed resolution using the configured area token
    pub fn from_config(config: DispatchConfig) -> Self {
        let factory = KeyedControllerFactory::with_area_token(config.area_token.clone());
        Self::new(factory, config)
    }
}

/// Run the controller named by the route.
pub async fn dispatch(
    State(state): State<DispatchState>,
    context: RequestContext,
    request: Request<Body>,
) -> Response {
    let value_name = &state.config.controller_value;
    let Some(controller_name) = context.route_data().value(value_name) else {
        return DispatchError::missing_route_value(value_name.as_str()).into_response();
    };

    let Some(controller) = state.factory.create_controller(&context, controller_name) else {
        tracing::debug!(
            area = ?context.route_data().area_name_by(&state.config.area_token),
            "No controller found for {}",
            controller_name
        );
        return ApiResponse::<()>::failure(
            StatusCode::NOT_FOUND,
            format!("No controller found for '{controller_name}'"),
        )
        .into_response();
    };

    let response = controller.execute(&context, request).await;
    state.factory.release_controller(controller);
    response
}

/// Conventional `/{controller}` and `/{controller}/{action}` routes served by
/// [`dispatch`].
pub fn routes<S>(state: DispatchState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let controller = format!("/{{{}}}", state.config.controller_value);
    let with_action = format!("{controller}/{{action}}");

    Router::new()
        .route(&controller, any(dispatch))
        .route(&with_action, any(dispatch))
        .with_state(state)
}
