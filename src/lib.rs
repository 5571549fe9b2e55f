//! # Keyed Dispatch
//!
//! Request-scoped, keyed controller resolution for axum applications.
//!
//! Every inbound request gets its own resolution scope. The controller named by the
//! matched route is looked up in that scope under `lowercase(area + "/" + name)`,
//! which yields the controller type; the instance is then looked up by that type.
//! Anything missing along the way is a plain "not found", never an error.
//!
//! ## Features
//!
//! - **Keyed resolution**: a small [`Resolver`] capability any container can implement
//! - **Request scopes**: singleton, scoped and transient lifetimes per registration
//! - **Areas**: area names from per-request data tokens or from the matched route
//! - **Deferred handles**: controller type metadata without building the controller
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use keyed_dispatch::prelude::*;
//! use keyed_dispatch::dispatch::{DispatchState, ScopeLayer, routes};
//! use axum::body::Body;
//! use axum::http::Request;
//!
//! // 1. Define a controller
//! struct HomeController;
//!
//! #[async_trait]
//! impl Controller for HomeController {
//!     async fn execute(&self, _context: &RequestContext, _request: Request<Body>) -> Response {
//!         "Welcome".into_response()
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     // 2. Register it under its area and name
//!     let container = ContainerBuilder::new()
//!         .register_controller(Some("Admin"), "Home", |_| HomeController)
//!         .build();
//!
//!     // 3. Mount the dispatcher for the area
//!     let admin = Arc::new(RouteBase::from(AreaRoute::new("/admin/{controller}", "Admin")));
//!     let app: Router = Router::new()
//!         .nest(
//!             "/admin",
//!             routes(DispatchState::from_config(DispatchConfig::default()))
//!                 .layer(axum::Extension(admin)),
//!         )
//!         .layer(ScopeLayer::new(Arc::new(container)));
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod common;
pub mod config;
pub mod context;
pub mod controller;
pub mod di;
pub mod dispatch;
pub mod error;
pub mod factory;
pub mod resolver;
pub mod routing;

// Re-export core types
pub use common::ApiResponse;
pub use config::{ConfigService, DispatchConfig};
pub use context::{RequestContext, ScopeHandle};
pub use controller::{Controller, ControllerHandle, ControllerType, ControllerTypeMetadata};
pub use di::{Container, ContainerBuilder, Lazy, Lifetime, RequestScope};
pub use error::{DispatchError, Result};
pub use factory::{ControllerFactory, KeyedControllerFactory};
pub use resolver::{Resolver, ResolverExt, ServiceKey};
pub use routing::{AreaRoute, DataTokens, Route, RouteBase, RouteData};

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use keyed_dispatch::prelude::*;
/// ```
pub mod prelude {
    pub use crate::common::ApiResponse;
    pub use crate::config::{ConfigService, DispatchConfig};
    pub use crate::context::{RequestContext, ScopeHandle};
    pub use crate::controller::{Controller, ControllerHandle, ControllerType, service_key};
    pub use crate::di::{Container, ContainerBuilder, Lazy, Lifetime, RequestScope};
    pub use crate::error::{DispatchError, Result};
    pub use crate::factory::{ControllerFactory, KeyedControllerFactory};
    pub use crate::resolver::{Resolver, ResolverExt, ServiceKey};
    pub use crate::routing::{AreaRoute, DataTokens, Route, RouteBase, RouteData};
    pub use async_trait::async_trait;
    pub use axum::{
        Router,
        http::StatusCode,
        response::{IntoResponse, Response},
    };
    pub use std::sync::Arc;
}
