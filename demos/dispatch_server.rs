use axum::body::Body;
use axum::http::Request;
use axum::{Extension, Json};
use keyed_dispatch::dispatch::{DispatchState, ScopeLayer, routes};
use keyed_dispatch::prelude::*;
use serde_json::json;
use tower_http::trace::TraceLayer;

struct HomeController;

#[async_trait]
impl Controller for HomeController {
    async fn execute(&self, _context: &RequestContext, _request: Request<Body>) -> Response {
        ApiResponse::success("Welcome to the site").into_response()
    }
}

struct DashboardController {
    greeting: String,
}

#[async_trait]
impl Controller for DashboardController {
    async fn execute(&self, context: &RequestContext, _request: Request<Body>) -> Response {
        Json(json!({
            "greeting": self.greeting,
            "area": context.route_data().area_name(),
            "action": context.route_data().value("action"),
        }))
        .into_response()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = DispatchConfig::from_env()?;

    let container = ContainerBuilder::new()
        .default_lifetime(config.default_lifetime)
        .register_keyed("greeting", "Hello from the admin area".to_string())
        .register_controller(None, "Home", |_| HomeController)
        .register_controller(Some("Admin"), "Dashboard", |resolver| DashboardController {
            greeting: resolver
                .resolve_keyed(&"greeting".into())
                .unwrap_or_default(),
        })
        .build();

    let state = DispatchState::from_config(config);
    let site = Arc::new(RouteBase::from(Route::new("/{controller}")));
    let admin = Arc::new(RouteBase::from(AreaRoute::new("/admin/{controller}", "Admin")));

    let app: Router = Router::new()
        .nest("/admin", routes(state.clone()).layer(Extension(admin)))
        .merge(routes(state).layer(Extension(site)))
        .layer(ScopeLayer::new(Arc::new(container)))
        .layer(TraceLayer::new_for_http());

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Dispatch server running on http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
