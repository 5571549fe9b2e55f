use axum::body::{Body, to_bytes};
use axum::http::Request;
use axum::{Extension, Router};
use keyed_dispatch::dispatch::{DispatchState, ScopeLayer, routes};
use keyed_dispatch::prelude::*;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

struct HomeController;

#[async_trait]
impl Controller for HomeController {
    async fn execute(&self, _context: &RequestContext, _request: Request<Body>) -> Response {
        "admin home".into_response()
    }
}

struct ProfileController;

#[async_trait]
impl Controller for ProfileController {
    async fn execute(&self, context: &RequestContext, _request: Request<Body>) -> Response {
        let area = context.route_data().area_name().unwrap_or("-").to_string();
        format!("profile in {area}").into_response()
    }
}

#[derive(Clone)]
struct RequestStamp(Uuid);

struct BlogController {
    stamp: RequestStamp,
}

#[async_trait]
impl Controller for BlogController {
    async fn execute(&self, context: &RequestContext, _request: Request<Body>) -> Response {
        let action = context.route_data().value("action").unwrap_or("index");
        format!("blog:{action}:{}", self.stamp.0).into_response()
    }
}

fn container() -> Arc<Container> {
    Arc::new(
        ContainerBuilder::new()
            .register_keyed_factory("stamp", Lifetime::Scoped, |_| RequestStamp(Uuid::new_v4()))
            .register_controller(Some("Admin"), "Home", |_| HomeController)
            .register_controller(Some("Users"), "Profile", |_| ProfileController)
            .register_controller(None, "Blog", |resolver| BlogController {
                stamp: resolver
                    .resolve_keyed(&"stamp".into())
                    .expect("stamp is registered"),
            })
            .build(),
    )
}

fn area(pattern: &str, area: &str) -> Extension<Arc<RouteBase>> {
    Extension(Arc::new(RouteBase::from(AreaRoute::new(pattern, area))))
}

fn unscoped_app() -> Router {
    let state = DispatchState::from_config(DispatchConfig::default());
    let site = Extension(Arc::new(RouteBase::from(Route::new("/site/{controller}"))));

    Router::new()
        .nest("/site", routes(state.clone()).layer(site))
        .nest(
            "/admin",
            routes(state.clone()).layer(area("/admin/{controller}", "Admin")),
        )
        .nest(
            "/members",
            routes(state)
                .layer(area("/members/{controller}", "Other"))
                .layer(Extension(DataTokens::new().with("area", "Users"))),
        )
}

fn app() -> Router {
    unscoped_app().layer(ScopeLayer::new(container()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_area_controller_is_dispatched() {
    let (status, body) = get(app(), "/admin/home").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "admin home");
}

#[tokio::test]
async fn test_controller_name_is_case_insensitive() {
    let (status, body) = get(app(), "/admin/HOME/index").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "admin home");
}

#[tokio::test]
async fn test_controller_without_area() {
    let (status, body) = get(app(), "/site/blog/archive").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("blog:archive:"));
}

#[tokio::test]
async fn test_area_mismatch_is_not_found() {
    let (status, body) = get(app(), "/site/home").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NotFound");
}

#[tokio::test]
async fn test_request_tokens_override_route_area() {
    let (status, body) = get(app(), "/members/profile").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "profile in Users");
}

#[tokio::test]
async fn test_without_scope_is_not_found() {
    let (status, _) = get(unscoped_app(), "/admin/home").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_each_request_gets_its_own_scope() {
    let app = app();
    let (_, first) = get(app.clone(), "/site/blog").await;
    let (_, second) = get(app, "/site/blog").await;
    assert!(first.starts_with("blog:index:"));
    assert_ne!(first, second);
}
