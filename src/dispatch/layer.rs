use crate::context::ScopeHandle;
use crate::di::Container;
use axum::http::Request;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Tower Layer opening a [`RequestScope`](crate::di::RequestScope) per request
///
/// The scope is attached to the request as a [`ScopeHandle`] extension and ends
/// when the request and every context holding it are dropped.
#[derive(Clone)]
pub struct ScopeLayer {
    container: Arc<Container>,
}

impl ScopeLayer {
    pub fn new(container: Arc<Container>) -> Self {
        Self { container }
    }
}

impl<S> Layer<S> for ScopeLayer {
    type Service = ScopeMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ScopeMiddleware {
            inner,
            container: Arc::clone(&self.container),
        }
    }
}

#[derive(Clone)]
pub struct ScopeMiddleware<S> {
    inner: S,
    container: Arc<Container>,
}

impl<S, B> Service<Request<B>> for ScopeMiddleware<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let scope = self.container.begin_scope();
        request
            .extensions_mut()
            .insert(ScopeHandle::new(Arc::new(scope)));
        self.inner.call(request)
    }
}
