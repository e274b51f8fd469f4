//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path, you
//! get a handler. `HEAD` falls back to the `GET` route with the body removed.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use http::header::{CONTENT_LENGTH, HeaderValue};
use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::handler::{BoxedEndpoint, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router, carrying a shared state `S` for handlers that
/// ask for it.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve).
/// Every registration returns `self` so calls chain.
pub struct Router<S = ()> {
    routes: HashMap<Method, MatchitRouter<BoxedEndpoint>>,
    state: Arc<S>,
}

/// What a method + path pair resolved to.
pub(crate) enum Route {
    Found(BoxedEndpoint, HashMap<String, String>),
    /// The path exists, but only under these methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router<()> {
    pub fn new() -> Self {
        Self::with_state(Arc::new(()))
    }
}

impl<S: Send + Sync + 'static> Router<S> {
    /// A router whose stateful handlers all receive a clone of `state`.
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// # use roster::{Request, Router, StudentService};
    /// async fn count(service: Arc<StudentService>, _req: Request) -> String {
    ///     service.count().to_string()
    /// }
    ///
    /// Router::with_state(Arc::new(StudentService::default())).get("/count", count);
    /// ```
    pub fn with_state(state: Arc<S>) -> Self {
        Self { routes: HashMap::new(), state }
    }

    pub fn state(&self) -> &Arc<S> {
        &self.state
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are read with `req.param("name")`.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not valid matchit syntax or is registered twice
    /// for the same method. Routes are fixed at startup, so this is a
    /// programming error.
    pub fn on<M>(mut self, method: Method, path: &str, handler: impl Handler<S, M>) -> Self {
        let endpoint = handler.into_endpoint(&self.state);
        self.routes
            .entry(method)
            .or_default()
            .insert(path, endpoint)
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get<M>(self, path: &str, handler: impl Handler<S, M>) -> Self {
        self.on(Method::Get, path, handler)
    }

    pub fn post<M>(self, path: &str, handler: impl Handler<S, M>) -> Self {
        self.on(Method::Post, path, handler)
    }

    pub fn put<M>(self, path: &str, handler: impl Handler<S, M>) -> Self {
        self.on(Method::Put, path, handler)
    }

    pub fn delete<M>(self, path: &str, handler: impl Handler<S, M>) -> Self {
        self.on(Method::Delete, path, handler)
    }

    fn find<'p>(&self, method: Method, path: &'p str) -> Option<matchit::Match<'_, 'p, &BoxedEndpoint>> {
        self.routes.get(&method)?.at(path).ok()
    }

    pub(crate) fn lookup(&self, method: Method, path: &str) -> Route {
        let matched = self.find(method, path).or_else(|| match method {
            Method::Head => self.find(Method::Get, path),
            _ => None,
        });

        if let Some(matched) = matched {
            let params = matched
                .params
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            return Route::Found(Arc::clone(matched.value), params);
        }

        let has_get = self.find(Method::Get, path).is_some();
        let allowed: Vec<Method> = Method::ALL
            .into_iter()
            .filter(|&m| self.find(m, path).is_some() || (m == Method::Head && has_get))
            .collect();

        if allowed.is_empty() { Route::NotFound } else { Route::MethodNotAllowed(allowed) }
    }

    /// Routes one request and produces one response. Never fails: unknown
    /// paths are `404` and known paths under the wrong method are `405`.
    pub(crate) async fn handle(&self, mut req: Request) -> Response {
        match self.lookup(req.method, &req.path) {
            Route::Found(endpoint, params) => {
                req.params = params;
                let head = req.method == Method::Head;
                let mut res = endpoint.call(req).await;
                if head {
                    strip_body(&mut res);
                }
                res
            }
            Route::MethodNotAllowed(allowed) => {
                debug!(method = %req.method, path = %req.path, "method not allowed");
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Route::NotFound => Response::status(Status::NotFound),
        }
    }
}

/// Answers `HEAD` with the headers `GET` would send.
fn strip_body(res: &mut Response) {
    let len = res.body.len();
    res.body = Bytes::new();
    res.headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
}

impl Default for Router<()> {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use http::HeaderMap;

    use super::*;

    async fn hello(req: Request) -> String {
        format!("hello {}", req.param("name").unwrap_or("nobody"))
    }

    fn request(method: Method, path: &str) -> Request {
        Request::new(method, path, HeaderMap::new(), Bytes::new())
    }

    #[tokio::test]
    async fn dispatches_with_params() {
        let router = Router::new().get("/hello/{name}", hello);
        let res = router.handle(request(Method::Get, "/hello/zoya")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"hello zoya");
    }

    #[tokio::test]
    async fn stateful_and_plain_handlers_mix() {
        async fn bump(counter: Arc<AtomicUsize>, _req: Request) -> String {
            counter.fetch_add(1, Ordering::SeqCst).to_string()
        }

        let router = Router::with_state(Arc::new(AtomicUsize::new(0)))
            .get("/hello/{name}", hello)
            .post("/bump", bump);

        router.handle(request(Method::Post, "/bump")).await;
        router.handle(request(Method::Post, "/bump")).await;
        let res = router.handle(request(Method::Get, "/hello/ira")).await;

        assert_eq!(res.body(), b"hello ira");
        assert_eq!(router.state().load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let router = Router::new().get("/hello/{name}", hello);
        let res = router.handle(request(Method::Get, "/bye")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn wrong_method_lists_allowed_ones() {
        let router = Router::new()
            .get("/hello/{name}", hello)
            .delete("/hello/{name}", hello);
        let res = router.handle(request(Method::Post, "/hello/zoya")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("DELETE, GET, HEAD"));
    }

    #[tokio::test]
    async fn head_uses_the_get_route_without_a_body() {
        let router = Router::new().get("/hello/{name}", hello);
        let res = router.handle(request(Method::Head, "/hello/zoya")).await;
        assert_eq!(res.status_code(), 200);
        assert!(res.body().is_empty());
        assert_eq!(res.header("content-length"), Some("10"));
        assert_eq!(res.header("content-type"), Some("text/plain; charset=utf-8"));
    }

    #[tokio::test]
    async fn head_without_a_get_route_is_not_allowed() {
        let router = Router::new().delete("/hello/{name}", hello);
        let res = router.handle(request(Method::Head, "/hello/zoya")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("DELETE"));
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn duplicate_route_panics() {
        let _ = Router::new().get("/a", hello).get("/a", hello);
    }
}
