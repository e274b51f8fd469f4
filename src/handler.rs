//! Handlers and how the router stores them.
//!
//! A route handler comes in one of two shapes:
//!
//! ```text
//! async fn welcome(req: Request) -> impl IntoResponse
//! async fn list_students(service: Arc<StudentService>, req: Request) -> impl IntoResponse
//! ```
//!
//! The second shape receives the router's shared state. Both are turned into
//! an [`Endpoint`] when registered, with the state `Arc` already captured, so
//! at request time the router only deals in `Request -> Response`.
//!
//! The marker parameter `M` on [`Handler`] keeps the two blanket impls
//! apart: a function is either `Fn(Request)` or `Fn(Arc<S>, Request)`,
//! never both, so the compiler picks the impl on its own.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// A registered route, state already bound.
#[doc(hidden)]
pub trait Endpoint: Send + Sync + 'static {
    fn call(&self, req: Request) -> BoxFuture;
}

pub(crate) type BoxedEndpoint = Arc<dyn Endpoint>;

/// Implemented for every valid route handler of a `Router<S>`.
///
/// Sealed. Satisfied by `Fn(Request) -> Fut` and by
/// `Fn(Arc<S>, Request) -> Fut` where `Fut` resolves to
/// [`IntoResponse`].
pub trait Handler<S, M>: private::Sealed<S, M> + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_endpoint(self, state: &Arc<S>) -> Arc<dyn Endpoint>;
}

mod private {
    pub trait Sealed<S, M> {}
}

/// Marker for handlers that ignore router state.
#[doc(hidden)]
pub enum Stateless {}

/// Marker for handlers that take `Arc<S>` first.
#[doc(hidden)]
pub enum WithState {}

// ── Fn(Request) ───────────────────────────────────────────────────────────────

impl<S, F, Fut, R> private::Sealed<S, Stateless> for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<S, F, Fut, R> Handler<S, Stateless> for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_endpoint(self, _state: &Arc<S>) -> Arc<dyn Endpoint> {
        Arc::new(Plain(self))
    }
}

struct Plain<F>(F);

impl<F, Fut, R> Endpoint for Plain<F>
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

// ── Fn(Arc<S>, Request) ───────────────────────────────────────────────────────

impl<S, F, Fut, R> private::Sealed<S, WithState> for F
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<S, F, Fut, R> Handler<S, WithState> for F
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_endpoint(self, state: &Arc<S>) -> Arc<dyn Endpoint> {
        Arc::new(Bound { state: Arc::clone(state), handler: self })
    }
}

struct Bound<S, F> {
    state: Arc<S>,
    handler: F,
}

impl<S, F, Fut, R> Endpoint for Bound<S, F>
where
    S: Send + Sync + 'static,
    F: Fn(Arc<S>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.handler)(Arc::clone(&self.state), req);
        Box::pin(async move { fut.await.into_response() })
    }
}
