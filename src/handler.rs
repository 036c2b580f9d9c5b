//! Handler trait and type erasure.
//!
//! The router keeps handlers of different concrete types in one table, so
//! each is wrapped once at registration time:
//!
//! ```text
//! async fn list(req: Request) -> Response { … }
//!        ↓ router.get("/posts", list)
//! Arc::new(FnHandler(list))          stored as BoxedHandler
//!        ↓ per request
//! handler.call(req)                  one virtual call, boxed future
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so the recover middleware can move it onto its own task.
#[doc(hidden)]
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler shared across concurrent requests.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Never implemented by hand: any `Fn(Request) -> impl Future<Output = impl
/// IntoResponse>` qualifies, which includes plain `async fn` items and
/// closures that capture shared state:
///
/// ```rust
/// use std::sync::Arc;
/// use blog_api::{PostStore, Request, Router};
///
/// let store = Arc::new(PostStore::seeded());
/// let router = Router::new().get("/count", move |_req: Request| {
///     let store = Arc::clone(&store);
///     async move { store.len().to_string() }
/// });
/// ```
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
