//! Route table for the service.

use std::future::Future;
use std::sync::Arc;

use crate::health;
use crate::posts;
use crate::request::Request;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::store::PostStore;

/// Builds the router serving `/posts` and `/up` from `store`.
///
/// The caller keeps its own handle on the store, which is how tests observe
/// state after a request.
pub fn app(store: Arc<PostStore>) -> Router {
    Router::new()
        .get("/posts", with_store(&store, posts::list_posts))
        .post("/posts", with_store(&store, posts::create_post))
        .get("/posts/{id}", with_store(&store, posts::get_post))
        .delete("/posts/{id}", with_store(&store, posts::delete_post))
        .get("/up", health::heartbeat)
        .head("/up", health::heartbeat)
}

/// Adapts a `(store, request)` handler into a plain request handler.
fn with_store<F, Fut, R>(
    store: &Arc<PostStore>,
    handler: F,
) -> impl Fn(Request) -> Fut + Send + Sync + 'static
where
    F: Fn(Arc<PostStore>, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    let store = Arc::clone(store);
    move |req| handler(Arc::clone(&store), req)
}
