//! Handlers for the `/posts` resource.
//!
//! Each handler validates its input, makes at most one store call and
//! formats the result. Nothing here keeps state of its own.

use std::sync::Arc;

use serde::Serialize;

use crate::error::ApiError;
use crate::post::{NewPost, PostId};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;
use crate::store::PostStore;

/// `GET /posts`
pub async fn list_posts(store: Arc<PostStore>, _req: Request) -> Result<Response, ApiError> {
    json(Status::Ok, &store.list(), "posts")
}

/// `POST /posts`
pub async fn create_post(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let new: NewPost = serde_json::from_slice(req.body()).map_err(ApiError::InvalidJson)?;
    new.validate()?;

    let post = store.create(new);
    json(Status::Created, &post, "post")
}

/// `GET /posts/{id}`
pub async fn get_post(store: Arc<PostStore>, req: Request) -> Result<Response, ApiError> {
    let id = post_id(&req)?;
    let post = store.find_by_id(id).ok_or(ApiError::NotFound)?;
    json(Status::Ok, &post, "post")
}

/// `DELETE /posts/{id}`
pub async fn delete_post(store: Arc<PostStore>, req: Request) -> Result<Status, ApiError> {
    let id = post_id(&req)?;
    store.remove(id).ok_or(ApiError::NotFound)?;
    Ok(Status::NoContent)
}

/// Parses the `{id}` path parameter.
///
/// Any integer is well-formed; negative ones simply cannot match a post.
fn post_id(req: &Request) -> Result<PostId, ApiError> {
    let raw = req.param("id").unwrap_or_default();
    let id: i64 = raw.parse().map_err(ApiError::InvalidId)?;
    PostId::try_from(id).map_err(|_| ApiError::NotFound)
}

fn json<T: Serialize>(status: Status, value: &T, what: &'static str) -> Result<Response, ApiError> {
    let body = serde_json::to_vec(value).map_err(|source| ApiError::Encode { what, source })?;
    Ok((status, Response::json(body)).into_response())
}
