//! # blog-api
//!
//! A small JSON API over an in-memory collection of blog posts.
//!
//! | Method | Path | Success | Failure |
//! |---|---|---|---|
//! | `GET` | `/posts` | `200` array of posts | |
//! | `POST` | `/posts` | `201` created post | `400` bad JSON or empty field |
//! | `GET` | `/posts/{id}` | `200` post | `400` non-integer id, `404` |
//! | `DELETE` | `/posts/{id}` | `204` | `400` non-integer id, `404` |
//! | `GET` | `/up` | `200` `.` | |
//!
//! State lives in a [`PostStore`] for the life of the process; a restart
//! brings back the two sample posts and nothing else.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use blog_api::{PostStore, Server, app};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = Arc::new(PostStore::seeded());
//!     let addr = "0.0.0.0:8000".parse().unwrap();
//!
//!     Server::bind(addr).serve(app(store)).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handler;
mod method;
mod middleware;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod config;
pub mod health;
pub mod post;
pub mod posts;
pub mod seed;
pub mod store;

pub use app::app;
pub use config::Config;
pub use error::{ApiError, Error};
pub use handler::Handler;
pub use method::Method;
pub use post::{NewPost, Post, PostId};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::PostStore;
