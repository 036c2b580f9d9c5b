//! Error types.
//!
//! [`Error`] surfaces infrastructure failures (binding a port, accepting a
//! connection). [`ApiError`] is the request-level taxonomy: every variant maps
//! to one HTTP status and renders itself as `{"error": "<message>"}`.

use std::num::ParseIntError;

use thiserror::Error;
use tracing::error;

use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The error type returned by the server's fallible operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// A request that could not be served.
///
/// Each variant is raised before any store mutation, so returning one never
/// leaves a half-applied change behind.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Title, content, and author are required")]
    MissingFields,

    #[error("Invalid post ID")]
    InvalidId(#[source] ParseIntError),

    #[error("Post not found")]
    NotFound,

    #[error("Error encoding {what}")]
    Encode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            Self::InvalidJson(_) | Self::MissingFields | Self::InvalidId(_) => Status::BadRequest,
            Self::NotFound => Status::NotFound,
            Self::Encode { .. } => Status::InternalServerError,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, "{self}");
        }

        let body = serde_json::json!({ "error": self.to_string() });
        Response::builder()
            .status(status)
            .json(body.to_string().into_bytes())
    }
}
