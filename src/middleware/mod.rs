//! Middleware layer.
//!
//! Cross-cutting concerns applied to every request by the server and router:
//!
//! - [`trace`] — one `tracing` event per request with method, path, status
//!   and latency
//! - [`recover`] — a panicking handler becomes `500 Internal Server Error`
//!   instead of tearing down the connection
//! - [`json_content_type`] — responses default to `application/json`

mod recover;
mod trace;

pub(crate) use recover::recover;
pub(crate) use trace::trace;

use crate::response::{APPLICATION_JSON, Response};
use crate::status::Status;

/// Sets `content-type: application/json` unless the handler chose one.
pub(crate) fn json_content_type(mut res: Response) -> Response {
    res.set_header_if_absent("content-type", APPLICATION_JSON);
    res
}

/// A framework-generated error: `{"error": "<reason phrase>"}`.
pub(crate) fn error_response(status: Status) -> Response {
    let body = serde_json::json!({ "error": status.reason() });
    Response::builder()
        .status(status)
        .json(body.to_string().into_bytes())
}
