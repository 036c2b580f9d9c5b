use tracing::error;

use super::error_response;
use crate::handler::BoxFuture;
use crate::response::Response;
use crate::status::Status;

/// Runs a handler future on its own task so a panic inside it is contained.
///
/// The panic is logged and answered with `500`; the connection and the
/// server keep going.
pub(crate) async fn recover(fut: BoxFuture) -> Response {
    match tokio::spawn(fut).await {
        Ok(res) => res,
        Err(e) if e.is_panic() => {
            let panic = e.into_panic();
            let message = panic.downcast_ref::<&str>().copied()
                .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                .unwrap_or("<non-string panic payload>");
            error!(panic = message, "handler panicked");
            error_response(Status::InternalServerError)
        }
        Err(e) => {
            error!("handler task failed: {e}");
            error_response(Status::InternalServerError)
        }
    }
}
