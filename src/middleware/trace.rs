use std::future::Future;
use std::time::Instant;

use tracing::{info, warn};

use crate::response::Response;

/// Awaits `fut` and records one event for the finished request.
///
/// Server errors are logged at `warn`, everything else at `info`.
pub(crate) async fn trace<F>(method: &http::Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let started = Instant::now();
    let res = fut.await;
    let status = res.status_code().as_u16();
    let latency_ms = started.elapsed().as_secs_f64() * 1000.0;

    if res.status_code().is_server_error() {
        warn!(%method, path, status, latency_ms, "request failed");
    } else {
        info!(%method, path, status, latency_ms, "request");
    }
    res
}
