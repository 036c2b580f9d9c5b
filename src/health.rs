//! Liveness endpoint.
//!
//! `GET /up` (and `HEAD /up`) answers `200 OK` with a single `.` as long as
//! the process can serve HTTP at all. It touches no state, so a load balancer
//! probe never contends with the post store.

use crate::{Request, Response};

pub async fn heartbeat(_req: Request) -> Response {
    Response::text(".")
}
