//! Lightweight in-process metrics.
//!
//! Request counters and latency histograms are recorded by a router-wide
//! middleware and rendered in Prometheus text format by `/metrics`.

pub mod metrics;

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};

use crate::app_state::AppState;

/// Label used for requests that hit the fallback handler.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Record count and latency per matched route.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());
    let method = req.method().as_str().to_owned();

    let started = Instant::now();
    let resp = next.run(req).await;
    let elapsed = started.elapsed();

    let status = resp.status().as_u16().to_string();
    let metrics = state.metrics();
    metrics.http_requests.inc(&[("route", &route), ("method", &method), ("status", &status)]);
    metrics.http_request_duration.observe(&[("route", &route)], elapsed);

    resp
}
