//! Prometheus metrics.
//!
//! Request-level metrics come from [`metrics_middleware`]. The pipeline adds
//! two counters of its own:
//!
//! - `auth_attempts_total{method, outcome}`: identity resolution, `outcome`
//!   is `resolved` or `rejected`
//! - `role_checks_total{required, outcome}`: role gate decisions, `outcome`
//!   is `granted` or `denied`
//!
//! Set `OBSERVABILITY_ENABLED=false` to turn all of it off.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{Unit, counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const AUTH_ATTEMPTS: &str = "auth_attempts_total";
const ROLE_CHECKS: &str = "role_checks_total";

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0"))
            .unwrap_or(true)
    })
}

/// Install the Prometheus recorder and its upkeep task.
///
/// Returns `None` when observability is disabled; the caller then serves no
/// `/metrics` route.
pub fn init_metrics() -> anyhow::Result<Option<PrometheusHandle>> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )?
        .install_recorder()?;

    describe_metrics();

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(5));
        loop {
            ticker.tick().await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

fn describe_metrics() {
    describe_counter!("http_requests_total", "HTTP requests by method, route and status");
    describe_gauge!("http_requests_active", "HTTP requests currently in flight");
    describe_histogram!(REQUEST_DURATION, Unit::Seconds, "HTTP request latency");
    describe_counter!(
        AUTH_ATTEMPTS,
        "Identity resolutions by credential method and outcome"
    );
    describe_counter!(
        ROLE_CHECKS,
        "Role gate decisions by required role and outcome"
    );
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    // Unmatched requests share one label so random paths can't blow up cardinality.
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_owned(), |p| p.as_str().to_owned());

    gauge!("http_requests_active").increment(1.0);
    let response = next.run(req).await;
    gauge!("http_requests_active").decrement(1.0);

    let status = response.status().as_u16().to_string();
    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => route.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(REQUEST_DURATION, "method" => method, "path" => route)
        .record(start.elapsed().as_secs_f64());

    response
}

pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

/// Outcome of identity resolution, labelled by how the caller authenticated.
pub fn track_auth_attempt(method: &'static str, resolved: bool) {
    if !is_observability_enabled() {
        return;
    }
    let outcome = if resolved { "resolved" } else { "rejected" };
    counter!(AUTH_ATTEMPTS, "method" => method, "outcome" => outcome).increment(1);
}

pub fn track_role_check(required: &'static str, granted: bool) {
    if !is_observability_enabled() {
        return;
    }
    let outcome = if granted { "granted" } else { "denied" };
    counter!(ROLE_CHECKS, "required" => required, "outcome" => outcome).increment(1);
}
