//! Readiness endpoint.

/// GET /api/healthz - Readiness probe.
pub async fn healthz() -> &'static str {
    "OK"
}
