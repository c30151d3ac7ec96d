use axum::{http::header, response::IntoResponse};
use service_core::middleware::metrics::render_metrics;

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        render_metrics(),
    )
}
