use crate::infra::AppState;
use applicant_intake::workflows::screening::{screening_router, DecisionClient, ScreeningService};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_screening_routes<C>(service: Arc<ScreeningService<C>>) -> axum::Router
where
    C: DecisionClient + 'static,
{
    screening_router(service)
        .route("/", axum::routing::get(application_form))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

/// The browser front end: one static page whose form posts JSON to the
/// evaluation endpoint and renders the reply in place.
pub(crate) async fn application_form() -> Html<&'static str> {
    Html(include_str!("../assets/index.html"))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
