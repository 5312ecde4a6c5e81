use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde_json::{json, Value};

use super::client::{DecisionClient, DecisionError};
use super::domain::ApplicantRecord;
use super::service::{ScreeningError, ScreeningService};

/// Router builder exposing the HTTP evaluation endpoint.
pub fn screening_router<C>(service: Arc<ScreeningService<C>>) -> Router
where
    C: DecisionClient + 'static,
{
    Router::new()
        .route(
            "/api/v1/screening/evaluations",
            post(evaluate_handler::<C>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<C>(
    State(service): State<Arc<ScreeningService<C>>>,
    axum::Json(record): axum::Json<ApplicantRecord>,
) -> Response
where
    C: DecisionClient + 'static,
{
    match service.evaluate(&record).await {
        Ok(receipt) => {
            let payload = json!({
                "ok": true,
                "outcome": receipt.decision.label,
                "message": receipt.decision.message,
                "evaluation_token": receipt.evaluation_token,
                "summary": receipt.summary,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(ScreeningError::Rejected(errors)) => {
            let payload = json!({ "ok": false, "errors": errors });
            (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response()
        }
        Err(ScreeningError::Decision(error)) => decision_failure(error),
    }
}

/// Map decision failures onto the wire contract. Upstream replies keep their
/// status and body; every other mode gets a fixed, actionable message.
fn decision_failure(error: DecisionError) -> Response {
    match error {
        DecisionError::Timeout => error_response(
            StatusCode::GATEWAY_TIMEOUT,
            vec![Value::String(
                "Request to Alloy timed out. Try again.".to_string(),
            )],
        ),
        DecisionError::Connection(_) => error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            vec![Value::String(
                "Could not connect to Alloy API. Check internet.".to_string(),
            )],
        ),
        DecisionError::Transport(detail) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            vec![Value::String(detail)],
        ),
        DecisionError::Upstream { status, body } => {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            error_response(status, vec![upstream_detail(body)])
        }
        DecisionError::MalformedResponse { body, .. } => error_response(
            StatusCode::BAD_GATEWAY,
            vec![
                Value::String("Non-JSON response from Alloy.".to_string()),
                Value::String(body),
            ],
        ),
    }
}

/// Upstream error bodies pass through as parsed JSON when they parse and as
/// raw text otherwise, so nothing the vendor said is lost.
fn upstream_detail(body: String) -> Value {
    serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body))
}

fn error_response(status: StatusCode, errors: Vec<Value>) -> Response {
    let payload = json!({ "ok": false, "errors": errors });
    (status, axum::Json(payload)).into_response()
}
