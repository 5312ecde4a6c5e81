use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::workflows::screening::client::{DecisionClient, DecisionError};
use crate::workflows::screening::domain::{ApplicantRecord, DecisionSummary, EvaluationResponse};
use crate::workflows::screening::payload::EvaluationPayload;
use crate::workflows::screening::screening_router;
use crate::workflows::screening::service::ScreeningService;

pub(super) fn fixture_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date")
}

pub(super) fn applicant() -> ApplicantRecord {
    ApplicantRecord {
        name_first: "Avery".to_string(),
        name_last: "Quinn".to_string(),
        birth_date: "1992-04-09".to_string(),
        ssn: "123456789".to_string(),
        email: "Avery.Quinn@Example.com".to_string(),
        address_line1: "41 Cherry Lane".to_string(),
        address_line2: None,
        address_city: "Des Moines".to_string(),
        address_state: "ia".to_string(),
        address_postal_code: "50309".to_string(),
    }
}

pub(super) fn summary_with_outcome(outcome: &str) -> DecisionSummary {
    DecisionSummary {
        outcome: Some(outcome.to_string()),
        score: Some(json!(0.93)),
        tags: Some(json!(["sandbox"])),
        ..Default::default()
    }
}

/// Fake client that records every submitted payload and answers with a
/// canned response.
#[derive(Clone)]
pub(super) struct RecordingClient {
    response: EvaluationResponse,
    submissions: Arc<Mutex<Vec<EvaluationPayload>>>,
}

impl RecordingClient {
    pub(super) fn with_outcome(outcome: &str) -> Self {
        Self::with_response(EvaluationResponse {
            evaluation_token: Some("EVL-TEST-0001".to_string()),
            summary: Some(summary_with_outcome(outcome)),
        })
    }

    pub(super) fn with_response(response: EvaluationResponse) -> Self {
        Self {
            response,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn submissions(&self) -> Vec<EvaluationPayload> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl DecisionClient for RecordingClient {
    async fn workflow_parameters(&self) -> Result<Value, DecisionError> {
        Ok(json!({ "required": ["name_first", "name_last", "birth_date"] }))
    }

    async fn submit_evaluation(
        &self,
        payload: &EvaluationPayload,
    ) -> Result<EvaluationResponse, DecisionError> {
        self.submissions
            .lock()
            .expect("submission mutex poisoned")
            .push(payload.clone());
        Ok(self.response.clone())
    }
}

/// Which failure a [`FailingClient`] fabricates on every call.
pub(super) enum FailureKind {
    Timeout,
    Connection,
    Transport { detail: &'static str },
    Upstream { status: u16, body: &'static str },
    Malformed { body: &'static str },
}

/// Fake client that fails every call and counts how often it was asked.
pub(super) struct FailingClient {
    kind: FailureKind,
    calls: Arc<AtomicU32>,
}

impl FailingClient {
    pub(super) fn new(kind: FailureKind) -> Self {
        Self {
            kind,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    pub(super) fn call_count(&self) -> u32 {
        self.calls.load(Ordering::Relaxed)
    }

    fn error(&self) -> DecisionError {
        match &self.kind {
            FailureKind::Timeout => DecisionError::Timeout,
            FailureKind::Connection => {
                DecisionError::Connection("connection refused".to_string())
            }
            FailureKind::Transport { detail } => DecisionError::Transport(detail.to_string()),
            FailureKind::Upstream { status, body } => DecisionError::Upstream {
                status: *status,
                body: body.to_string(),
            },
            FailureKind::Malformed { body } => DecisionError::MalformedResponse {
                body: body.to_string(),
                source: serde_json::from_str::<Value>(body).expect_err("body must not parse"),
            },
        }
    }
}

#[async_trait]
impl DecisionClient for FailingClient {
    async fn workflow_parameters(&self) -> Result<Value, DecisionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(self.error())
    }

    async fn submit_evaluation(
        &self,
        _payload: &EvaluationPayload,
    ) -> Result<EvaluationResponse, DecisionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Err(self.error())
    }
}

pub(super) fn recording_service(
    outcome: &str,
) -> (ScreeningService<RecordingClient>, RecordingClient) {
    let client = RecordingClient::with_outcome(outcome);
    let handle = client.clone();
    (ScreeningService::new(Arc::new(client)), handle)
}

pub(super) fn recording_router(outcome: &str) -> axum::Router {
    let (service, _) = recording_service(outcome);
    screening_router(Arc::new(service))
}

pub(super) fn failing_router(kind: FailureKind) -> axum::Router {
    let client = FailingClient::new(kind);
    screening_router(Arc::new(ScreeningService::new(Arc::new(client))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
